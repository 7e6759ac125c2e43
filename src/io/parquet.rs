use crate::cell::GeoHash;
use crate::error::GeoHashError;
use crate::io::arrow::GeoHashesToArrow;
use arrow_array::RecordBatch;
use geoparquet::writer::{
    GeoParquetRecordBatchEncoder, GeoParquetWriterEncoding, GeoParquetWriterOptionsBuilder,
};
use parquet::arrow::ArrowWriter;
use std::fs::File;
use std::path::Path;

fn io_error(e: impl ToString) -> GeoHashError {
    GeoHashError::IoError(e.to_string())
}

/// Writes a record batch with a geoarrow geometry column as a GeoParquet file
/// (WKB encoded).
pub fn write_geoparquet(batch: &RecordBatch, path: impl AsRef<Path>) -> Result<(), GeoHashError> {
    let options = GeoParquetWriterOptionsBuilder::default()
        .set_encoding(GeoParquetWriterEncoding::WKB)
        .build();
    let mut encoder =
        GeoParquetRecordBatchEncoder::try_new(&batch.schema(), &options).map_err(io_error)?;

    let file = File::create(path).map_err(io_error)?;
    let mut writer =
        ArrowWriter::try_new(file, encoder.target_schema(), None).map_err(io_error)?;

    let encoded = encoder.encode_record_batch(batch).map_err(io_error)?;
    writer.write(&encoded).map_err(io_error)?;

    writer.append_key_value_metadata(encoder.into_keyvalue().map_err(io_error)?);
    writer.finish().map_err(io_error)?;

    log::debug!("wrote {} rows of GeoParquet", batch.num_rows());
    Ok(())
}

pub trait GeoHashesToGeoParquet: GeoHashesToArrow {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), GeoHashError>;
}

impl GeoHashesToGeoParquet for [GeoHash] {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), GeoHashError> {
        write_geoparquet(&self.to_record_batch()?, path)
    }
}

impl GeoHashesToGeoParquet for Vec<GeoHash> {
    fn to_geoparquet(&self, path: impl AsRef<Path>) -> Result<(), GeoHashError> {
        self.as_slice().to_geoparquet(path)
    }
}
