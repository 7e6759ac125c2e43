pub mod arrow;
pub mod csv;
pub mod parquet;

pub use self::arrow::GeoHashesToArrow;
pub use self::csv::{
    CoordinateSource, CsvGeoHashConfig, CsvToGeoHash, GeometryFormat, csv_to_geohash_csv,
};
pub use self::parquet::{GeoHashesToGeoParquet, write_geoparquet};
