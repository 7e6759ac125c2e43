use crate::cell::GeoHash;
use crate::error::GeoHashError;
use arrow_array::{Float64Array, RecordBatch, StringArray, UInt32Array};
use arrow_schema::{DataType, Field, Schema};
use geo_types::Point;
use geoarrow_array::IntoArrow;
use geoarrow_array::array::{PointArray, PolygonArray};
use geoarrow_array::builder::{PointBuilder, PolygonBuilder};
use geoarrow_schema::{Crs, Dimension, Metadata, PointType, PolygonType};
use rayon::prelude::*;
use std::sync::Arc;

fn wgs84_metadata() -> Arc<Metadata> {
    let crs = Crs::from_authority_code("EPSG:4326".to_string());
    Arc::new(Metadata::new(crs, None))
}

/// Trait for converting collections of [`GeoHash`]es to Arrow arrays.
///
/// Implemented for `[GeoHash]` and `Vec<GeoHash>`.
pub trait GeoHashesToArrow {
    /// Converts cell centres to an Arrow PointArray.
    fn to_arrow_points(&self) -> PointArray;
    /// Converts cells to an Arrow PolygonArray of rectangles.
    fn to_arrow_polygons(&self) -> PolygonArray;
    /// Converts cells to a RecordBatch with geohash, bits, latitude, longitude, and geometry.
    fn to_record_batch(&self) -> Result<RecordBatch, GeoHashError>;
}

impl GeoHashesToArrow for [GeoHash] {
    fn to_arrow_points(&self) -> PointArray {
        let point = PointType::new(Dimension::XY, wgs84_metadata());
        let mut builder = PointBuilder::with_capacity(point, self.len());

        for hash in self {
            let center: Point<f64> = hash.center().into();
            builder.push_point(Some(&center));
        }
        builder.finish()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        let poly = PolygonType::new(Dimension::XY, wgs84_metadata());
        let polygons: Vec<_> = self.par_iter().map(|h: &GeoHash| h.to_polygon()).collect();
        PolygonBuilder::from_polygons(&polygons, poly).finish()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, GeoHashError> {
        let polygon_array = self.to_arrow_polygons();
        let codes: StringArray = self.iter().map(|h| Some(h.geohash())).collect();
        let bits: UInt32Array = self
            .iter()
            .map(|h| Some(h.precision().bit_count()))
            .collect();
        let centers: Vec<_> = self.iter().map(GeoHash::center).collect();
        let latitudes: Float64Array = centers.iter().map(|c| Some(c.latitude)).collect();
        let longitudes: Float64Array = centers.iter().map(|c| Some(c.longitude)).collect();

        let geometry_field = polygon_array.extension_type().to_field("geometry", false);
        let schema = Schema::new(vec![
            Field::new("geohash", DataType::Utf8, false),
            Field::new("bits", DataType::UInt32, false),
            Field::new("latitude", DataType::Float64, false),
            Field::new("longitude", DataType::Float64, false),
            geometry_field,
        ]);

        RecordBatch::try_new(
            Arc::new(schema),
            vec![
                Arc::new(codes),
                Arc::new(bits),
                Arc::new(latitudes),
                Arc::new(longitudes),
                Arc::new(polygon_array.into_arrow()),
            ],
        )
        .map_err(|e| GeoHashError::IoError(e.to_string()))
    }
}

impl GeoHashesToArrow for Vec<GeoHash> {
    fn to_arrow_points(&self) -> PointArray {
        self.as_slice().to_arrow_points()
    }

    fn to_arrow_polygons(&self) -> PolygonArray {
        self.as_slice().to_arrow_polygons()
    }

    fn to_record_batch(&self) -> Result<RecordBatch, GeoHashError> {
        self.as_slice().to_record_batch()
    }
}
