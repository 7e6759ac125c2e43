use crate::error::GeoHashError;
use geo_types::{Geometry, Polygon};
use geojson::GeoJson;
use std::str::FromStr;
use wkt::{ToWkt, Wkt};

/// Parses a geometry string, auto-detecting WKT or GeoJSON format.
///
/// GeoJSON is detected by a leading `{`, everything else is tried as WKT.
pub fn parse_geometry(s: &str) -> Result<Geometry<f64>, GeoHashError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

/// Parses a GeoJSON geometry or feature into a `geo_types::Geometry`.
pub fn parse_geojson(s: &str) -> Result<Geometry<f64>, GeoHashError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| GeoHashError::GeometryParseError(e.to_string()))?;

    let geometry = match geojson {
        GeoJson::Geometry(geom) => geom,
        GeoJson::Feature(feat) => feat.geometry.ok_or_else(|| {
            GeoHashError::GeometryParseError("Feature has no geometry".to_string())
        })?,
        GeoJson::FeatureCollection(_) => {
            return Err(GeoHashError::GeometryParseError(
                "FeatureCollection not supported, use individual geometries".to_string(),
            ));
        }
    };

    Geometry::try_from(geometry).map_err(|e| GeoHashError::GeometryParseError(e.to_string()))
}

/// Parses a WKT string into a `geo_types::Geometry`.
pub fn parse_wkt(s: &str) -> Result<Geometry<f64>, GeoHashError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| GeoHashError::GeometryParseError(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        GeoHashError::GeometryParseError("Failed to convert WKT to geometry".to_string())
    })
}

pub fn polygon_to_wkt(polygon: &Polygon<f64>) -> String {
    polygon.wkt_string()
}

pub fn polygon_to_geojson(polygon: &Polygon<f64>) -> String {
    geojson::Geometry::from(polygon).to_string()
}
