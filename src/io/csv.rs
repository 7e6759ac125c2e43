use crate::cell::GeoHash;
use crate::error::GeoHashError;
use crate::geom::{parse_geometry, polygon_to_geojson, polygon_to_wkt};
use crate::index::Precision;
use geo::Centroid;
use geo_types::{Geometry, Point};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

/// For the type of geometry source in the file
enum SourceIndices {
    Geometry(usize),
    Coordinates { lat_idx: usize, lon_idx: usize },
}

/// Output format for cell polygon geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Specifies how to extract location data from CSV rows.
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry in lon/lat
    GeometryColumn(String),
    /// Separate latitude and longitude columns
    CoordinateColumns {
        lat_column: String,
        lon_column: String,
    },
}

/// Configuration for CSV to geohash conversion.
#[derive(Debug, Clone)]
pub struct CsvGeoHashConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub precision: Precision,
    pub include_cell_geometry: Option<GeometryFormat>,
}

impl CsvGeoHashConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use geohash_grid::{CsvGeoHashConfig, Precision};
    ///
    /// let config = CsvGeoHashConfig::new("geometry", Precision::Low);
    /// ```
    pub fn new(geometry_column: impl Into<String>, precision: Precision) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            precision,
            include_cell_geometry: None,
        }
    }

    /// Create config for a CSV with separate latitude/longitude columns.
    ///
    /// # Example
    /// ```
    /// use geohash_grid::{CsvGeoHashConfig, Precision};
    ///
    /// let config = CsvGeoHashConfig::from_coords("Latitude", "Longitude", Precision::Mid);
    /// ```
    pub fn from_coords(
        lat_column: impl Into<String>,
        lon_column: impl Into<String>,
        precision: Precision,
    ) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lat_column: lat_column.into(),
                lon_column: lon_column.into(),
            },
            exclude_columns: Vec::new(),
            precision,
            include_cell_geometry: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    /// Include the cell polygon in the output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }
}

pub trait CsvToGeoHash {
    fn to_geohash_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvGeoHashConfig,
    ) -> Result<(), GeoHashError>;
}

impl<P: AsRef<Path>> CsvToGeoHash for P {
    fn to_geohash_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvGeoHashConfig,
    ) -> Result<(), GeoHashError> {
        csv_to_geohash_csv(self, output_path, config)
    }
}

/// Geohashes for a parsed geometry: points and vertices directly, polygons by
/// centroid. Duplicates are dropped, first occurrence wins.
fn geometry_to_geohashes(
    geom: Geometry<f64>,
    precision: Precision,
) -> Result<Vec<GeoHash>, GeoHashError> {
    let points: Vec<Point<f64>> = match geom {
        Geometry::Point(pt) => vec![pt],
        Geometry::MultiPoint(mp) => mp.0,
        Geometry::LineString(line) => line.points().collect(),
        Geometry::MultiLineString(mls) => mls.0.iter().flat_map(|l| l.points()).collect(),
        Geometry::Polygon(poly) => poly.centroid().into_iter().collect(),
        Geometry::MultiPolygon(mp) => mp.0.iter().filter_map(|p| p.centroid()).collect(),
        Geometry::GeometryCollection(gc) => {
            let mut all = Vec::new();
            for g in gc.0 {
                all.extend(geometry_to_geohashes(g, precision)?);
            }
            return Ok(dedup(all));
        }
        _ => {
            return Err(GeoHashError::GeometryParseError(
                "Unsupported geometry type".to_string(),
            ));
        }
    };

    let hashes = points
        .iter()
        .map(|pt| GeoHash::from_point(pt, precision))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(dedup(hashes))
}

fn dedup(hashes: Vec<GeoHash>) -> Vec<GeoHash> {
    let mut seen = HashSet::new();
    hashes
        .into_iter()
        .filter(|h| seen.insert(h.clone()))
        .collect()
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, GeoHashError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| GeoHashError::CsvError(format!("Column '{}' not found", name)))
}

fn parse_field(record: &csv::StringRecord, idx: usize, what: &str) -> Result<f64, GeoHashError> {
    let raw = record
        .get(idx)
        .ok_or_else(|| GeoHashError::CsvError(format!("Missing {} column at index {}", what, idx)))?
        .trim();
    raw.parse()
        .map_err(|_| GeoHashError::CsvError(format!("Invalid {}: '{}'", what, raw)))
}

/// Converts a CSV file with geometry or coordinate columns to a CSV file with geohashes.
///
/// Streams output to minimize memory usage for large files. The first output
/// column is `geohash`, followed by `cell_geometry` when requested, then the
/// remaining input columns.
///
/// # Example
///
/// ```no_run
/// use geohash_grid::{csv_to_geohash_csv, CsvGeoHashConfig, GeometryFormat, Precision};
///
/// let config = CsvGeoHashConfig::from_coords("lat", "lon", Precision::Mid)
///     .with_cell_geometry(GeometryFormat::Wkt);
///
/// csv_to_geohash_csv("stations.csv", "stations_geohash.csv", &config).unwrap();
/// ```
pub fn csv_to_geohash_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvGeoHashConfig,
) -> Result<(), GeoHashError> {
    let file = File::open(csv_path).map_err(|e| GeoHashError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| GeoHashError::CsvError(e.to_string()))?
        .clone();

    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = column_index(&headers, col)?;
            (SourceIndices::Geometry(idx), HashSet::from([idx]))
        }
        CoordinateSource::CoordinateColumns {
            lat_column,
            lon_column,
        } => {
            let lat_idx = column_index(&headers, lat_column)?;
            let lon_idx = column_index(&headers, lon_column)?;
            (
                SourceIndices::Coordinates { lat_idx, lon_idx },
                HashSet::from([lat_idx, lon_idx]),
            )
        }
    };

    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| GeoHashError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    let mut header_row: Vec<&str> = vec!["geohash"];
    if config.include_cell_geometry.is_some() {
        header_row.push("cell_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| GeoHashError::CsvError(e.to_string()))?;

    let mut rows_written = 0usize;
    for result in reader.records() {
        let record = result.map_err(|e| GeoHashError::CsvError(e.to_string()))?;

        let hashes = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom_str = record.get(*idx).ok_or_else(|| {
                    GeoHashError::CsvError(format!("Missing geometry column at index {}", idx))
                })?;
                geometry_to_geohashes(parse_geometry(geom_str)?, config.precision)?
            }
            SourceIndices::Coordinates { lat_idx, lon_idx } => {
                let lat = parse_field(&record, *lat_idx, "latitude")?;
                let lon = parse_field(&record, *lon_idx, "longitude")?;
                vec![GeoHash::from_coordinate(lat, lon, config.precision)?]
            }
        };

        for hash in hashes {
            let mut row: Vec<String> = vec![hash.geohash()];

            if let Some(format) = config.include_cell_geometry {
                let polygon = hash.to_polygon();
                row.push(match format {
                    GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                    GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
                });
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }
            writer
                .write_record(&row)
                .map_err(|e| GeoHashError::CsvError(e.to_string()))?;
            rows_written += 1;
        }
    }

    writer
        .flush()
        .map_err(|e| GeoHashError::CsvError(e.to_string()))?;
    log::debug!("wrote {} geohash rows", rows_written);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_input(dir: &Path, lines: &[&str]) -> Result<std::path::PathBuf, GeoHashError> {
        let path = dir.join("input.csv");
        let mut file = File::create(&path).map_err(|e| GeoHashError::IoError(e.to_string()))?;
        for line in lines {
            writeln!(file, "{}", line).map_err(|e| GeoHashError::IoError(e.to_string()))?;
        }
        Ok(path)
    }

    fn read_rows(path: &Path) -> Result<Vec<Vec<String>>, GeoHashError> {
        let mut reader =
            csv::Reader::from_path(path).map_err(|e| GeoHashError::CsvError(e.to_string()))?;
        let mut rows = vec![
            reader
                .headers()
                .map_err(|e| GeoHashError::CsvError(e.to_string()))?
                .iter()
                .map(String::from)
                .collect(),
        ];
        for record in reader.records() {
            let record = record.map_err(|e| GeoHashError::CsvError(e.to_string()))?;
            rows.push(record.iter().map(String::from).collect());
        }
        Ok(rows)
    }

    #[test]
    fn test_csv_from_coords() -> Result<(), GeoHashError> {
        let dir = tempdir().map_err(|e| GeoHashError::IoError(e.to_string()))?;
        let input = write_input(
            dir.path(),
            &[
                "StationCode,Name,Latitude,Longitude",
                "TYO,Tokyo Station,35.681382,139.766084",
            ],
        )?;
        let output = dir.path().join("output.csv");

        let config = CsvGeoHashConfig::from_coords("Latitude", "Longitude", Precision::Mid);
        csv_to_geohash_csv(&input, &output, &config)?;

        let rows = read_rows(&output)?;
        assert_eq!(rows[0], vec!["geohash", "StationCode", "Name"]);
        assert_eq!(rows[1], vec!["xn76urwe", "TYO", "Tokyo Station"]);
        Ok(())
    }

    #[test]
    fn test_csv_geometry_column_with_wkt_output() -> Result<(), GeoHashError> {
        let dir = tempdir().map_err(|e| GeoHashError::IoError(e.to_string()))?;
        let input = write_input(
            dir.path(),
            &[
                "ASSET_ID,TYPE,geometry,Geo Point",
                "CDT123,Pipe,\"{\"\"type\"\":\"\"Point\"\",\"\"coordinates\"\":[139.766084,35.681382]}\",x",
            ],
        )?;
        let output = dir.path().join("output.csv");

        let config = CsvGeoHashConfig::new("geometry", Precision::Low)
            .exclude(vec!["Geo Point".into()])
            .with_cell_geometry(GeometryFormat::Wkt);
        input.to_geohash_csv(&output, &config)?;

        let rows = read_rows(&output)?;
        assert_eq!(rows[0], vec!["geohash", "cell_geometry", "ASSET_ID", "TYPE"]);
        assert_eq!(rows[1][0], "xn76ur");
        assert!(rows[1][1].starts_with("POLYGON"));
        Ok(())
    }

    #[test]
    fn test_csv_linestring_emits_row_per_cell() -> Result<(), GeoHashError> {
        let dir = tempdir().map_err(|e| GeoHashError::IoError(e.to_string()))?;
        let input = write_input(
            dir.path(),
            &[
                "id,geometry",
                "1,\"LINESTRING(-0.1278 51.5074, -0.1279 51.5075, 2.3522 48.8566)\"",
            ],
        )?;
        let output = dir.path().join("output.csv");

        let config = CsvGeoHashConfig::new("geometry", Precision::exact(15)?);
        csv_to_geohash_csv(&input, &output, &config)?;

        let rows = read_rows(&output)?;
        // the first two vertices share a 3-character cell
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["gcp", "1"]);
        assert_eq!(rows[2], vec!["u09", "1"]);
        Ok(())
    }

    #[test]
    fn test_csv_missing_column() -> Result<(), GeoHashError> {
        let dir = tempdir().map_err(|e| GeoHashError::IoError(e.to_string()))?;
        let input = write_input(dir.path(), &["a,b", "1,2"])?;
        let output = dir.path().join("output.csv");

        let config = CsvGeoHashConfig::from_coords("lat", "lon", Precision::Mid);
        assert!(matches!(
            csv_to_geohash_csv(&input, &output, &config),
            Err(GeoHashError::CsvError(_))
        ));
        Ok(())
    }

    #[test]
    fn test_csv_out_of_range_row() -> Result<(), GeoHashError> {
        let dir = tempdir().map_err(|e| GeoHashError::IoError(e.to_string()))?;
        let input = write_input(dir.path(), &["lat,lon", "91.0,0.0"])?;
        let output = dir.path().join("output.csv");

        let config = CsvGeoHashConfig::from_coords("lat", "lon", Precision::Mid);
        assert!(matches!(
            csv_to_geohash_csv(&input, &output, &config),
            Err(GeoHashError::CoordinateOutOfRange { .. })
        ));
        Ok(())
    }
}
