//! # geohash-grid
//!
//! Geohash encoding and decoding over WGS84 coordinates, with cell bounding
//! boxes, neighbours and full-globe grid enumeration.
//!
//! ### 1. `GeoHash` - Single Cell Operations
//!
//! ```
//! use geohash_grid::{GeoHash, Precision};
//!
//! # fn main() -> Result<(), geohash_grid::GeoHashError> {
//! let hash = GeoHash::from_coordinate(35.681382, 139.766084, Precision::Mid)?;
//! println!("{}", hash);
//!
//! let bbox = hash.bounding_box();
//! let north = hash.neighbors().north;
//! assert!(north.center().latitude > bbox.max_latitude());
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `GeoHashGrid` - Collections of Cells
//!
//! ```
//! use geohash_grid::{GeoHashGrid, Precision};
//!
//! # fn main() -> Result<(), geohash_grid::GeoHashError> {
//! let grid = GeoHashGrid::builder()
//!     .precision(Precision::exact(20)?)
//!     .extent(-0.2, 51.45, 0.0, 51.55)
//!     .build()?;
//!
//! for hash in grid.geohashes() {
//!     println!("{}", hash);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToGeoHash` - CSV File Conversion
//!
//! ```no_run
//! use geohash_grid::{CsvToGeoHash, CsvGeoHashConfig, GeometryFormat, Precision};
//!
//! let config = CsvGeoHashConfig::new("geometry", Precision::Low)
//!     .exclude(vec!["Geo Point".into()])
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! "input.csv".to_geohash_csv("output.csv", &config).unwrap();
//! ```
//!

pub mod cell;
pub mod coord;
pub mod diagnostics;
pub mod error;
pub mod geom;
pub mod grid;
pub mod index;
pub mod io;
pub mod neighbor;

pub use cell::GeoHash;
pub use coord::{Coordinate, GeoCoordinate, clamp_latitude, normalize_longitude};
pub use diagnostics::{Diagnostic, Diagnostics, LogDiagnostics, NoopDiagnostics};
pub use error::GeoHashError;
pub use geom::{BoundingBox, parse_geojson, parse_geometry, parse_wkt};
pub use grid::{GeoHashGrid, GeoHashGridBuilder, GridCells, all_cells};
pub use index::{
    BASE32_ALPHABET, BITS_PER_CHAR, CellBounds, DEFAULT_LENGTH, ExactBits, Precision,
    bits_to_string, decode_bounds, decode_center, decode_char, encode_5bits, encode_bits,
    string_to_bits,
};
pub use io::{
    CoordinateSource, CsvGeoHashConfig, CsvToGeoHash, GeoHashesToArrow, GeoHashesToGeoParquet,
    GeometryFormat, csv_to_geohash_csv, write_geoparquet,
};
pub use neighbor::{Direction, Neighbors};

pub use geo_types;
pub use geoarrow_array;
pub use geoarrow_schema;
pub use geoparquet;
