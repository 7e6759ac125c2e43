use thiserror::Error;

/// Error type for geohash-grid operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoHashError {
    /// Latitude outside [-90, 90] or longitude outside [-180, 180].
    #[error("Coordinate out of range: latitude {latitude}, longitude {longitude}")]
    CoordinateOutOfRange { latitude: f64, longitude: f64 },
    /// A binary string contains something other than `0` or `1`.
    #[error("Invalid binary character {character:?} at position {position}")]
    InvalidBinaryCharacter { character: char, position: usize },
    /// The number of bits disagrees with the precision's bit count.
    #[error("Length mismatch: expected {expected} bits, got {actual}")]
    LengthMismatch { expected: u32, actual: usize },
    /// An exact precision whose bit count is not a multiple of 5.
    #[error("Invalid precision: {0} bits is not a multiple of 5")]
    InvalidPrecision(u32),
    /// A geohash string contains a character outside the base-32 alphabet.
    #[error("Invalid geohash character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
    /// The grid at this bit count has more cells than can be counted.
    #[error("Grid too large: {0} bits")]
    GridTooLarge(u32),
    /// A coordinate string is not formatted as `latitude,longitude`.
    #[error("Invalid coordinate format: {0}")]
    InvalidCoordinateFormat(String),
    /// File I/O or serialization error.
    #[error("IO error: {0}")]
    IoError(String),
    /// CSV parsing or reading error.
    #[error("CSV error: {0}")]
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    #[error("Geometry parse error: {0}")]
    GeometryParseError(String),
}
