use crate::coord::{Coordinate, GeoCoordinate, validate};
use crate::diagnostics::{Diagnostics, LogDiagnostics, report};
use crate::error::GeoHashError;
use crate::geom::BoundingBox;
use crate::index::{Precision, bits_to_string, decode_bounds, encode_bits, string_to_bits};
use crate::neighbor::{Direction, Neighbors, neighbor_of};
use geo_types::{Polygon, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A geohash: a run of interleaved longitude/latitude bits at a fixed precision.
///
/// The bit sequence always has exactly `precision.bit_count()` bits. Values are
/// immutable; operations such as [`GeoHash::neighbors`] return new values.
///
/// # Example
///
/// ```
/// use geohash_grid::{GeoHash, GeoHashError, Precision};
///
/// # fn main() -> Result<(), GeoHashError> {
/// let hash = GeoHash::from_coordinate(35.681382, 139.766084, Precision::Mid)?;
/// assert_eq!(hash.geohash(), "xn76urwe");
///
/// let restored = GeoHash::from_geohash("xn76urwe")?;
/// assert_eq!(hash, restored);
///
/// let polygon = hash.to_polygon();
/// assert_eq!(polygon.exterior().coords().count(), 5);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GeoHash {
    precision: Precision,
    bits: Vec<bool>,
}

impl GeoHash {
    /// Create a GeoHash from a string of `0` and `1` characters.
    ///
    /// # Example
    /// ```
    /// use geohash_grid::{GeoHash, Precision};
    ///
    /// # fn main() -> Result<(), geohash_grid::GeoHashError> {
    /// let hash = GeoHash::from_binary("01101010011010100110", Precision::exact(20)?)?;
    /// assert_eq!(hash.geohash(), "e9p6");
    /// assert_eq!(hash.latitude_bits(), "1000100010");
    /// assert_eq!(hash.longitude_bits(), "0111011101");
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_binary(binary: &str, precision: Precision) -> Result<Self, GeoHashError> {
        Self::from_binary_with_diagnostics(binary, precision, &LogDiagnostics)
    }

    pub fn from_binary_with_diagnostics(
        binary: &str,
        precision: Precision,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Self, GeoHashError> {
        report(
            diagnostics,
            "from_binary",
            binary,
            parse_binary(binary).and_then(|bits| Self::from_bits(bits, precision)),
        )
    }

    /// Create a GeoHash from raw bits. The length must match the precision.
    pub fn from_bits(bits: Vec<bool>, precision: Precision) -> Result<Self, GeoHashError> {
        let expected = precision.bit_count();
        if bits.len() != expected as usize {
            return Err(GeoHashError::LengthMismatch {
                expected,
                actual: bits.len(),
            });
        }
        Ok(Self { precision, bits })
    }

    /// Create a GeoHash from WGS84 latitude/longitude in degrees.
    pub fn from_coordinate(
        latitude: f64,
        longitude: f64,
        precision: Precision,
    ) -> Result<Self, GeoHashError> {
        validate(latitude, longitude)?;
        Ok(Self::encode(latitude, longitude, precision))
    }

    /// Create a GeoHash from any [`Coordinate`], e.g. a `geo_types::Point`
    /// with x = longitude and y = latitude.
    pub fn from_point<C: Coordinate>(coord: &C, precision: Precision) -> Result<Self, GeoHashError> {
        Self::from_coordinate(coord.latitude(), coord.longitude(), precision)
    }

    /// Create a GeoHash from its textual form. The precision is five bits per
    /// character.
    pub fn from_geohash(code: &str) -> Result<Self, GeoHashError> {
        Self::from_geohash_with_diagnostics(code, None, &LogDiagnostics)
    }

    /// Like [`GeoHash::from_geohash`] but the string must describe exactly
    /// `precision` bits.
    pub fn from_geohash_with_precision(
        code: &str,
        precision: Precision,
    ) -> Result<Self, GeoHashError> {
        Self::from_geohash_with_diagnostics(code, Some(precision), &LogDiagnostics)
    }

    pub fn from_geohash_with_diagnostics(
        code: &str,
        precision: Option<Precision>,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Self, GeoHashError> {
        let result = precision
            .map_or_else(|| text_precision(code), Ok)
            .and_then(|precision| {
                let bits = string_to_bits(code, precision.bit_count())?;
                Ok(Self { precision, bits })
            });
        report(diagnostics, "from_geohash", code, result)
    }

    /// Encodes a coordinate already known to be in range.
    pub(crate) fn encode(latitude: f64, longitude: f64, precision: Precision) -> Self {
        Self {
            precision,
            bits: encode_bits(latitude, longitude, precision.bit_count()),
        }
    }

    /// Wraps bits whose length is already `precision.bit_count()`.
    pub(crate) fn from_bits_unchecked(bits: Vec<bool>, precision: Precision) -> Self {
        debug_assert_eq!(bits.len(), precision.bit_count() as usize);
        Self { precision, bits }
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// The bits as a string of `0` and `1`.
    pub fn binary(&self) -> String {
        self.bits.iter().map(|&b| bit_char(b)).collect()
    }

    /// Odd-indexed bits, in order.
    pub fn latitude_bits(&self) -> String {
        self.bits.iter().skip(1).step_by(2).map(|&b| bit_char(b)).collect()
    }

    /// Even-indexed bits, in order.
    pub fn longitude_bits(&self) -> String {
        self.bits.iter().step_by(2).map(|&b| bit_char(b)).collect()
    }

    /// The base-32 textual code.
    pub fn geohash(&self) -> String {
        bits_to_string(&self.bits)
    }

    /// Centre of the cell.
    pub fn center(&self) -> GeoCoordinate {
        let (latitude, longitude) = decode_bounds(&self.bits).center();
        GeoCoordinate::corner(latitude, longitude)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_bounds(&decode_bounds(&self.bits))
    }

    /// Cell height in degrees of latitude.
    pub fn latitude_step(&self) -> f64 {
        180.0 / 2f64.powi(self.precision.latitude_bit_count() as i32)
    }

    /// Cell width in degrees of longitude.
    pub fn longitude_step(&self) -> f64 {
        360.0 / 2f64.powi(self.precision.longitude_bit_count() as i32)
    }

    /// The 8 surrounding cells at the same precision.
    pub fn neighbors(&self) -> Neighbors {
        Neighbors::of(self)
    }

    pub fn neighbor(&self, direction: Direction) -> GeoHash {
        neighbor_of(self, direction)
    }

    /// True if `other` lies inside this cell, i.e. this geohash is a prefix of
    /// `other`'s bits.
    pub fn contains(&self, other: &GeoHash) -> bool {
        other.bits.starts_with(&self.bits)
    }

    /// Convert the cell to a polygon for GIS operations (x = longitude, y = latitude).
    pub fn to_polygon(&self) -> Polygon<f64> {
        self.bounding_box().to_polygon()
    }

    pub fn to_rect(&self) -> Rect<f64> {
        self.bounding_box().to_rect()
    }
}

fn bit_char(bit: bool) -> char {
    if bit { '1' } else { '0' }
}

fn parse_binary(binary: &str) -> Result<Vec<bool>, GeoHashError> {
    binary
        .chars()
        .enumerate()
        .map(|(position, c)| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            character => Err(GeoHashError::InvalidBinaryCharacter {
                character,
                position,
            }),
        })
        .collect()
}

fn text_precision(code: &str) -> Result<Precision, GeoHashError> {
    let chars = u32::try_from(code.chars().count())
        .map_err(|_| GeoHashError::InvalidPrecision(u32::MAX))?;
    Precision::from_length(chars)
}

impl fmt::Display for GeoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.geohash())
    }
}

impl FromStr for GeoHash {
    type Err = GeoHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_geohash(s)
    }
}

impl TryFrom<String> for GeoHash {
    type Error = GeoHashError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        Self::from_geohash(&code)
    }
}

impl From<GeoHash> for String {
    fn from(hash: GeoHash) -> Self {
        hash.geohash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostic;
    use geo_types::point;
    use std::cell::Cell;

    #[test]
    fn test_from_coordinate_tokyo() -> Result<(), GeoHashError> {
        let hash = GeoHash::from_coordinate(35.681382, 139.766084, Precision::Mid)?;
        assert_eq!(hash.binary(), "1110110100001110011011010101111110001101");
        assert_eq!(hash.geohash(), "xn76urwe");
        assert_eq!(hash.precision().bit_count(), 40);
        Ok(())
    }

    #[test]
    fn test_from_point_matches_from_coordinate() -> Result<(), GeoHashError> {
        let pt = point! { x: 139.766084, y: 35.681382 };
        assert_eq!(
            GeoHash::from_point(&pt, Precision::High)?,
            GeoHash::from_coordinate(35.681382, 139.766084, Precision::High)?
        );
        Ok(())
    }

    #[test]
    fn test_from_binary_axis_bits() -> Result<(), GeoHashError> {
        let hash = GeoHash::from_binary("01101010011010100110", Precision::exact(20)?)?;
        assert_eq!(hash.geohash(), "e9p6");
        assert_eq!(hash.latitude_bits(), "1000100010");
        assert_eq!(hash.longitude_bits(), "0111011101");
        Ok(())
    }

    #[test]
    fn test_from_binary_rejects_bad_characters() -> Result<(), GeoHashError> {
        assert_eq!(
            GeoHash::from_binary("01201", Precision::exact(5)?),
            Err(GeoHashError::InvalidBinaryCharacter {
                character: '2',
                position: 2
            })
        );
        Ok(())
    }

    #[test]
    fn test_from_binary_rejects_length_mismatch() {
        assert_eq!(
            GeoHash::from_binary("0110", Precision::Low),
            Err(GeoHashError::LengthMismatch {
                expected: 30,
                actual: 4
            })
        );
    }

    #[test]
    fn test_out_of_range_coordinates() {
        assert!(matches!(
            GeoHash::from_coordinate(91.0, 0.0, Precision::Mid),
            Err(GeoHashError::CoordinateOutOfRange { .. })
        ));
        assert!(matches!(
            GeoHash::from_coordinate(0.0, 200.0, Precision::Mid),
            Err(GeoHashError::CoordinateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_from_geohash_rejects_excluded_letters() {
        for code in ["xn7a", "xn7i", "xn7l", "xn7o"] {
            assert!(matches!(
                GeoHash::from_geohash(code),
                Err(GeoHashError::InvalidCharacter { position: 3, .. })
            ));
        }
    }

    #[test]
    fn test_from_geohash_with_precision() -> Result<(), GeoHashError> {
        let hash = GeoHash::from_geohash_with_precision("xn76ur", Precision::Low)?;
        assert_eq!(hash.precision(), Precision::Low);
        assert!(matches!(
            GeoHash::from_geohash_with_precision("xn76ur", Precision::Mid),
            Err(GeoHashError::LengthMismatch {
                expected: 40,
                actual: 30
            })
        ));
        Ok(())
    }

    #[test]
    fn test_uppercase_geohash_accepted() -> Result<(), GeoHashError> {
        assert_eq!(GeoHash::from_geohash("XN76URWE")?.geohash(), "xn76urwe");
        Ok(())
    }

    #[test]
    fn test_diagnostics_receive_rejections() {
        let count = Cell::new(0);
        let sink = |d: &Diagnostic<'_>| {
            assert_eq!(d.operation, "from_geohash");
            count.set(count.get() + 1);
        };

        let bad = GeoHash::from_geohash_with_diagnostics("abc", None, &sink);
        assert!(bad.is_err());
        let good = GeoHash::from_geohash_with_diagnostics("bcd", None, &sink);
        assert!(good.is_ok());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_center_is_bounding_box_midpoint() -> Result<(), GeoHashError> {
        let hash = GeoHash::from_coordinate(-33.8688, 151.2093, Precision::Low)?;
        let center = hash.center();
        let bbox = hash.bounding_box();
        let mean_lat = bbox.corners().iter().map(|c| c.latitude).sum::<f64>() / 4.0;
        let mean_lon = bbox.corners().iter().map(|c| c.longitude).sum::<f64>() / 4.0;

        assert!((center.latitude - mean_lat).abs() < 1e-12);
        assert!((center.longitude - mean_lon).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_bounding_box_contains_source_point() -> Result<(), GeoHashError> {
        let hash = GeoHash::from_coordinate(51.5074, -0.1278, Precision::exact(25)?)?;
        assert!(hash.bounding_box().contains(51.5074, -0.1278));
        Ok(())
    }

    #[test]
    fn test_zero_bit_geohash_is_world() -> Result<(), GeoHashError> {
        let hash = GeoHash::from_binary("", Precision::exact(0)?)?;
        let bbox = hash.bounding_box();
        assert_eq!(hash.geohash(), "");
        assert_eq!(bbox.max_latitude(), 90.0);
        assert_eq!(bbox.min_latitude(), -90.0);
        assert_eq!(bbox.min_longitude(), -180.0);
        assert_eq!(bbox.max_longitude(), 180.0);
        Ok(())
    }

    #[test]
    fn test_prefix_containment() -> Result<(), GeoHashError> {
        let coarse = GeoHash::from_geohash("xn76")?;
        let fine = GeoHash::from_geohash("xn76urwe")?;
        assert!(coarse.contains(&fine));
        assert!(!fine.contains(&coarse));
        Ok(())
    }

    #[test]
    fn test_serde_uses_textual_form() -> Result<(), GeoHashError> {
        let hash = GeoHash::from_geohash("e9p6")?;
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, "\"e9p6\"");

        let back: GeoHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
        assert!(serde_json::from_str::<GeoHash>("\"e9pa\"").is_err());
        Ok(())
    }

    #[test]
    fn test_display_and_from_str() -> Result<(), GeoHashError> {
        let hash: GeoHash = "u4pruydqqvj".parse()?;
        assert_eq!(hash.to_string(), "u4pruydqqvj");
        assert_eq!(hash.precision().bit_count(), 55);
        Ok(())
    }
}
