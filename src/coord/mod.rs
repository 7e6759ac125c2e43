use crate::error::GeoHashError;
use crate::index::{LATITUDE_RANGE, LONGITUDE_RANGE};
use geo_types::{Coord, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Trait for types that can provide a latitude/longitude pair.
///
/// Implemented for [`GeoCoordinate`] and for `geo_types` points and coords,
/// where `x` is longitude and `y` is latitude.
pub trait Coordinate {
    /// Returns the latitude in degrees.
    fn latitude(&self) -> f64;
    /// Returns the longitude in degrees.
    fn longitude(&self) -> f64;
}

impl Coordinate for Point<f64> {
    fn latitude(&self) -> f64 {
        self.y()
    }
    fn longitude(&self) -> f64 {
        self.x()
    }
}

impl Coordinate for Coord<f64> {
    fn latitude(&self) -> f64 {
        self.y
    }
    fn longitude(&self) -> f64 {
        self.x
    }
}

impl Coordinate for GeoCoordinate {
    fn latitude(&self) -> f64 {
        self.latitude
    }
    fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// A WGS84 latitude/longitude pair in degrees.
///
/// Values built with [`GeoCoordinate::new`] are always inside
/// `[-90, 90] x [-180, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    /// Creates a coordinate, rejecting values outside the valid ranges.
    ///
    /// # Example
    /// ```
    /// use geohash_grid::{GeoCoordinate, GeoHashError};
    ///
    /// let tokyo = GeoCoordinate::new(35.681382, 139.766084)?;
    /// assert_eq!(tokyo.latitude, 35.681382);
    /// assert!(GeoCoordinate::new(91.0, 0.0).is_err());
    /// # Ok::<(), GeoHashError>(())
    /// ```
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, GeoHashError> {
        validate(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Builds a cell corner without range checks. Only for values that came
    /// out of [`clamp_latitude`] and [`normalize_longitude`].
    pub(crate) fn corner(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl From<GeoCoordinate> for Point<f64> {
    fn from(c: GeoCoordinate) -> Self {
        c.to_point()
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Parses `"<latitude>,<longitude>"`. Exactly two numeric fields are accepted.
impl FromStr for GeoCoordinate {
    type Err = GeoHashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        let [lat_str, lon_str] = fields.as_slice() else {
            return Err(GeoHashError::InvalidCoordinateFormat(format!(
                "expected 'latitude,longitude', got '{}'",
                s
            )));
        };

        let latitude: f64 = lat_str.parse().map_err(|_| {
            GeoHashError::InvalidCoordinateFormat(format!("Invalid latitude: '{}'", lat_str))
        })?;
        let longitude: f64 = lon_str.parse().map_err(|_| {
            GeoHashError::InvalidCoordinateFormat(format!("Invalid longitude: '{}'", lon_str))
        })?;

        Self::new(latitude, longitude)
    }
}

/// Checks both values against their closed ranges. NaN is out of range.
pub fn validate(latitude: f64, longitude: f64) -> Result<(), GeoHashError> {
    let lat_ok = (LATITUDE_RANGE[0]..=LATITUDE_RANGE[1]).contains(&latitude);
    let lon_ok = (LONGITUDE_RANGE[0]..=LONGITUDE_RANGE[1]).contains(&longitude);
    if lat_ok && lon_ok {
        Ok(())
    } else {
        Err(GeoHashError::CoordinateOutOfRange {
            latitude,
            longitude,
        })
    }
}

/// Clamps latitude into [-90, 90]. Poles do not wrap.
pub fn clamp_latitude(latitude: f64) -> f64 {
    latitude.clamp(LATITUDE_RANGE[0], LATITUDE_RANGE[1])
}

/// Wraps longitude into [-180, 180] by whole turns.
pub fn normalize_longitude(longitude: f64) -> f64 {
    let mut lon = longitude;
    while lon > LONGITUDE_RANGE[1] {
        lon -= 360.0;
    }
    while lon < LONGITUDE_RANGE[0] {
        lon += 360.0;
    }
    lon
}
