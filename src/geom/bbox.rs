use crate::coord::{GeoCoordinate, clamp_latitude, normalize_longitude};
use crate::index::CellBounds;
use geo_types::{Coord, LineString, Polygon, Rect};
use serde::{Deserialize, Serialize};

/// The rectangle covered by one geohash cell.
///
/// Corners are kept in a fixed order: top-left, top-right, bottom-right,
/// bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top_left: GeoCoordinate,
    pub top_right: GeoCoordinate,
    pub bottom_right: GeoCoordinate,
    pub bottom_left: GeoCoordinate,
}

impl BoundingBox {
    /// Builds the box for a decoded cell, clamping latitude to the poles and
    /// wrapping longitude into [-180, 180].
    pub fn from_bounds(bounds: &CellBounds) -> Self {
        let max_lat = clamp_latitude(bounds.max_lat);
        let min_lat = clamp_latitude(bounds.min_lat);
        let min_lon = normalize_longitude(bounds.min_lon);
        let max_lon = normalize_longitude(bounds.max_lon);
        Self::from_edges(max_lat, min_lat, min_lon, max_lon)
    }

    pub(crate) fn from_edges(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top_left: GeoCoordinate::corner(top, left),
            top_right: GeoCoordinate::corner(top, right),
            bottom_right: GeoCoordinate::corner(bottom, right),
            bottom_left: GeoCoordinate::corner(bottom, left),
        }
    }

    pub fn corners(&self) -> [GeoCoordinate; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    pub fn min_latitude(&self) -> f64 {
        self.bottom_left.latitude
    }

    pub fn max_latitude(&self) -> f64 {
        self.top_left.latitude
    }

    pub fn min_longitude(&self) -> f64 {
        self.top_left.longitude
    }

    pub fn max_longitude(&self) -> f64 {
        self.top_right.longitude
    }

    pub fn center(&self) -> GeoCoordinate {
        GeoCoordinate::corner(
            (self.min_latitude() + self.max_latitude()) / 2.0,
            (self.min_longitude() + self.max_longitude()) / 2.0,
        )
    }

    /// Half-open containment: the top and right edges belong to the next cell,
    /// except on the north pole and the antimeridian.
    pub fn contains(&self, latitude: f64, longitude: f64) -> bool {
        let lat_ok = latitude >= self.min_latitude()
            && (latitude < self.max_latitude()
                || (latitude == self.max_latitude() && self.max_latitude() == 90.0));
        let lon_ok = longitude >= self.min_longitude()
            && (longitude < self.max_longitude()
                || (longitude == self.max_longitude() && self.max_longitude() == 180.0));
        lat_ok && lon_ok
    }

    /// The box as a `geo_types::Rect` with x = longitude, y = latitude.
    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            Coord {
                x: self.min_longitude(),
                y: self.min_latitude(),
            },
            Coord {
                x: self.max_longitude(),
                y: self.max_latitude(),
            },
        )
    }

    /// Closed polygon ring through the four corners, starting top-left.
    pub fn to_polygon(&self) -> Polygon<f64> {
        let mut coords: Vec<Coord<f64>> = self
            .corners()
            .iter()
            .map(|c| Coord {
                x: c.longitude,
                y: c.latitude,
            })
            .collect();
        coords.push(coords[0]);

        Polygon::new(LineString::from(coords), vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_world_box() {
        let bbox = BoundingBox::from_bounds(&CellBounds::WORLD);
        assert_eq!(bbox.top_left, GeoCoordinate::corner(90.0, -180.0));
        assert_eq!(bbox.top_right, GeoCoordinate::corner(90.0, 180.0));
        assert_eq!(bbox.bottom_right, GeoCoordinate::corner(-90.0, 180.0));
        assert_eq!(bbox.bottom_left, GeoCoordinate::corner(-90.0, -180.0));
    }

    #[test]
    fn test_from_bounds_clamps_and_wraps() {
        let bounds = CellBounds {
            min_lat: -91.0,
            max_lat: 92.0,
            min_lon: 185.0,
            max_lon: 190.0,
        };
        let bbox = BoundingBox::from_bounds(&bounds);
        assert_eq!(bbox.max_latitude(), 90.0);
        assert_eq!(bbox.min_latitude(), -90.0);
        assert_eq!(bbox.min_longitude(), -175.0);
        assert_eq!(bbox.max_longitude(), -170.0);
    }

    #[test]
    fn test_polygon_is_closed() {
        let bbox = BoundingBox::from_edges(10.0, 0.0, 0.0, 20.0);
        let polygon = bbox.to_polygon();
        let exterior = polygon.exterior();
        assert_eq!(exterior.coords().count(), 5);
        assert_eq!(exterior.0[0], exterior.0[4]);
    }

    #[test]
    fn test_to_rect() {
        let rect = BoundingBox::from_edges(10.0, 0.0, -5.0, 20.0).to_rect();
        assert_eq!(rect.min(), Coord { x: -5.0, y: 0.0 });
        assert_eq!(rect.max(), Coord { x: 20.0, y: 10.0 });
    }

    #[test]
    fn test_contains_is_half_open() {
        let bbox = BoundingBox::from_edges(10.0, 0.0, 0.0, 20.0);
        assert!(bbox.contains(0.0, 0.0));
        assert!(bbox.contains(5.0, 19.999));
        assert!(!bbox.contains(10.0, 5.0));
        assert!(!bbox.contains(5.0, 20.0));

        let pole = BoundingBox::from_edges(90.0, 45.0, 90.0, 180.0);
        assert!(pole.contains(90.0, 180.0));
    }
}
