use crate::cell::GeoHash;
use crate::coord::{clamp_latitude, normalize_longitude};
use serde::{Deserialize, Serialize};

/// Compass direction to an adjacent cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// `(latitude, longitude)` step multipliers.
    pub fn offsets(self) -> (f64, f64) {
        match self {
            Direction::North => (1.0, 0.0),
            Direction::NorthEast => (1.0, 1.0),
            Direction::East => (0.0, 1.0),
            Direction::SouthEast => (-1.0, 1.0),
            Direction::South => (-1.0, 0.0),
            Direction::SouthWest => (-1.0, -1.0),
            Direction::West => (0.0, -1.0),
            Direction::NorthWest => (1.0, -1.0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

/// The 8 cells around a geohash, at the same precision.
///
/// Latitude is clamped at the poles, so a cell touching a pole is its own
/// neighbour in that direction. Longitude wraps across the antimeridian.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Neighbors {
    pub north: GeoHash,
    pub north_east: GeoHash,
    pub east: GeoHash,
    pub south_east: GeoHash,
    pub south: GeoHash,
    pub south_west: GeoHash,
    pub west: GeoHash,
    pub north_west: GeoHash,
}

impl Neighbors {
    pub fn of(hash: &GeoHash) -> Self {
        let at = |direction| neighbor_of(hash, direction);
        Self {
            north: at(Direction::North),
            north_east: at(Direction::NorthEast),
            east: at(Direction::East),
            south_east: at(Direction::SouthEast),
            south: at(Direction::South),
            south_west: at(Direction::SouthWest),
            west: at(Direction::West),
            north_west: at(Direction::NorthWest),
        }
    }

    pub fn get(&self, direction: Direction) -> &GeoHash {
        match direction {
            Direction::North => &self.north,
            Direction::NorthEast => &self.north_east,
            Direction::East => &self.east,
            Direction::SouthEast => &self.south_east,
            Direction::South => &self.south,
            Direction::SouthWest => &self.south_west,
            Direction::West => &self.west,
            Direction::NorthWest => &self.north_west,
        }
    }

    /// Neighbours in order N, NE, E, SE, S, SW, W, NW.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, &GeoHash)> {
        Direction::ALL.into_iter().map(|d| (d, self.get(d)))
    }

    pub fn into_vec(self) -> Vec<GeoHash> {
        vec![
            self.north,
            self.north_east,
            self.east,
            self.south_east,
            self.south,
            self.south_west,
            self.west,
            self.north_west,
        ]
    }
}

/// Shifts the cell centre one cell in `direction` and re-encodes it.
pub(crate) fn neighbor_of(hash: &GeoHash, direction: Direction) -> GeoHash {
    let (lat_sign, lon_sign) = direction.offsets();
    let center = hash.center();

    let latitude = clamp_latitude(center.latitude + lat_sign * hash.latitude_step());
    let longitude = normalize_longitude(center.longitude + lon_sign * hash.longitude_step());

    GeoHash::encode(latitude, longitude, hash.precision())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeoHashError;
    use crate::index::Precision;

    #[test]
    fn test_neighbors_of_known_cell() -> Result<(), GeoHashError> {
        // 5-character cell in central London
        let hash = GeoHash::from_geohash("gcpvj")?;
        let n = hash.neighbors();

        assert_eq!(n.north.geohash(), "gcpvm");
        assert_eq!(n.north_east.geohash(), "gcpvq");
        assert_eq!(n.east.geohash(), "gcpvn");
        assert_eq!(n.south_east.geohash(), "gcpuy");
        assert_eq!(n.south.geohash(), "gcpuv");
        assert_eq!(n.south_west.geohash(), "gcpuu");
        assert_eq!(n.west.geohash(), "gcpvh");
        assert_eq!(n.north_west.geohash(), "gcpvk");
        Ok(())
    }

    #[test]
    fn test_neighbors_keep_precision() -> Result<(), GeoHashError> {
        let hash = GeoHash::from_coordinate(35.681382, 139.766084, Precision::Mid)?;
        for (_, neighbor) in hash.neighbors().iter() {
            assert_eq!(neighbor.precision(), Precision::Mid);
            assert_ne!(neighbor, &hash);
        }
        Ok(())
    }

    #[test]
    fn test_north_then_south_returns_home() -> Result<(), GeoHashError> {
        let hash = GeoHash::from_coordinate(-33.8688, 151.2093, Precision::Low)?;
        let back = hash.neighbor(Direction::North).neighbor(Direction::South);
        assert_eq!(back, hash);

        for d in Direction::ALL {
            assert_eq!(hash.neighbor(d).neighbor(d.opposite()), hash);
        }
        Ok(())
    }

    #[test]
    fn test_pole_clamps_instead_of_wrapping() -> Result<(), GeoHashError> {
        let top = GeoHash::from_coordinate(90.0, 10.0, Precision::Low)?;
        assert_eq!(top.neighbor(Direction::North), top);

        let bottom = GeoHash::from_coordinate(-90.0, 10.0, Precision::Low)?;
        assert_eq!(bottom.neighbor(Direction::South), bottom);
        Ok(())
    }

    #[test]
    fn test_antimeridian_wraps() -> Result<(), GeoHashError> {
        let east_edge = GeoHash::from_coordinate(0.0, 179.99, Precision::exact(20)?)?;
        let wrapped = east_edge.neighbor(Direction::East);
        assert!(wrapped.center().longitude < -179.0);

        let west_edge = GeoHash::from_coordinate(0.0, -179.99, Precision::exact(20)?)?;
        assert_eq!(west_edge.neighbor(Direction::West), east_edge);
        Ok(())
    }

    #[test]
    fn test_into_vec_order() -> Result<(), GeoHashError> {
        let hash = GeoHash::from_geohash("gcpvj")?;
        let n = hash.neighbors();
        let listed: Vec<GeoHash> = n.iter().map(|(_, g)| g.clone()).collect();
        assert_eq!(n.into_vec(), listed);
        Ok(())
    }
}
