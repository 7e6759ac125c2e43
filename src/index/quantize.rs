use crate::index::constants::{LATITUDE_RANGE, LONGITUDE_RANGE};

/// The axis a bit position refines. Even positions are longitude, odd are latitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Longitude,
    Latitude,
}

impl Axis {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Axis::Longitude
        } else {
            Axis::Latitude
        }
    }
}

/// The latitude/longitude interval left after bisecting on a bit sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl CellBounds {
    /// The whole globe, before any bit has been applied.
    pub const WORLD: CellBounds = CellBounds {
        min_lat: LATITUDE_RANGE[0],
        max_lat: LATITUDE_RANGE[1],
        min_lon: LONGITUDE_RANGE[0],
        max_lon: LONGITUDE_RANGE[1],
    };

    pub fn midpoint(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Longitude => (self.min_lon + self.max_lon) / 2.0,
            Axis::Latitude => (self.min_lat + self.max_lat) / 2.0,
        }
    }

    /// Keeps the upper half of `axis` when `bit` is set, the lower half otherwise.
    pub fn bisect(&mut self, axis: Axis, bit: bool) {
        let mid = self.midpoint(axis);
        match (axis, bit) {
            (Axis::Longitude, true) => self.min_lon = mid,
            (Axis::Longitude, false) => self.max_lon = mid,
            (Axis::Latitude, true) => self.min_lat = mid,
            (Axis::Latitude, false) => self.max_lat = mid,
        }
    }

    /// Centre of the cell as `(latitude, longitude)`.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}

/// Quantizes a coordinate into `bit_count` interleaved bits, longitude first.
///
/// The caller is responsible for the coordinate being in range.
pub fn encode_bits(latitude: f64, longitude: f64, bit_count: u32) -> Vec<bool> {
    let mut bounds = CellBounds::WORLD;
    let mut bits = Vec::with_capacity(bit_count as usize);

    for index in 0..bit_count as usize {
        let axis = Axis::for_index(index);
        let value = match axis {
            Axis::Longitude => longitude,
            Axis::Latitude => latitude,
        };
        let bit = value >= bounds.midpoint(axis);
        bounds.bisect(axis, bit);
        bits.push(bit);
    }

    bits
}

/// Replays the bisection for `bits` and returns the resulting cell.
pub fn decode_bounds(bits: &[bool]) -> CellBounds {
    let mut bounds = CellBounds::WORLD;
    for (index, &bit) in bits.iter().enumerate() {
        bounds.bisect(Axis::for_index(index), bit);
    }
    bounds
}

/// Centre of the cell described by `bits`, as `(latitude, longitude)`.
pub fn decode_center(bits: &[bool]) -> (f64, f64) {
    decode_bounds(bits).center()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_string(bits: &[bool]) -> String {
        bits.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }

    #[test]
    fn test_encode_tokyo_station() {
        let bits = encode_bits(35.681382, 139.766084, 40);
        assert_eq!(
            to_string(&bits),
            "1110110100001110011011010101111110001101"
        );
    }

    #[test]
    fn test_encode_extremes() {
        assert_eq!(to_string(&encode_bits(90.0, 180.0, 10)), "1111111111");
        assert_eq!(to_string(&encode_bits(-90.0, -180.0, 10)), "0000000000");
    }

    #[test]
    fn test_decode_contains_original() {
        let (lat, lon) = (35.681382, 139.766084);
        let bounds = decode_bounds(&encode_bits(lat, lon, 40));

        assert!(bounds.min_lat <= lat && lat < bounds.max_lat);
        assert!(bounds.min_lon <= lon && lon < bounds.max_lon);
        assert_eq!(bounds.height(), 180.0 / 2f64.powi(20));
        assert_eq!(bounds.width(), 360.0 / 2f64.powi(20));
    }

    #[test]
    fn test_decode_center_reencodes_to_same_bits() {
        let bits = encode_bits(-33.8688, 151.2093, 35);
        let (lat, lon) = decode_center(&bits);
        assert_eq!(encode_bits(lat, lon, 35), bits);
    }

    #[test]
    fn test_zero_bits_is_world() {
        assert_eq!(decode_bounds(&[]), CellBounds::WORLD);
        assert_eq!(decode_center(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_odd_bit_count_splits_longitude_more() {
        let bounds = decode_bounds(&[true]);
        assert_eq!(bounds.min_lon, 0.0);
        assert_eq!(bounds.max_lon, 180.0);
        assert_eq!(bounds.height(), 180.0);
    }
}
