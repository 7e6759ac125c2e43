/// Base-32 alphabet used for the textual geohash (no `a`, `i`, `l`, `o`).
pub const BASE32_ALPHABET: &[u8; 32] = b"0123456789bcdefghjkmnpqrstuvwxyz";

/// Number of bits carried by one geohash character.
pub const BITS_PER_CHAR: u32 = 5;

/// Default geohash length in characters, used by the command line encoder.
pub const DEFAULT_LENGTH: u32 = 8;

/// Latitude extent [min, max]
pub const LATITUDE_RANGE: [f64; 2] = [-90.0, 90.0];

/// Longitude extent [min, max]
pub const LONGITUDE_RANGE: [f64; 2] = [-180.0, 180.0];

/// Bit counts for the named precision tiers (low, mid, high).
pub const PRECISION_TIERS: [u32; 3] = [30, 40, 50];
