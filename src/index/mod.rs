pub mod base32;
pub mod constants;
mod precision;
mod quantize;

pub use base32::{bits_to_string, decode_char, encode_5bits, string_to_bits};
pub use constants::{
    BASE32_ALPHABET, BITS_PER_CHAR, DEFAULT_LENGTH, LATITUDE_RANGE, LONGITUDE_RANGE,
    PRECISION_TIERS,
};
pub use precision::{ExactBits, Precision};
pub use quantize::{Axis, CellBounds, decode_bounds, decode_center, encode_bits};
