use crate::error::GeoHashError;
use crate::index::constants::{BASE32_ALPHABET, BITS_PER_CHAR};

/// Returns the 5-bit value of a geohash character. Upper case is accepted.
pub fn decode_char(c: char) -> Result<u8, GeoHashError> {
    let lower = c.to_ascii_lowercase();
    BASE32_ALPHABET
        .iter()
        .position(|&b| b as char == lower)
        .map(|idx| idx as u8)
        .ok_or(GeoHashError::InvalidCharacter {
            character: c,
            position: 0,
        })
}

/// Maps a value in `0..32` to its geohash character.
pub fn encode_5bits(value: u8) -> char {
    debug_assert!(value < 32, "5-bit value out of range: {value}");
    BASE32_ALPHABET[(value & 0x1f) as usize] as char
}

/// Packs bits into geohash characters, most significant bit first.
///
/// A trailing group shorter than 5 bits is left-justified and zero padded.
///
/// # Example
/// ```
/// use geohash_grid::bits_to_string;
///
/// let bits: Vec<bool> = "01101010011010100110".chars().map(|c| c == '1').collect();
/// assert_eq!(bits_to_string(&bits), "e9p6");
/// ```
pub fn bits_to_string(bits: &[bool]) -> String {
    bits.chunks(BITS_PER_CHAR as usize)
        .map(|chunk| {
            let value = chunk
                .iter()
                .fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit));
            encode_5bits(value << (BITS_PER_CHAR as usize - chunk.len()))
        })
        .collect()
}

/// Unpacks a geohash string into bits, 5 per character.
///
/// The result must be exactly `target_bit_count` long.
pub fn string_to_bits(s: &str, target_bit_count: u32) -> Result<Vec<bool>, GeoHashError> {
    let mut bits = Vec::with_capacity(s.len() * BITS_PER_CHAR as usize);

    for (position, c) in s.chars().enumerate() {
        let value = decode_char(c).map_err(|_| GeoHashError::InvalidCharacter {
            character: c,
            position,
        })?;
        for shift in (0..BITS_PER_CHAR).rev() {
            bits.push((value >> shift) & 1 == 1);
        }
    }

    if bits.len() != target_bit_count as usize {
        return Err(GeoHashError::LengthMismatch {
            expected: target_bit_count,
            actual: bits.len(),
        });
    }

    Ok(bits)
}
