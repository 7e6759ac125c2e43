use crate::error::GeoHashError;
use crate::index::constants::{BITS_PER_CHAR, PRECISION_TIERS};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Bit precision of a geohash.
///
/// The named tiers correspond to 6, 8 and 10 character geohashes. Any other
/// length goes through [`Precision::exact`], which only accepts bit counts
/// that fill whole characters.
///
/// Two precisions compare equal when they describe the same number of bits,
/// so `Precision::Mid == Precision::exact(40)?`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub enum Precision {
    /// 30 bits, 6 characters
    Low,
    /// 40 bits, 8 characters
    #[default]
    Mid,
    /// 50 bits, 10 characters
    High,
    /// Any multiple of 5 bits
    Exact(ExactBits),
}

/// A bit count known to be a multiple of [`BITS_PER_CHAR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ExactBits(u32);

impl ExactBits {
    pub fn new(bits: u32) -> Result<Self, GeoHashError> {
        if bits % BITS_PER_CHAR != 0 {
            return Err(GeoHashError::InvalidPrecision(bits));
        }
        Ok(Self(bits))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for ExactBits {
    type Error = GeoHashError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl From<ExactBits> for u32 {
    fn from(bits: ExactBits) -> Self {
        bits.0
    }
}

impl Precision {
    /// Creates a precision of exactly `bits` bits.
    ///
    /// # Example
    /// ```
    /// use geohash_grid::{GeoHashError, Precision};
    ///
    /// assert_eq!(Precision::exact(20)?.char_count(), 4);
    /// assert_eq!(Precision::exact(22), Err(GeoHashError::InvalidPrecision(22)));
    /// # Ok::<(), GeoHashError>(())
    /// ```
    pub fn exact(bits: u32) -> Result<Self, GeoHashError> {
        ExactBits::new(bits).map(Precision::Exact)
    }

    /// Precision for a geohash of `chars` characters.
    pub fn from_length(chars: u32) -> Result<Self, GeoHashError> {
        let bits = chars
            .checked_mul(BITS_PER_CHAR)
            .ok_or(GeoHashError::InvalidPrecision(u32::MAX))?;
        Self::exact(bits)
    }

    pub fn bit_count(&self) -> u32 {
        match self {
            Precision::Low => PRECISION_TIERS[0],
            Precision::Mid => PRECISION_TIERS[1],
            Precision::High => PRECISION_TIERS[2],
            Precision::Exact(bits) => bits.get(),
        }
    }

    pub fn char_count(&self) -> u32 {
        self.bit_count() / BITS_PER_CHAR
    }

    /// Bits assigned to latitude (odd positions).
    pub fn latitude_bit_count(&self) -> u32 {
        self.bit_count() / 2
    }

    /// Bits assigned to longitude (even positions).
    pub fn longitude_bit_count(&self) -> u32 {
        self.bit_count().div_ceil(2)
    }
}

impl PartialEq for Precision {
    fn eq(&self, other: &Self) -> bool {
        self.bit_count() == other.bit_count()
    }
}

impl Eq for Precision {}

impl Hash for Precision {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bit_count().hash(state);
    }
}
