//! Arbitrary-precision binary numbers used for numeric series evaluation.
//!
//! This module contains:
//! - `Binary`: exact `mantissa * 2^exponent` values with truncating division
//! - decimal rendering used when comparing digits against a reference string
//! - conversion from a decimal working precision to a binary one

mod binary_impl;
pub(crate) mod display;

pub use binary_impl::Binary;

/// Significant digits shown by `Display` when no precision is given.
pub const DEFAULT_DISPLAY_DIGITS: usize = 20;

/// Extra bits carried beyond the requested decimal precision so that truncation
/// errors accumulated over many series steps stay below the last shown digit.
pub const GUARD_BITS: u64 = 32;

/// Returns a binary working precision that resolves `digits` decimal digits.
///
/// Uses `log2(10) < 3.321929` in integer arithmetic, plus [`GUARD_BITS`].
pub fn bits_for_decimal_digits(digits: usize) -> u64 {
    let decimal = digits as u64;
    (decimal + 1).saturating_mul(3_321_929).div_ceil(1_000_000) + GUARD_BITS
}

impl Binary {
    /// Formats this value with `significant_digits` significant decimal digits.
    pub fn to_decimal_string(&self, significant_digits: usize) -> String {
        display::to_decimal_string(self, significant_digits)
    }
}
