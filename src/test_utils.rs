//! Shared test utilities.
//!
//! Helpers for building binary values and arctangent terms tersely inside test
//! modules, plus a tolerance assertion for `f64` cross-checks.

#![allow(clippy::panic)]

use num_bigint::BigInt;

use crate::arctan::ArctanTerm;
use crate::binary::Binary;

/// Creates a Binary from mantissa and exponent as i64 values.
///
/// # Examples
/// ```ignore
/// let two = bin(2, 0);      // 2 * 2^0 = 2
/// let half = bin(1, -1);    // 1 * 2^(-1) = 0.5
/// ```
pub fn bin(mantissa: i64, exponent: i64) -> Binary {
    Binary::new(BigInt::from(mantissa), BigInt::from(exponent))
}

/// Creates an `ArctanTerm`, panicking on invalid parameters.
///
/// # Panics
/// Panics if `numer` or `denom` is not positive.
pub fn term(coeff: i64, numer: i64, denom: i64) -> ArctanTerm {
    match ArctanTerm::new(coeff, numer, denom) {
        Ok(value) => value,
        Err(err) => panic!("invalid test term {coeff}*atan({numer}/{denom}): {err}"),
    }
}

/// Asserts that two floats agree to within `tolerance`.
///
/// # Panics
/// Panics when `|actual - expected| > tolerance`.
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual} (tolerance {tolerance})"
    );
}
