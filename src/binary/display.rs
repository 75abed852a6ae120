//! Decimal rendering for binary numbers.
//!
//! Digit agreement with a reference string is judged on text, so a value is shown
//! with a fixed number of significant decimal digits in positional notation,
//! keeping trailing zeros.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use super::Binary;

/// Numerator of log10(2) scaled by 10^5, used to estimate decimal exponents.
const LOG10_2_SCALED: i64 = 30_103;
const LOG10_2_SCALE: i64 = 100_000;

/// Formats `value` with `significant_digits` significant decimal digits,
/// rounding half up on the magnitude.
///
/// `3.14159...` with 5 digits renders as `"3.1416"`; `0.0123` with 4 digits as
/// `"0.01230"`. Zero renders as `"0.0"`.
pub(crate) fn to_decimal_string(value: &Binary, significant_digits: usize) -> String {
    let digits = significant_digits.max(1);
    let Some(magnitude_bits) = value.magnitude_bits().and_then(|bits| bits.to_i64()) else {
        return "0.0".to_string();
    };

    let mantissa = value.mantissa().magnitude();
    let exponent = value.exponent();
    let lower = BigUint::from(10u32).pow(u32::try_from(digits - 1).unwrap_or(u32::MAX));
    let upper = &lower * 10u32;

    // |value| lies in [2^(p-1), 2^p), so its decimal exponent is close to (p-1)*log10(2).
    let estimated_decimal_exponent =
        Integer::div_floor(&((magnitude_bits - 1) * LOG10_2_SCALED), &LOG10_2_SCALE);
    let mut scale = digits as i64 - 1 - estimated_decimal_exponent;
    let mut scaled = round_scaled(mantissa, exponent, scale);
    // The estimate is off by at most one in either direction; rounding may also carry
    // into an extra digit.
    for _ in 0..4 {
        if scaled >= upper {
            scale -= 1;
        } else if scaled < lower {
            scale += 1;
        } else {
            break;
        }
        scaled = round_scaled(mantissa, exponent, scale);
    }

    let sign = if value.is_negative() { "-" } else { "" };
    format!("{sign}{}", place_decimal_point(&scaled.to_string(), scale))
}

/// Computes round(mantissa * 2^exponent * 10^scale), halves rounding up.
fn round_scaled(mantissa: &BigUint, exponent: &BigInt, scale: i64) -> BigUint {
    let mut numer = mantissa.clone();
    let mut denom = BigUint::one();

    let ten = BigUint::from(10u32);
    let scale_abs = u32::try_from(scale.unsigned_abs()).unwrap_or(u32::MAX);
    if scale >= 0 {
        numer *= ten.pow(scale_abs);
    } else {
        denom *= ten.pow(scale_abs);
    }

    match exponent.to_i64() {
        Some(exp) if exp >= 0 => numer <<= exp as usize,
        Some(exp) => denom <<= exp.unsigned_abs() as usize,
        None => return BigUint::zero(),
    }

    let twice: BigUint = numer << 1usize;
    (twice + &denom) / (denom << 1usize)
}

/// Inserts the decimal point into a digit string representing `digits * 10^-scale`.
fn place_decimal_point(digits: &str, scale: i64) -> String {
    let len = digits.len() as i64;
    let integer_len = len - scale;
    if scale <= 0 {
        let zeros = "0".repeat(scale.unsigned_abs() as usize);
        format!("{digits}{zeros}.0")
    } else if integer_len > 0 {
        let (integer, fraction) = digits.split_at(integer_len as usize);
        format!("{integer}.{fraction}")
    } else {
        let zeros = "0".repeat(integer_len.unsigned_abs() as usize);
        format!("0.{zeros}{digits}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::bin;

    #[test]
    fn zero_renders_as_zero() {
        assert_eq!(to_decimal_string(&Binary::zero(), 10), "0.0");
    }

    #[test]
    fn integers_keep_requested_digits() {
        assert_eq!(to_decimal_string(&bin(3, 0), 3), "3.00");
        assert_eq!(to_decimal_string(&bin(-40, 0), 2), "-40.0");
        assert_eq!(to_decimal_string(&bin(1, 10), 2), "1000.0");
    }

    #[test]
    fn fractions_round_half_up() {
        // 0.75 with one digit rounds to 0.8
        assert_eq!(to_decimal_string(&bin(3, -2), 1), "0.8");
        assert_eq!(to_decimal_string(&bin(3, -2), 4), "0.7500");
        assert_eq!(to_decimal_string(&bin(319, -5), 3), "9.97");
        // 9.96875 with two digits carries into a new digit
        assert_eq!(to_decimal_string(&bin(319, -5), 2), "10.0");
    }

    #[test]
    fn small_values_get_leading_zeros() {
        // 1/64 = 0.015625
        assert_eq!(to_decimal_string(&bin(1, -6), 3), "0.0156");
    }

    #[test]
    fn third_renders_all_threes() {
        let third = Binary::from_ratio(&BigInt::from(1), &BigInt::from(3), 128);
        assert_eq!(to_decimal_string(&third, 12), "0.333333333333");
    }

    #[test]
    fn place_decimal_point_positions() {
        assert_eq!(place_decimal_point("314", 2), "3.14");
        assert_eq!(place_decimal_point("314", 0), "314.0");
        assert_eq!(place_decimal_point("314", -1), "3140.0");
        assert_eq!(place_decimal_point("314", 4), "0.0314");
    }
}
