//! Reference decimal expansions of pi and digit-agreement counting.

use crate::error::MachinError;

/// Pi to 50 decimal places.
pub const PI_50: &str = "3.14159265358979323846264338327950288419716939937510";
/// Pi to 100 decimal places.
pub const PI_100: &str = concat!(
    "3.14159265358979323846264338327950288419716939937510",
    "58209749445923078164062862089986280348253421170679"
);
/// Pi to 150 decimal places.
pub const PI_150: &str = concat!(
    "3.14159265358979323846264338327950288419716939937510",
    "58209749445923078164062862089986280348253421170679",
    "82148086513282306647093844609550582231725359408128"
);

/// Characters before the first decimal place ("3.").
const PREFIX_LEN: usize = 2;

/// Returns the shortest reference string long enough to check `digits` significant
/// digits.
pub fn reference_for(digits: usize) -> Result<&'static str, MachinError> {
    [PI_50, PI_100, PI_150]
        .into_iter()
        .find(|reference| reference.len() >= digits)
        .ok_or(MachinError::ReferenceTooShort {
            available: PI_150.len(),
            requested: digits,
        })
}

/// Counts how many characters of `computed` agree with `reference` from the start.
pub fn matching_prefix_len(computed: &str, reference: &str) -> usize {
    computed
        .bytes()
        .zip(reference.bytes())
        .take_while(|(lhs, rhs)| lhs == rhs)
        .count()
}

/// Number of decimal places of `computed` that agree with `reference`.
///
/// The integer part and decimal point are not counted, so `"3.1416"` against pi
/// matches 3 places; a value that disagrees before the decimal point matches 0.
pub fn matching_digits(computed: &str, reference: &str) -> usize {
    matching_prefix_len(computed, reference).saturating_sub(PREFIX_LEN)
}
