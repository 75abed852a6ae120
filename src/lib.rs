#![warn(
    clippy::shadow_reuse,
    clippy::shadow_same,
    clippy::shadow_unrelated,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

//! Pi from Machin-like arctangent identities.
//!
//! A formula `pi/4 = sum_i c_i * atan(p_i / q_i)` is reduced with exact rational
//! arithmetic to a single `atan(y)` ([`ArctanTerm::composite`], [`ArctanTerm::combine`],
//! [`MachinFormula::reduce`]), then evaluated lazily by a [`Series`] whose partial sums
//! can be advanced to any precision.
//!
//! ```
//! use machin::{EvalConfig, MachinFormula, PI_50, approximate_pi};
//!
//! let approx = approximate_pi(&MachinFormula::machin(), &EvalConfig::default())?;
//! assert!(approx.matching_digits(PI_50) >= 45);
//! # Ok::<(), machin::MachinError>(())
//! ```

pub mod arctan;
pub mod binary;
pub mod error;
pub mod formula;
pub mod pi;
pub mod rational;
pub mod reference;
pub mod report;
pub mod series;

#[cfg(test)]
mod test_utils;

pub use arctan::ArctanTerm;
pub use binary::{Binary, bits_for_decimal_digits};
pub use error::{ErrorKind, MachinError};
pub use formula::MachinFormula;
pub use pi::{EvalConfig, PiApproximation, StopRule, approximate_pi, run_series};
pub use reference::{PI_50, PI_100, PI_150, matching_digits, reference_for};
pub use series::{ArctanSeries, EulerTransformSeries, Series, SeriesKind, SeriesState};
