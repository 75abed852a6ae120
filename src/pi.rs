//! Pi from a Machin-like formula.
//!
//! The pipeline is linear: the formula is reduced exactly to one `atan(y)`, a series of
//! the configured kind evaluates it, and the partial sum times four is the
//! approximation. The series runs until the configured [`StopRule`] fires or
//! `max_steps` advances have been made, whichever comes first.

use tracing::debug;

use crate::arctan::ArctanTerm;
use crate::binary::{Binary, bits_for_decimal_digits};
use crate::error::MachinError;
use crate::formula::MachinFormula;
use crate::reference::matching_digits;
use crate::series::{Series, SeriesKind};

/// Default decimal digits requested.
pub const DEFAULT_DIGITS: usize = 50;

/// Default cap on series advances.
pub const DEFAULT_MAX_STEPS: usize = 10_000;

/// When to stop advancing a series.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StopRule {
    /// Always run exactly `max_steps` advances.
    MaxSteps,
    /// Stop once the latest term no longer changes the sum at the working precision.
    #[default]
    TermBelowPrecision,
}

/// Evaluation settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalConfig {
    pub series: SeriesKind,
    /// Significant decimal digits to compute and render.
    pub digits: usize,
    pub max_steps: usize,
    pub stop: StopRule,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            series: SeriesKind::default(),
            digits: DEFAULT_DIGITS,
            max_steps: DEFAULT_MAX_STEPS,
            stop: StopRule::default(),
        }
    }
}

impl EvalConfig {
    /// Binary working precision for the configured decimal digits.
    pub fn precision_bits(&self) -> u64 {
        bits_for_decimal_digits(self.digits)
    }
}

/// An approximation of pi and how it was obtained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PiApproximation {
    pub value: Binary,
    /// Number of `advance` calls made.
    pub steps: usize,
    /// The single term the formula reduced to.
    pub reduced: ArctanTerm,
    pub series: SeriesKind,
    pub digits: usize,
    /// Whether the last term fell below the working precision.
    pub converged: bool,
}

impl PiApproximation {
    /// The value rendered with `digits` significant digits.
    pub fn to_digits(&self) -> String {
        self.value.to_decimal_string(self.digits)
    }

    /// Decimal places that agree with `reference`.
    pub fn matching_digits(&self, reference: &str) -> usize {
        matching_digits(&self.to_digits(), reference)
    }
}

/// Reduces `formula`, evaluates it with the configured series and returns four times
/// the resulting sum.
pub fn approximate_pi(
    formula: &MachinFormula,
    config: &EvalConfig,
) -> Result<PiApproximation, MachinError> {
    let reduced = formula.reduce()?;
    debug!(formula = formula.name(), reduced = %reduced, "reduced formula");

    let precision_bits = config.precision_bits();
    let mut series = config.series.build(&reduced, precision_bits);
    let converged = run_series(series.as_mut(), config.max_steps, config.stop);
    debug!(
        series = %config.series,
        steps = series.n(),
        converged,
        precision_bits,
        "series stopped"
    );

    Ok(PiApproximation {
        value: series.val().mul_integer(4),
        steps: series.n(),
        reduced,
        series: config.series,
        digits: config.digits,
        converged,
    })
}

/// Advances `series` until `stop` fires or `max_steps` advances have been made.
/// Returns whether the series converged at its working precision.
pub fn run_series(series: &mut dyn Series, max_steps: usize, stop: StopRule) -> bool {
    while series.n() < max_steps {
        if stop == StopRule::TermBelowPrecision && series.state().is_converged() {
            break;
        }
        series.advance();
    }
    series.state().is_converged()
}
