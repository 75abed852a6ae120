//! machin CLI
//!
//! Approximates pi with a Machin-like formula and prints it with the digits that
//! agree with a stored reference expansion highlighted.

use std::process;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use machin::pi::{DEFAULT_DIGITS, DEFAULT_MAX_STEPS};
use machin::report::{self, DEFAULT_TEMPLATE};
use machin::{
    EvalConfig, MachinError, MachinFormula, SeriesKind, StopRule, approximate_pi, reference_for,
};

#[derive(Parser)]
#[command(name = "machin")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Approximate pi from Machin-like arctangent formulas", long_about = None)]
struct Cli {
    /// Built-in formula to evaluate
    #[arg(short, long, default_value = "machin", value_parser = parse_formula)]
    formula: MachinFormula,

    /// Series used to evaluate the reduced arctangent
    #[arg(short, long, value_enum, default_value_t = SeriesArg::Euler)]
    series: SeriesArg,

    /// Significant decimal digits to compute and compare
    #[arg(short, long, default_value_t = DEFAULT_DIGITS)]
    digits: usize,

    /// Upper bound on series steps
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Always run exactly --max-steps steps instead of stopping at convergence
    #[arg(long)]
    fixed_steps: bool,

    /// Output template; `{pi}` and `{mdigit}` are substituted
    #[arg(long, default_value = DEFAULT_TEMPLATE)]
    format: String,

    /// Disable highlighting of the matching digits
    #[arg(long)]
    no_color: bool,

    /// List the built-in formulas and exit
    #[arg(long)]
    list: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SeriesArg {
    Taylor,
    Euler,
}

impl From<SeriesArg> for SeriesKind {
    fn from(arg: SeriesArg) -> Self {
        match arg {
            SeriesArg::Taylor => SeriesKind::Taylor,
            SeriesArg::Euler => SeriesKind::Euler,
        }
    }
}

fn parse_formula(name: &str) -> Result<MachinFormula, String> {
    MachinFormula::by_name(name).ok_or_else(|| {
        let known = MachinFormula::known_names().collect::<Vec<_>>().join(", ");
        format!("unknown formula '{name}' (known: {known})")
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("machin=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list {
        for name in MachinFormula::known_names() {
            if let Some(formula) = MachinFormula::by_name(name) {
                println!("{formula}");
            }
        }
        return;
    }

    match run(&cli) {
        Ok(line) => println!("{line}"),
        Err(e) => {
            error!(kind = ?e.kind(), "{e}");
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String, MachinError> {
    let reference = reference_for(cli.digits)?;
    let config = EvalConfig {
        series: cli.series.into(),
        digits: cli.digits,
        max_steps: cli.max_steps,
        stop: if cli.fixed_steps {
            StopRule::MaxSteps
        } else {
            StopRule::TermBelowPrecision
        },
    };

    info!(formula = %cli.formula, series = %config.series, digits = config.digits, "evaluating");
    let approx = approximate_pi(&cli.formula, &config)?;
    info!(
        steps = approx.steps,
        converged = approx.converged,
        reduced = %approx.reduced,
        "done"
    );

    Ok(report::render(
        &approx.to_digits(),
        reference,
        &cli.format,
        !cli.no_color,
    ))
}
