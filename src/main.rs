//! ILAP indicator CLI
//!
//! Usage:
//!     ilap weights_file points_file
//!     ilap weights.txt front.txt --parallel-threshold 512 --verbose

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ilap_rs::indicator::DEFAULT_PARALLEL_THRESHOLD;
use ilap_rs::io::read_point_file;
use ilap_rs::{Error, IndicatorConfig, LapIndicator, Result};

/// Evaluate a Pareto front approximation with the ILAP indicator
#[derive(Parser)]
#[command(name = "ilap")]
#[command(version)]
#[command(about = "ILAP indicator: mean cost of the optimal weight-to-point assignment", long_about = None)]
struct Cli {
    /// File with the uniformly distributed weight vectors, one per line
    weights_file: String,

    /// File with the Pareto front approximation to evaluate, one point per line
    points_file: String,

    /// Number of weight vectors from which the cost matrix is built in parallel
    #[arg(long, default_value_t = DEFAULT_PARALLEL_THRESHOLD)]
    parallel_threshold: usize,

    /// Log pipeline stages to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(cli: &Cli) -> Result<f64> {
    let weights = read_point_file(&cli.weights_file)?;
    let points = read_point_file(&cli.points_file)?;

    if weights.len() != points.len() || weights.dim() != points.dim() {
        return Err(Error::DimensionMismatch {
            expected: format!(
                "weights and points to match ({} points of dimension {})",
                weights.len(),
                weights.dim()
            ),
            got: format!("{} points of dimension {}", points.len(), points.dim()),
        });
    }

    let indicator = LapIndicator::new(IndicatorConfig::new(cli.parallel_threshold))?;
    indicator.compute(&weights, &points)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(value) => {
            println!("LAP_indicator: {:?}", value);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
