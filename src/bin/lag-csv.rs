//! Lag a numeric CSV column read from stdin.
//!
//! Run with: `cargo run --bin lag-csv < prices.csv`

use lagseq::cli;
use lagseq::LagConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so they never mix with the lagged rows on stdout.
    // Set RUST_LOG to control verbosity:
    //   RUST_LOG=lagseq=debug cargo run --bin lag-csv < prices.csv
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    // LAG_OFFSET, LAG_COLUMN, LAG_DEFAULT, LAG_PROJECTION, LAG_FORMAT
    let config = LagConfig::from_env()?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let summary = cli::run(&config, stdin.lock(), stdout.lock())?;

    tracing::info!(
        rows = summary.rows,
        burn_in = summary.burn_in,
        "finished"
    );

    Ok(())
}
