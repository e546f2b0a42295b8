//! Loop-order benchmark runner.
//!
//! Sweeps the fixed size list, measures all six loop orders with perf
//! counters and prints the report to stdout. Logs go to stderr; set
//! `RUST_LOG` to change the level and `MATMUL_ORDERS_SEED` for a
//! reproducible run.

use std::error::Error;
use std::process::ExitCode;

use matmul_orders::BenchConfig;
use tracing::error;

fn main() -> ExitCode {
    setup_logging();

    let config = BenchConfig::from_env();
    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let mut chain = e.to_string();
            let mut source = e.source();
            while let Some(cause) = source {
                chain.push_str(": ");
                chain.push_str(&cause.to_string());
                source = cause.source();
            }
            error!(error = %chain, "benchmark aborted");
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(target_os = "linux")]
fn run(config: BenchConfig) -> matmul_orders::Result<()> {
    use matmul_orders::{BenchmarkDriver, PerfBackend, TextReport};

    let mut driver = BenchmarkDriver::new(PerfBackend::new(), config);
    let stdout = std::io::stdout();
    let mut report = TextReport::new(stdout.lock());
    driver.run(&mut report)
}

#[cfg(not(target_os = "linux"))]
fn run(_config: BenchConfig) -> matmul_orders::Result<()> {
    use matmul_orders::CounterError;

    Err(CounterError::Init(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "hardware counters need Linux perf events",
    ))
    .into())
}
