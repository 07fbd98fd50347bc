//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use tracing_subscriber::EnvFilter;
use wayfarer_cli::CliError;

const DEFAULT_LOG_FILTER: &str = "warn";

fn main() {
    init_logging();
    match wayfarer_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            report(&err);
            std::process::exit(1);
        }
    }
}

/// Send `log` records and tracing events to stderr, filtered by `RUST_LOG`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
    {
        report(&*err);
    }
}

#[expect(
    clippy::print_stderr,
    reason = "the binary reports errors on stderr"
)]
fn report(err: &dyn std::error::Error) {
    eprintln!("wayfarer: {err}");
}
