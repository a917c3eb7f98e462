//! depchain CLI - Dependency chain resolver

use clap::Parser;
use tracing_subscriber::EnvFilter;

use depchain::cli::Cli;
use depchain::error::DepchainError;
use depchain::utils::terminal::print_error;

fn main() {
    let cli = Cli::parse();

    // Can be controlled via RUST_LOG, e.g. RUST_LOG=depchain=trace
    let default_filter = if cli.verbose { "depchain=debug" } else { "depchain=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    if let Err(err) = cli.execute() {
        match err.downcast_ref::<DepchainError>() {
            Some(err) => err.display_with_hints(),
            None => print_error(&format!("{:#}", err)),
        }
        std::process::exit(1);
    }
}
