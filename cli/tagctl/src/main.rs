//! tagctl - inspect and produce entity tags.
//!
//! Parses canonical `<kind>-<id>` tags, classifies them, and builds them from
//! human-readable ids.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

mod commands;
mod config;
mod error;
mod output;

use commands::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configuration errors are reported like command errors
    if let Err(e) = run(cli) {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let config = config::Config::from_env(cli.overrides())?;
    init_tracing(&config);
    cli.run(&config)
}

/// Initialize tracing on stderr (prefer RUST_LOG, fallback to the configured level).
fn init_tracing(config: &config::Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    let layer = if config.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    };

    tracing_subscriber::registry().with(filter).with(layer).init();
}
