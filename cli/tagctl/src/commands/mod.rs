//! CLI commands.

mod kinds;
mod new;
mod parse;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::{parse_format, Config, Overrides};
use crate::output::OutputFormat;

/// tagctl - Parse, classify, and build `<kind>-<id>` tags.
#[derive(Debug, Parser)]
#[command(name = "tagctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, value_parser = parse_format)]
    format: Option<OutputFormat>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit log lines as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse tags and show their kind and id.
    Parse(parse::ParseCommand),

    /// Classify tags by kind without validating their ids.
    Kind(parse::KindCommand),

    /// Build a tag from a kind and a human-readable id.
    New(new::NewCommand),

    /// List the supported kinds.
    Kinds,

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Flag values that override the environment.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            format: self.format,
            log_level: self.log_level.clone(),
            log_json: self.log_json,
        }
    }

    /// Run the CLI command.
    pub fn run(self, config: &Config) -> Result<()> {
        let ctx = CommandContext {
            format: config.format,
        };

        match self.command {
            Commands::Parse(cmd) => cmd.run(&ctx),
            Commands::Kind(cmd) => cmd.run(&ctx),
            Commands::New(cmd) => cmd.run(&ctx),
            Commands::Kinds => kinds::run(&ctx),
            Commands::Version => {
                println!("tagctl {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Shared command context.
pub struct CommandContext {
    pub format: OutputFormat,
}
