//! CLI configuration.
//!
//! Values come from the environment and are overridden by flags.

use anyhow::{bail, Result};

use crate::output::OutputFormat;

/// Default log level when neither RUST_LOG nor TAGCTL_LOG_LEVEL is set.
const DEFAULT_LOG_LEVEL: &str = "warn";

/// CLI configuration (env-driven).
#[derive(Debug, Clone)]
pub struct Config {
    /// Output format.
    pub format: OutputFormat,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit log lines as JSON.
    pub log_json: bool,
}

/// Flag values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub format: Option<OutputFormat>,
    pub log_level: Option<String>,
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables and flag overrides.
    pub fn from_env(overrides: Overrides) -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok(), overrides)
    }

    /// Load configuration from a variable lookup and flag overrides.
    ///
    /// An environment value is only parsed when no flag replaces it.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>, overrides: Overrides) -> Result<Self> {
        let format = match overrides.format {
            Some(format) => format,
            None => match var("TAGCTL_FORMAT") {
                Some(value) => parse_format(&value)?,
                None => OutputFormat::Table,
            },
        };

        let log_level = overrides
            .log_level
            .or_else(|| var("TAGCTL_LOG_LEVEL"))
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        let log_json = overrides.log_json
            || var("TAGCTL_LOG_JSON")
                .map(|v| v == "1" || v.to_lowercase() == "true")
                .unwrap_or(false);

        Ok(Self {
            format,
            log_level,
            log_json,
        })
    }
}

/// Parse an output format name.
pub fn parse_format(value: &str) -> Result<OutputFormat> {
    match value.to_lowercase().as_str() {
        "table" => Ok(OutputFormat::Table),
        "json" => Ok(OutputFormat::Json),
        other => bail!("unknown output format {other:?} (expected table or json)"),
    }
}
