//! Structured logging initialisation for the camp tools.
//!
//! Logs are written to stderr so that JSON output on stdout stays clean.
//! `RUST_LOG` overrides the caller-supplied level when set.

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::{fmt as fmt_layer, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("unknown log format: {0} (expected \"human\" or \"json\")")]
    UnknownFormat(String),

    #[error("invalid log filter {filter:?}: {reason}")]
    InvalidFilter { filter: String, reason: String },

    #[error("a global logger is already installed")]
    AlreadyInitialized,
}

/// Selects the output format for structured logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Human,
    /// Newline-delimited JSON.
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(LoggingError::UnknownFormat(s.to_string())),
        }
    }
}

/// Install the global tracing subscriber.
///
/// `level` is an `EnvFilter` directive such as `"warn"` or
/// `"info,camp_transactions=trace"`.
pub fn init_logging(format: LogFormat, level: &str) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|e| LoggingError::InvalidFilter {
            filter: level.to_string(),
            reason: e.to_string(),
        })?,
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Human => registry
            .with(
                fmt_layer::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt_layer::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init(),
    };
    result.map_err(|_| LoggingError::AlreadyInitialized)
}
