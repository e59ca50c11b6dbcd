//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// A single problem found while validating settings
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("Unknown log level '{0}' (expected trace, debug, info, warn or error)")]
    UnknownLogLevel(String),

    #[error("History limit must be between 1 and {max} (got {value})")]
    HistoryLimitOutOfRange { value: usize, max: usize },

    #[error("Binding for key '{key}': {message}")]
    InvalidBinding { key: String, message: String },

    #[error("Environment variable {name}: cannot parse '{value}'")]
    InvalidEnvironment { name: String, value: String },
}

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid configuration: {}", list(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn list(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
