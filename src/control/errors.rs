//! Error types for tracker construction
//!
//! Runtime operations never fail: empty candidate sets, unknown ids and
//! gated actions resolve to `None` or no-ops. The only failure surface is
//! an impossible configuration, rejected before any component is built.

use std::fmt;

/// Errors raised while validating or loading a [`TrackerConfig`](super::TrackerConfig)
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Value must be strictly positive
    NonPositive {
        /// Configuration field name
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// Value must not be negative
    Negative {
        /// Configuration field name
        field: &'static str,
        /// Offending value
        value: f64,
    },

    /// Value is NaN or infinite
    NonFinite {
        /// Configuration field name
        field: &'static str,
    },

    /// Value lies outside an inclusive range
    OutOfRange {
        /// Configuration field name
        field: &'static str,
        /// Offending value
        value: f64,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// JSON could not be parsed into a configuration
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive { field, value } => {
                write!(f, "{} must be positive, got {}", field, value)
            }
            ConfigError::Negative { field, value } => {
                write!(f, "{} must not be negative, got {}", field, value)
            }
            ConfigError::NonFinite { field } => write!(f, "{} must be finite", field),
            ConfigError::OutOfRange {
                field,
                value,
                min,
                max,
            } => {
                write!(
                    f,
                    "{} must lie in [{}, {}], got {}",
                    field, min, max, value
                )
            }
            ConfigError::Parse(msg) => write!(f, "Invalid configuration JSON: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}
