//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An integer setting could not be parsed.
    #[error("failed to parse {name}='{value}' as an integer: {source}")]
    IntParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// A float setting could not be parsed.
    #[error("failed to parse {name}='{value}' as a number: {source}")]
    FloatParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// A count setting must be at least 1.
    #[error("{name} must be at least 1 (got {value})")]
    ZeroCount { name: &'static str, value: u64 },

    /// A weight must be finite and non-negative.
    #[error("{name} must be a finite, non-negative number (got {value})")]
    InvalidWeight { name: &'static str, value: f64 },

    /// A URL or name setting is blank.
    #[error("{name} must not be empty")]
    EmptyValue { name: &'static str },
}
