//! Configuration violations and load errors.

use thiserror::Error;

/// One invalid configuration value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigViolation {
    #[error("Fault delay {value_ms}ms is outside {min_ms}..={max_ms}ms")]
    FaultDelayOutOfRange {
        value_ms: u64,
        min_ms: u64,
        max_ms: u64,
    },

    #[error("Display width must be at least 1 character")]
    DisplayTooNarrow,

    #[error("Exponent digits ({value}) exceed the maximum of {max}")]
    TooManyExponentDigits { value: usize, max: usize },

    #[error("Error text must not be empty")]
    EmptyErrorText,
}

/// Errors that can occur when loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Environment variable {var} has invalid value '{value}'")]
    InvalidValue { var: String, value: String },

    #[error("Invalid configuration: {}", describe(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn describe(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
