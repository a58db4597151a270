//! Evaluator configuration.
//!
//! A configuration can come from defaults, a JSON document, or the
//! environment. Validation uses Stillwater's `Validation` so that every
//! bad value is reported at once rather than one per attempt.
//!
//! # Example
//!
//! ```rust
//! use keycalc::config::EvaluatorConfig;
//!
//! let config = EvaluatorConfig::from_json(r#"{ "fault_delay_ms": 800 }"#).unwrap();
//! assert_eq!(config.fault_delay_ms, 800);
//! assert_eq!(config.max_plain_len, 12);
//! assert!(config.validate().is_success());
//! ```

pub mod violations;

pub use violations::{ConfigError, ConfigViolation};

use crate::core::DisplayFormat;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub const ENV_FAULT_DELAY_MS: &str = "KEYCALC_FAULT_DELAY_MS";
pub const ENV_MAX_PLAIN_LEN: &str = "KEYCALC_MAX_PLAIN_LEN";
pub const ENV_EXPONENT_DIGITS: &str = "KEYCALC_EXPONENT_DIGITS";
pub const ENV_ERROR_TEXT: &str = "KEYCALC_ERROR_TEXT";

/// Tunables of the evaluator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// How long the error indicator stays before the automatic clear
    pub fault_delay_ms: u64,
    /// Longest plain rendering of a result before switching to exponent form
    pub max_plain_len: usize,
    /// Fractional digits in exponent form
    pub exponent_digits: usize,
    /// Text shown in place of the accumulator while faulted
    pub error_text: String,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            fault_delay_ms: Self::DEFAULT_FAULT_DELAY_MS,
            max_plain_len: DisplayFormat::DEFAULT_MAX_PLAIN_LEN,
            exponent_digits: DisplayFormat::DEFAULT_EXPONENT_DIGITS,
            error_text: Self::DEFAULT_ERROR_TEXT.to_string(),
        }
    }
}

impl EvaluatorConfig {
    pub const DEFAULT_FAULT_DELAY_MS: u64 = 1500;
    pub const DEFAULT_ERROR_TEXT: &'static str = "Error";
    pub const MIN_FAULT_DELAY_MS: u64 = 1;
    pub const MAX_FAULT_DELAY_MS: u64 = 60_000;
    /// `f64` carries at most 17 significant digits.
    pub const MAX_EXPONENT_DIGITS: usize = 16;

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Defaults overlaid with the `KEYCALC_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Defaults overlaid with values from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = parse_var(&lookup, ENV_FAULT_DELAY_MS)? {
            config.fault_delay_ms = value;
        }
        if let Some(value) = parse_var(&lookup, ENV_MAX_PLAIN_LEN)? {
            config.max_plain_len = value;
        }
        if let Some(value) = parse_var(&lookup, ENV_EXPONENT_DIGITS)? {
            config.exponent_digits = value;
        }
        if let Some(value) = lookup(ENV_ERROR_TEXT) {
            config.error_text = value;
        }
        Ok(config)
    }

    pub fn fault_delay(&self) -> Duration {
        Duration::from_millis(self.fault_delay_ms)
    }

    pub fn display_format(&self) -> DisplayFormat {
        DisplayFormat {
            max_plain_len: self.max_plain_len,
            exponent_digits: self.exponent_digits,
        }
    }

    /// Check every field, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigViolation>>> = Vec::new();

        let delay_range = Self::MIN_FAULT_DELAY_MS..=Self::MAX_FAULT_DELAY_MS;
        checks.push(if delay_range.contains(&self.fault_delay_ms) {
            Validation::success(())
        } else {
            Validation::fail(ConfigViolation::FaultDelayOutOfRange {
                value_ms: self.fault_delay_ms,
                min_ms: Self::MIN_FAULT_DELAY_MS,
                max_ms: Self::MAX_FAULT_DELAY_MS,
            })
        });

        checks.push(if self.max_plain_len >= 1 {
            Validation::success(())
        } else {
            Validation::fail(ConfigViolation::DisplayTooNarrow)
        });

        checks.push(if self.exponent_digits <= Self::MAX_EXPONENT_DIGITS {
            Validation::success(())
        } else {
            Validation::fail(ConfigViolation::TooManyExponentDigits {
                value: self.exponent_digits,
                max: Self::MAX_EXPONENT_DIGITS,
            })
        });

        checks.push(if self.error_text.trim().is_empty() {
            Validation::fail(ConfigViolation::EmptyErrorText)
        } else {
            Validation::success(())
        });

        Validation::all_vec(checks).map(|_| ())
    }

    /// The configuration itself if valid, every violation otherwise.
    pub fn validated(self) -> Result<Self, ConfigError> {
        match self.validate() {
            Validation::Success(_) => Ok(self),
            Validation::Failure(violations) => Err(ConfigError::Invalid(
                violations.iter().cloned().collect(),
            )),
        }
    }
}

fn parse_var<F, T>(lookup: &F, var: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(var) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                value: raw,
            }),
    }
}
