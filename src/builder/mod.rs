//! Builder API for ergonomic evaluator construction.
//!
//! This module provides a fluent builder over [`EvaluatorConfig`] and the
//! `state_enum!` macro used for declaring state enums.

pub mod macros;

use crate::config::{ConfigError, EvaluatorConfig};
use crate::core::Evaluator;
use std::time::Duration;

/// Builder for evaluators with a fluent API.
///
/// The configuration is validated once, in [`EvaluatorBuilder::build`], and
/// every violation is reported together.
///
/// # Example
///
/// ```
/// use keycalc::builder::EvaluatorBuilder;
/// use std::time::Duration;
///
/// let calc = EvaluatorBuilder::new()
///     .fault_delay(Duration::from_millis(800))
///     .error_text("Cannot divide by zero")
///     .build()
///     .unwrap();
///
/// assert_eq!(calc.fault_delay(), Duration::from_millis(800));
/// ```
#[derive(Clone, Debug, Default)]
pub struct EvaluatorBuilder {
    config: EvaluatorConfig,
}

impl EvaluatorBuilder {
    /// Create a builder starting from the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration, e.g. one loaded from JSON.
    pub fn from_config(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Set how long a fault stays on screen.
    pub fn fault_delay(mut self, delay: Duration) -> Self {
        self.config.fault_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the widest plain rendering of a result.
    pub fn max_plain_len(mut self, width: usize) -> Self {
        self.config.max_plain_len = width;
        self
    }

    /// Set the fractional digits used in exponent form.
    pub fn exponent_digits(mut self, digits: usize) -> Self {
        self.config.exponent_digits = digits;
        self
    }

    /// Set the text displayed while faulted.
    pub fn error_text(mut self, text: impl Into<String>) -> Self {
        self.config.error_text = text.into();
        self
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Validate the configuration and build the evaluator.
    pub fn build(self) -> Result<Evaluator, ConfigError> {
        let config = self.config.validated()?;
        Ok(Evaluator::with_config(&config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigViolation;

    #[test]
    fn default_builder_builds() {
        let calc = EvaluatorBuilder::new().build().unwrap();
        assert_eq!(calc.display_text(), "0");
        assert_eq!(calc.fault_delay(), Duration::from_millis(1500));
    }

    #[test]
    fn fluent_api_applies_every_setting() {
        let builder = EvaluatorBuilder::new()
            .fault_delay(Duration::from_secs(2))
            .max_plain_len(10)
            .exponent_digits(3)
            .error_text("E");

        assert_eq!(
            builder.config(),
            &EvaluatorConfig {
                fault_delay_ms: 2000,
                max_plain_len: 10,
                exponent_digits: 3,
                error_text: "E".to_string(),
            }
        );
    }

    #[test]
    fn builder_reports_all_violations() {
        let result = EvaluatorBuilder::new()
            .fault_delay(Duration::ZERO)
            .max_plain_len(0)
            .build();

        match result {
            Err(ConfigError::Invalid(violations)) => {
                assert_eq!(violations.len(), 2);
                assert!(violations.contains(&ConfigViolation::DisplayTooNarrow));
            }
            Err(other) => panic!("Expected Invalid, got {other}"),
            Ok(_) => panic!("Expected an error"),
        }
    }

    #[test]
    fn builder_starts_from_loaded_config() {
        let config = EvaluatorConfig::from_json(r#"{ "error_text": "Nope" }"#).unwrap();
        let mut calc = EvaluatorBuilder::from_config(config).build().unwrap();
        calc.choose_operator(crate::core::Operator::Divide);
        calc.evaluate();
        assert_eq!(calc.display_text(), "Nope");
    }
}
