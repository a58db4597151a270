//! The input/evaluation state machine.
//!
//! Every public operation corresponds to one keypad event. Operations never
//! return values; callers read `display_text`, `trace_text` and
//! `is_faulted` (or a whole [`View`]) after each call.

use super::error::EvalError;
use super::fault::{FaultTimer, TimerToken};
use super::format::{read_number, DisplayFormat};
use super::guard::Guard;
use super::mode::Mode;
use super::operator::{Digit, Operator};
use crate::config::EvaluatorConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Left operand and operator captured when an operator key was chosen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingOperation {
    pub operand: String,
    pub operator: Operator,
}

/// All arithmetic state of the evaluator, as plain data.
///
/// The default value is the startup state: accumulator `"0"`, nothing
/// pending, no fresh entry expected, not faulted, empty trace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluatorState {
    accumulator: String,
    pending: Option<PendingOperation>,
    awaiting_fresh_entry: bool,
    faulted: bool,
    trace: String,
}

impl Default for EvaluatorState {
    fn default() -> Self {
        Self {
            accumulator: "0".to_string(),
            pending: None,
            awaiting_fresh_entry: false,
            faulted: false,
            trace: String::new(),
        }
    }
}

impl EvaluatorState {
    pub fn accumulator(&self) -> &str {
        &self.accumulator
    }

    pub fn pending(&self) -> Option<&PendingOperation> {
        self.pending.as_ref()
    }

    pub fn awaiting_fresh_entry(&self) -> bool {
        self.awaiting_fresh_entry
    }

    pub fn is_faulted(&self) -> bool {
        self.faulted
    }

    pub fn trace(&self) -> &str {
        &self.trace
    }
}

/// What a presentation layer renders after each event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub display: String,
    pub trace: String,
    pub faulted: bool,
}

/// Keystroke-driven arithmetic evaluator.
///
/// # Example
///
/// ```rust
/// use keycalc::core::{Digit, Evaluator, Operator};
///
/// let mut calc = Evaluator::new();
/// calc.input_digit(Digit::new(5).unwrap());
/// calc.choose_operator(Operator::Add);
/// calc.input_digit(Digit::new(3).unwrap());
/// calc.choose_operator(Operator::Multiply);
/// calc.input_digit(Digit::new(2).unwrap());
/// calc.evaluate();
///
/// assert_eq!(calc.display_text(), "16");
/// assert_eq!(calc.trace_text(), "8 × 2 =");
/// ```
#[derive(Debug)]
pub struct Evaluator {
    state: EvaluatorState,
    format: DisplayFormat,
    fault_delay: Duration,
    error_text: String,
    fault: Option<FaultTimer>,
    input_gate: Guard<Mode>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    /// Evaluator with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&EvaluatorConfig::default())
    }

    /// Evaluator using the given configuration as is.
    ///
    /// Use [`crate::builder::EvaluatorBuilder`] to validate a configuration
    /// before building.
    pub fn with_config(config: &EvaluatorConfig) -> Self {
        Self {
            state: EvaluatorState::default(),
            format: config.display_format(),
            fault_delay: config.fault_delay(),
            error_text: config.error_text.clone(),
            fault: None,
            input_gate: Guard::rejecting_errors(),
        }
    }

    pub fn state(&self) -> &EvaluatorState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        if self.state.faulted {
            Mode::Faulted
        } else {
            Mode::Normal
        }
    }

    /// Accumulator, or the error text while faulted.
    pub fn display_text(&self) -> &str {
        if self.state.faulted {
            &self.error_text
        } else {
            &self.state.accumulator
        }
    }

    /// Pending or last completed operation, empty when there is none.
    pub fn trace_text(&self) -> &str {
        &self.state.trace
    }

    pub fn is_faulted(&self) -> bool {
        self.state.faulted
    }

    pub fn fault_delay(&self) -> Duration {
        self.fault_delay
    }

    /// Outstanding auto-clear, present exactly while faulted.
    pub fn fault_timer(&self) -> Option<&FaultTimer> {
        self.fault.as_ref()
    }

    pub fn view(&self) -> View {
        View {
            display: self.display_text().to_string(),
            trace: self.trace_text().to_string(),
            faulted: self.is_faulted(),
        }
    }

    fn accepts_input(&self, event: &'static str) -> bool {
        let mode = self.mode();
        let accepted = self.input_gate.check(&mode);
        if !accepted {
            trace!(event, mode = ?mode, "input ignored");
        }
        accepted
    }

    /// Append a digit, or start a new number after an operator or result.
    pub fn input_digit(&mut self, digit: Digit) {
        if !self.accepts_input("digit") {
            return;
        }
        let state = &mut self.state;
        if state.awaiting_fresh_entry {
            state.accumulator.clear();
            state.awaiting_fresh_entry = false;
        }
        if state.accumulator == "0" {
            state.accumulator = digit.to_string();
        } else {
            state.accumulator.push(digit.as_char());
        }
    }

    /// Append a decimal point unless the accumulator already has one.
    pub fn input_decimal_point(&mut self) {
        if !self.accepts_input("decimal_point") {
            return;
        }
        let state = &mut self.state;
        if state.awaiting_fresh_entry {
            state.accumulator = "0".to_string();
            state.awaiting_fresh_entry = false;
        }
        if !state.accumulator.contains('.') {
            state.accumulator.push('.');
        }
    }

    /// Flip the leading minus sign; zero is left alone.
    pub fn toggle_sign(&mut self) {
        if !self.accepts_input("toggle_sign") {
            return;
        }
        let accumulator = &mut self.state.accumulator;
        if read_number(accumulator) == 0.0 {
            return;
        }
        if accumulator.starts_with('-') {
            accumulator.remove(0);
        } else {
            accumulator.insert(0, '-');
        }
    }

    /// Convert the accumulator to a percentage.
    ///
    /// With an operation in flight the result is that percentage of the
    /// left operand, otherwise the accumulator divided by 100.
    pub fn percentage(&mut self) {
        if !self.accepts_input("percentage") {
            return;
        }
        let current = read_number(&self.state.accumulator);
        let value = match &self.state.pending {
            Some(pending) => current * read_number(&pending.operand) / 100.0,
            None => current / 100.0,
        };
        self.state.accumulator = self.format.format(value);
    }

    /// Select the operator for the next operation.
    ///
    /// A pending operation whose right operand has been typed is evaluated
    /// first. Choosing again before typing only swaps the operator.
    pub fn choose_operator(&mut self, operator: Operator) {
        if !self.accepts_input("operator") {
            return;
        }
        if let Some(previous) = self.state.pending.as_ref().map(|p| p.operator) {
            if self.state.awaiting_fresh_entry {
                debug!(from = %previous, to = %operator, "operator replaced");
            } else {
                debug!(operator = %previous, "implicit evaluation before chaining");
                if let Err(err) = self.evaluate_pending() {
                    self.raise_fault(err);
                    return;
                }
            }
        }

        let state = &mut self.state;
        state.trace = format!("{} {}", state.accumulator, operator.symbol());
        state.pending = Some(PendingOperation {
            operand: state.accumulator.clone(),
            operator,
        });
        state.awaiting_fresh_entry = true;
    }

    /// Apply the pending operation to the accumulator.
    ///
    /// Does nothing when no operation is pending, which makes a repeated
    /// evaluate harmless. Division by zero switches to the faulted mode.
    pub fn evaluate(&mut self) {
        if !self.accepts_input("evaluate") {
            return;
        }
        if let Err(err) = self.evaluate_pending() {
            self.raise_fault(err);
        }
    }

    /// Back to the startup state, cancelling any outstanding fault timer.
    pub fn clear_all(&mut self) {
        if let Some(timer) = self.fault.as_ref() {
            debug!(token = %timer.token, "fault cleared manually, timer cancelled");
        }
        self.reset();
    }

    /// Reset only the accumulator.
    pub fn clear_entry(&mut self) {
        self.state.accumulator = "0".to_string();
    }

    /// Auto-clear for the fault identified by `token`.
    ///
    /// Returns `false` and changes nothing if the token does not belong to
    /// the fault currently showing.
    pub fn expire_fault(&mut self, token: TimerToken) -> bool {
        match self.fault.as_ref() {
            Some(timer) if timer.token == token => {
                debug!(token = %token, "fault timer expired");
                self.reset();
                true
            }
            _ => {
                trace!(token = %token, "stale fault timer ignored");
                false
            }
        }
    }

    /// Expire the outstanding fault if its delay has elapsed at `now`.
    pub fn poll_fault(&mut self, now: DateTime<Utc>) -> bool {
        let due = self
            .fault
            .as_ref()
            .filter(|timer| timer.is_due(now))
            .map(|timer| timer.token);
        match due {
            Some(token) => self.expire_fault(token),
            None => false,
        }
    }

    fn evaluate_pending(&mut self) -> Result<(), EvalError> {
        let Some(pending) = self.state.pending.as_ref() else {
            return Ok(());
        };
        let left = read_number(&pending.operand);
        let right = read_number(&self.state.accumulator);
        let result = pending.operator.apply(left, right)?;

        let state = &mut self.state;
        if let Some(pending) = state.pending.take() {
            state.trace = format!(
                "{} {} {} =",
                pending.operand,
                pending.operator.symbol(),
                state.accumulator
            );
        }
        state.accumulator = self.format.format(result);
        state.awaiting_fresh_entry = true;
        debug!(result = %state.accumulator, trace = %state.trace, "operation evaluated");
        Ok(())
    }

    fn raise_fault(&mut self, err: EvalError) {
        let timer = FaultTimer::start(Utc::now(), self.fault_delay);
        warn!(
            error = %err,
            token = %timer.token,
            delay_ms = self.fault_delay.as_millis() as u64,
            "evaluation faulted"
        );
        self.state.faulted = true;
        self.fault = Some(timer);
    }

    fn reset(&mut self) {
        self.state = EvaluatorState::default();
        self.fault = None;
    }
}
