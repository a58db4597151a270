//! Evaluation error types.

use thiserror::Error;

/// Errors raised while applying a pending operation.
///
/// These never reach callers of the evaluator. `evaluate()` turns them into
/// the faulted mode, which clears itself after the configured delay.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("Division by zero")]
    DivisionByZero,
}
