//! The pure evaluator core.
//!
//! This module contains everything with arithmetic meaning:
//! - The `Evaluator` state machine and its plain-data `EvaluatorState`
//! - Operators, digits and the display formatting rule
//! - The `Mode` state enum with the `Guard` that gates input while faulted
//! - The explicit `FaultTimer` token for the division-by-zero auto-clear
//!
//! Nothing here spawns tasks or sleeps. The only clock read is the
//! `Utc::now()` stamp on a freshly raised fault; expiry is driven by the
//! host, through the timestamp it passes to `Evaluator::poll_fault` or the
//! token it hands to `Evaluator::expire_fault`.

mod error;
mod evaluator;
mod fault;
pub mod format;
mod guard;
mod mode;
mod operator;
mod state;

pub use error::EvalError;
pub use evaluator::{Evaluator, EvaluatorState, PendingOperation, View};
pub use fault::{FaultTimer, TimerToken};
pub use format::DisplayFormat;
pub use guard::Guard;
pub use mode::Mode;
pub use operator::{Digit, Operator};
pub use state::State;
