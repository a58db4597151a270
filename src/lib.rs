//! Keycalc: a keystroke-driven calculator state machine
//!
//! Keycalc follows the "pure core, imperative shell" split. The core turns
//! discrete keypad events (digits, decimal point, sign, percentage,
//! operators, evaluate, clears) into a display string and a trace line.
//! It reads the wall clock only to stamp a division-by-zero fault and
//! otherwise stays free of tasks and I/O. The shell hosts one evaluator,
//! runs the timed auto-clear after a division by zero and notifies
//! rendering and audio collaborators.
//!
//! # Core Concepts
//!
//! - **Evaluator**: the state machine with one operation per keypad event
//! - **Mode**: `Normal` or `Faulted`, gated by a `Guard` so faulted input
//!   is ignored
//! - **FaultTimer**: explicit token for the auto-clear, so a manual clear
//!   deterministically wins over a late timer
//! - **Calculator**: the Tokio host publishing `View`s on a watch channel
//!
//! # Example
//!
//! ```rust
//! use keycalc::core::Evaluator;
//! use keycalc::input::Key;
//!
//! let mut calc = Evaluator::new();
//! for c in "200+10%".chars() {
//!     calc.press(Key::from_char(c).unwrap());
//! }
//! assert_eq!(calc.display_text(), "20");
//! assert_eq!(calc.trace_text(), "200 +");
//!
//! calc.press(Key::Evaluate);
//! assert_eq!(calc.display_text(), "220");
//! assert_eq!(calc.trace_text(), "200 + 20 =");
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod feedback;
pub mod input;
pub mod shell;

// Re-export commonly used types
pub use builder::EvaluatorBuilder;
pub use config::EvaluatorConfig;
pub use crate::core::{Digit, Evaluator, Mode, Operator, State, View};
pub use input::Key;
pub use shell::Calculator;
