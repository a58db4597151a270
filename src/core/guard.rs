//! Guard predicates over machine states.
//!
//! The evaluator consults a guard before applying any input event, so the
//! rule "nothing but a clear gets through while faulted" lives in one
//! predicate instead of being repeated in every operation.

use super::state::State;
use std::fmt;
use std::marker::PhantomData;

/// Pure predicate deciding whether an event may be applied in a state.
///
/// # Example
///
/// ```rust
/// use keycalc::core::{Guard, Mode, State};
///
/// let accepts_input = Guard::new(|mode: &Mode| !mode.is_error());
///
/// assert!(accepts_input.check(&Mode::Normal));
/// assert!(!accepts_input.check(&Mode::Faulted));
/// ```
pub struct Guard<S: State> {
    predicate: Box<dyn Fn(&S) -> bool + Send + Sync>,
    _phantom: PhantomData<S>,
}

impl<S: State> Guard<S> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&S) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
            _phantom: PhantomData,
        }
    }

    /// Guard that rejects every error state.
    pub fn rejecting_errors() -> Self {
        Self::new(|state: &S| !state.is_error())
    }

    /// Check if the guard allows an event in this state.
    pub fn check(&self, state: &S) -> bool {
        (self.predicate)(state)
    }
}

impl<S: State> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
