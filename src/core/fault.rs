//! Explicit timer token for the fault auto-clear.
//!
//! A fault is raised with a fresh token. Whoever drives time (an async task
//! or a polling loop) hands the token back when the delay has elapsed, and
//! the evaluator only honours it while that same fault is still showing. A
//! manual clear drops the timer, so a late expiry becomes a no-op.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Identity of one raised fault.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(Uuid);

impl TimerToken {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TimerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outstanding auto-clear for the current fault.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FaultTimer {
    pub token: TimerToken,
    pub raised_at: DateTime<Utc>,
    pub delay: Duration,
}

impl FaultTimer {
    pub(crate) fn start(raised_at: DateTime<Utc>, delay: Duration) -> Self {
        Self {
            token: TimerToken::new(),
            raised_at,
            delay,
        }
    }

    /// Instant at which the fault clears itself.
    pub fn deadline(&self) -> DateTime<Utc> {
        chrono::Duration::from_std(self.delay)
            .ok()
            .and_then(|delay| self.raised_at.checked_add_signed(delay))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Whether the delay has fully elapsed at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.deadline()
    }

    /// Time left before the auto-clear, zero once due.
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        self.deadline()
            .signed_duration_since(now)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique() {
        assert_ne!(TimerToken::new(), TimerToken::new());
    }

    #[test]
    fn deadline_adds_delay() {
        let raised_at = Utc::now();
        let timer = FaultTimer::start(raised_at, Duration::from_millis(1500));

        assert_eq!(
            timer.deadline(),
            raised_at + chrono::Duration::milliseconds(1500)
        );
    }

    #[test]
    fn is_due_only_after_delay() {
        let raised_at = Utc::now();
        let timer = FaultTimer::start(raised_at, Duration::from_millis(1500));

        assert!(!timer.is_due(raised_at));
        assert!(!timer.is_due(raised_at + chrono::Duration::milliseconds(1499)));
        assert!(timer.is_due(raised_at + chrono::Duration::milliseconds(1500)));
    }

    #[test]
    fn remaining_counts_down_to_zero() {
        let raised_at = Utc::now();
        let timer = FaultTimer::start(raised_at, Duration::from_millis(1500));

        assert_eq!(
            timer.remaining(raised_at + chrono::Duration::milliseconds(500)),
            Duration::from_millis(1000)
        );
        assert_eq!(
            timer.remaining(raised_at + chrono::Duration::seconds(5)),
            Duration::ZERO
        );
    }
}
