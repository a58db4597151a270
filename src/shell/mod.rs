//! Imperative shell around the evaluator core.
//!
//! [`Calculator`] owns the single evaluator instance, applies events one
//! at a time, publishes the resulting [`View`] on a watch channel and runs
//! the fault auto-clear as a Tokio task. The task only carries the fault's
//! token, so a task that outlives its fault can never reset a newer state.

use crate::core::{Evaluator, EvaluatorState, FaultTimer, TimerToken, View};
use crate::feedback::Observer;
use crate::input::Key;
use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Auto-clear for one fault; no handle when no runtime was available.
struct ScheduledClear {
    token: TimerToken,
    handle: Option<JoinHandle<()>>,
}

/// Host that serializes events onto one evaluator.
///
/// # Example
///
/// ```rust
/// use keycalc::core::Evaluator;
/// use keycalc::input::Key;
/// use keycalc::shell::Calculator;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut calc = Calculator::new(Evaluator::new());
/// for c in "12+30=".chars() {
///     calc.press(Key::from_char(c).unwrap());
/// }
/// assert_eq!(calc.view().display, "42");
/// assert_eq!(calc.view().trace, "12 + 30 =");
/// # }
/// ```
pub struct Calculator {
    evaluator: Arc<Mutex<Evaluator>>,
    views: Arc<watch::Sender<View>>,
    scheduled: Option<ScheduledClear>,
    observers: Vec<Box<dyn Observer>>,
}

impl Calculator {
    pub fn new(evaluator: Evaluator) -> Self {
        let (views, _) = watch::channel(evaluator.view());
        Self {
            evaluator: Arc::new(Mutex::new(evaluator)),
            views: Arc::new(views),
            scheduled: None,
            observers: Vec::new(),
        }
    }

    /// Register an observer notified after every event.
    pub fn add_observer(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Receiver that sees every published view, including auto-clears.
    pub fn subscribe(&self) -> watch::Receiver<View> {
        self.views.subscribe()
    }

    pub fn view(&self) -> View {
        lock(&self.evaluator).view()
    }

    pub fn snapshot(&self) -> EvaluatorState {
        lock(&self.evaluator).state().clone()
    }

    /// Time left before the showing fault clears itself, for countdowns.
    pub fn fault_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        lock(&self.evaluator)
            .fault_timer()
            .map(|timer| timer.remaining(now))
    }

    /// Apply one event.
    ///
    /// A fault raised by the event schedules its auto-clear on the current
    /// Tokio runtime. Without a runtime the fault stays until
    /// [`Calculator::poll`] or a manual clear.
    pub fn press(&mut self, key: Key) {
        let (view, fault) = {
            let mut evaluator = lock(&self.evaluator);
            evaluator.press(key);
            (evaluator.view(), evaluator.fault_timer().cloned())
        };

        let raised = self.sync_timer(fault);
        self.views.send_replace(view.clone());

        for observer in &mut self.observers {
            observer.key_pressed(key, &view);
            if raised {
                observer.fault_raised(&view);
            }
        }
    }

    /// Expire a due fault for hosts that drive time themselves.
    pub fn poll(&mut self, now: DateTime<Utc>) -> bool {
        let (expired, view) = {
            let mut evaluator = lock(&self.evaluator);
            (evaluator.poll_fault(now), evaluator.view())
        };
        if expired {
            self.cancel_scheduled();
            self.views.send_replace(view);
        }
        expired
    }

    /// Returns `true` when `fault` is newly raised.
    fn sync_timer(&mut self, fault: Option<FaultTimer>) -> bool {
        match fault {
            Some(timer) => {
                if self
                    .scheduled
                    .as_ref()
                    .is_some_and(|scheduled| scheduled.token == timer.token)
                {
                    return false;
                }
                self.cancel_scheduled();
                self.scheduled = Some(self.schedule(timer));
                true
            }
            None => {
                self.cancel_scheduled();
                false
            }
        }
    }

    fn schedule(&self, timer: FaultTimer) -> ScheduledClear {
        let Ok(runtime) = Handle::try_current() else {
            warn!(token = %timer.token, "no Tokio runtime, fault clears only on poll");
            return ScheduledClear {
                token: timer.token,
                handle: None,
            };
        };

        let evaluator = Arc::clone(&self.evaluator);
        let views = Arc::clone(&self.views);
        let token = timer.token;
        let delay = timer.delay;
        debug!(token = %token, delay_ms = delay.as_millis() as u64, "fault auto-clear scheduled");

        let handle = runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            let view = {
                let mut evaluator = lock(&evaluator);
                if !evaluator.expire_fault(token) {
                    return;
                }
                evaluator.view()
            };
            views.send_replace(view);
        });

        ScheduledClear {
            token,
            handle: Some(handle),
        }
    }

    fn cancel_scheduled(&mut self) {
        let Some(ScheduledClear {
            token,
            handle: Some(handle),
        }) = self.scheduled.take()
        else {
            return;
        };
        if !handle.is_finished() {
            debug!(token = %token, "fault auto-clear cancelled");
        }
        handle.abort();
    }
}

impl Drop for Calculator {
    fn drop(&mut self) {
        self.cancel_scheduled();
    }
}

impl fmt::Debug for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calculator")
            .field("view", &self.view())
            .field(
                "scheduled",
                &self.scheduled.as_ref().map(|scheduled| scheduled.token),
            )
            .field("observers", &self.observers.len())
            .finish()
    }
}

fn lock(evaluator: &Mutex<Evaluator>) -> MutexGuard<'_, Evaluator> {
    evaluator.lock().unwrap_or_else(PoisonError::into_inner)
}
