//! Caller-driven time: timestamps, tickers, deadlines and debouncing.
//!
//! Sessions never read a wall clock. The presentation layer passes the
//! current `Millis` into every event, which keeps every transition
//! deterministic and testable.
//!
//! ## Ticker lifecycle
//!
//! A `Ticker` counts whole periods since it was started. `stop` freezes
//! the count and is idempotent: the first stop wins, later stops and
//! stops on an idle ticker do nothing. Sessions call `stop` on every
//! exit path (completion, retry, level switch, navigating away) so a
//! finished round can never keep accumulating time.
//!
//! ```
//! use coin_drill::core::{Millis, Ticker};
//!
//! let mut timer = Ticker::seconds();
//! timer.start(Millis(0));
//! assert_eq!(timer.ticks(Millis(2_500)), 2);
//!
//! assert!(timer.stop(Millis(3_000)));
//! assert!(!timer.stop(Millis(9_000)));
//! assert_eq!(timer.ticks(Millis(60_000)), 3);
//! ```

use serde::{Deserialize, Serialize};

/// Milliseconds since an arbitrary, caller-chosen epoch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Millis(pub u64);

impl Millis {
    /// Create a timestamp.
    #[must_use]
    pub const fn new(ms: u64) -> Self {
        Self(ms)
    }

    /// Get the raw millisecond value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`, clamped at zero.
    #[must_use]
    pub const fn since(self, earlier: Millis) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// Timestamp `ms` milliseconds later.
    #[must_use]
    pub const fn after(self, ms: u64) -> Millis {
        Millis(self.0.saturating_add(ms))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
enum TickerState {
    Idle,
    Running { started: Millis },
    Stopped { ticks: u64 },
}

/// Counts whole periods between `start` and `stop`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    period_ms: u64,
    state: TickerState,
}

impl Ticker {
    /// Create an idle ticker with the given period.
    #[must_use]
    pub fn new(period_ms: u64) -> Self {
        assert!(period_ms > 0, "Ticker period must be positive");
        Self {
            period_ms,
            state: TickerState::Idle,
        }
    }

    /// One tick per second.
    #[must_use]
    pub fn seconds() -> Self {
        Self::new(1_000)
    }

    /// One tick per tenth of a second.
    #[must_use]
    pub fn tenths() -> Self {
        Self::new(100)
    }

    /// Period in milliseconds.
    #[must_use]
    pub fn period_ms(&self) -> u64 {
        self.period_ms
    }

    /// Start counting. Returns false if already running.
    ///
    /// A stopped ticker restarts from zero.
    pub fn start(&mut self, now: Millis) -> bool {
        if self.is_running() {
            return false;
        }
        self.state = TickerState::Running { started: now };
        true
    }

    /// Freeze the count. Returns true only for the call that stopped it.
    pub fn stop(&mut self, now: Millis) -> bool {
        match self.state {
            TickerState::Running { started } => {
                self.state = TickerState::Stopped {
                    ticks: now.since(started) / self.period_ms,
                };
                true
            }
            TickerState::Idle | TickerState::Stopped { .. } => false,
        }
    }

    /// Return to idle, discarding any count.
    pub fn reset(&mut self) {
        self.state = TickerState::Idle;
    }

    /// Is the ticker counting?
    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, TickerState::Running { .. })
    }

    /// Whole periods elapsed as of `now` (frozen once stopped).
    #[must_use]
    pub fn ticks(&self, now: Millis) -> u64 {
        match self.state {
            TickerState::Idle => 0,
            TickerState::Running { started } => now.since(started) / self.period_ms,
            TickerState::Stopped { ticks } => ticks,
        }
    }
}

/// A point in time after which a transient state expires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
    due: Millis,
}

impl Deadline {
    /// Deadline `delay_ms` after `now`.
    #[must_use]
    pub fn after(now: Millis, delay_ms: u64) -> Self {
        Self {
            due: now.after(delay_ms),
        }
    }

    /// When the deadline passes.
    #[must_use]
    pub fn due(&self) -> Millis {
        self.due
    }

    /// Has the deadline passed as of `now`?
    #[must_use]
    pub fn is_due(&self, now: Millis) -> bool {
        now >= self.due
    }

    /// Milliseconds left, zero once due.
    #[must_use]
    pub fn remaining(&self, now: Millis) -> u64 {
        self.due.since(now)
    }
}

/// Collapses a burst of triggers into a single firing.
///
/// Only the last trigger in a burst counts: `fire` returns true once
/// the window has passed since it, then disarms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debouncer {
    window_ms: u64,
    armed_at: Option<Millis>,
}

impl Debouncer {
    /// Create a disarmed debouncer.
    #[must_use]
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            armed_at: None,
        }
    }

    /// Arm, or re-arm, as of `now`.
    pub fn trigger(&mut self, now: Millis) {
        self.armed_at = Some(now);
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.armed_at = None;
    }

    /// Is a firing pending?
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.armed_at.is_some()
    }

    /// Fire if the window has elapsed since the last trigger.
    pub fn fire(&mut self, now: Millis) -> bool {
        match self.armed_at {
            Some(at) if now.since(at) >= self.window_ms => {
                self.armed_at = None;
                true
            }
            _ => false,
        }
    }
}

/// Format whole seconds as `mm:ss`.
#[must_use]
pub fn format_mm_ss(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Format tenths of a second with one decimal place.
#[must_use]
pub fn format_tenths(tenths: u64) -> String {
    format!("{}.{}", tenths / 10, tenths % 10)
}
