//! Elapsed-time measurement for gestures
//!
//! A [`Timer`] only records when it was started; the time itself comes from a
//! [`Clock`], so tests can drive gestures with a [`ManualClock`].

use std::cell::Cell;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock backed by [`Instant`]
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ms(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance_ms(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Stopwatch started once per gesture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timer {
    start_ms: f64,
}

impl Timer {
    /// Start a new stopwatch at the clock's current time
    pub fn start(clock: &dyn Clock) -> Self {
        Self {
            start_ms: clock.now_ms(),
        }
    }

    /// Milliseconds since [`Timer::start`]
    pub fn elapsed_ms(&self, clock: &dyn Clock) -> f64 {
        clock.now_ms() - self.start_ms
    }
}
