//! Resumable glide
//!
//! A glide spans many scheduler ticks. Each tick calls [`advance`] with the
//! same call-site slot; the slot holds the [`GlideState`] captured on the
//! first tick and the position is recomputed from elapsed wall-clock time.
//! Tick count never enters the interpolation.

use std::collections::HashMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::state::MotionTarget;
use super::timer::{Clock, Timer};

/// Outcome of one tick of a multi-tick block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Still running; re-invoke this call site on a later tick
    Continuing,
    /// Finished; the call site's state is gone
    Done,
}

impl Step {
    pub fn is_done(self) -> bool {
        self == Step::Done
    }
}

/// Per-call-site state of a glide in progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlideState {
    pub timer: Timer,
    pub duration_ms: f64,
    /// Position captured on the first tick; never recaptured
    pub start: DVec2,
    pub end: DVec2,
}

impl GlideState {
    /// Interpolated position for `elapsed_ms`, or None once the glide is over
    pub fn position_at(&self, elapsed_ms: f64) -> Option<DVec2> {
        if elapsed_ms < self.duration_ms {
            let frac = (elapsed_ms / self.duration_ms).max(0.0);
            Some(self.start + frac * (self.end - self.start))
        } else {
            None
        }
    }
}

/// Run one tick of a glide toward `end` over `duration_secs`.
///
/// `slot` must be empty on the first tick of a gesture. It is filled while the
/// glide runs and emptied again when this returns [`Step::Done`]. A
/// non-positive duration jumps straight to `end` without touching the slot.
pub fn advance<T: MotionTarget + ?Sized>(
    slot: &mut Option<GlideState>,
    clock: &dyn Clock,
    duration_secs: f64,
    end: DVec2,
    target: &mut T,
) -> Step {
    let Some(state) = *slot else {
        if duration_secs <= 0.0 {
            target.set_position(end);
            return Step::Done;
        }
        let state = GlideState {
            timer: Timer::start(clock),
            duration_ms: duration_secs * 1000.0,
            start: target.position(),
            end,
        };
        log::debug!(
            "glide start ({:.2}, {:.2}) -> ({:.2}, {:.2}) over {}s",
            state.start.x,
            state.start.y,
            end.x,
            end.y,
            duration_secs
        );
        *slot = Some(state);
        return Step::Continuing;
    };

    match state.position_at(state.timer.elapsed_ms(clock)) {
        Some(pos) => {
            target.set_position(pos);
            Step::Continuing
        }
        None => {
            // Land exactly on the end point, not on the last interpolated value
            target.set_position(state.end);
            log::debug!("glide done at ({:.2}, {:.2})", state.end.x, state.end.y);
            *slot = None;
            Step::Done
        }
    }
}

/// Identity of the program location driving a gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CallSiteId(pub u64);

/// Gesture state keyed by call site
///
/// The scheduler owns key stability: it reuses an id across the ticks of one
/// gesture and calls [`GlideSlots::abandon`] when it tears a call site down.
#[derive(Debug, Clone, Default)]
pub struct GlideSlots {
    slots: HashMap<CallSiteId, GlideState>,
}

impl GlideSlots {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one tick of the glide at `site`
    pub fn advance<T: MotionTarget + ?Sized>(
        &mut self,
        site: CallSiteId,
        clock: &dyn Clock,
        duration_secs: f64,
        end: DVec2,
        target: &mut T,
    ) -> Step {
        let mut slot = self.slots.remove(&site);
        let step = advance(&mut slot, clock, duration_secs, end, target);
        if let Some(state) = slot {
            self.slots.insert(site, state);
        }
        step
    }

    /// Take the slot for `site` out of the store, leaving it empty.
    ///
    /// Callers that need to run their own logic between ticks pair this with
    /// [`GlideSlots::put`].
    pub fn take(&mut self, site: CallSiteId) -> Option<GlideState> {
        self.slots.remove(&site)
    }

    /// Store a slot back; an empty slot clears the call site
    pub fn put(&mut self, site: CallSiteId, slot: Option<GlideState>) {
        match slot {
            Some(state) => {
                self.slots.insert(site, state);
            }
            None => {
                self.slots.remove(&site);
            }
        }
    }

    pub fn get(&self, site: CallSiteId) -> Option<&GlideState> {
        self.slots.get(&site)
    }

    pub fn is_active(&self, site: CallSiteId) -> bool {
        self.slots.contains_key(&site)
    }

    /// Drop a gesture the scheduler gave up on
    pub fn abandon(&mut self, site: CallSiteId) -> bool {
        let dropped = self.slots.remove(&site).is_some();
        if dropped {
            log::debug!("glide at call site {} abandoned", site.0);
        }
        dropped
    }

    /// Drop every gesture (e.g. when the project stops)
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
