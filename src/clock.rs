//! Simulated day clock.
//!
//! Days are not wall-clock time: one "day" elapses after a configured number
//! of poll-loop passes.  The counter is monotonic within a day and rollover
//! subtracts the threshold instead of resetting to zero, so passes that
//! accumulate past the threshold (e.g. while the user is mid-edit) are never
//! lost.

/// Loop-pass counter with subtract-on-fire day rollover.
#[derive(Debug, Clone)]
pub struct DayClock {
    counter: u64,
    ticks_per_day: u64,
}

impl DayClock {
    pub fn new(ticks_per_day: u64) -> Self {
        Self {
            counter: 0,
            ticks_per_day,
        }
    }

    /// Record one poll-loop pass.  Called exactly once per service tick,
    /// in every phase.
    pub fn record_tick(&mut self) {
        self.counter += 1;
    }

    /// If at least one full day has accumulated, consume it and return true.
    ///
    /// Consumes exactly one day per call; overshoot stays in the counter, so
    /// a backlog built up during editing drains one day per subsequent call.
    pub fn try_roll_over(&mut self) -> bool {
        if self.counter >= self.ticks_per_day {
            self.counter -= self.ticks_per_day;
            true
        } else {
            false
        }
    }

    /// Current residual tick count (for diagnostics and events).
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn ticks_per_day(&self) -> u64 {
        self.ticks_per_day
    }
}
