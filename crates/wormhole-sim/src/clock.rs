//! Session clock: one authoritative deadline plus a repeating countdown tick.
//!
//! The visible countdown is derived from the same elapsed time that decides
//! the deadline, so the two can never disagree about when the flight ends.
//! The last tick and the deadline always land on the same `advance` call.

use wormhole_core::constants::CLOCK_EPSILON_SECS;

/// What happened during one `SessionClock::advance`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockUpdate {
    /// Countdown ticks crossed, in order.
    pub ticks: u32,
    /// The deadline was crossed (reported exactly once).
    pub deadline_reached: bool,
}

#[derive(Debug, Clone)]
pub struct SessionClock {
    elapsed_secs: f64,
    duration_secs: f64,
    tick_interval_secs: f64,
    /// Tick `k` fires at `min(k * interval, duration)`; the last one is the deadline.
    total_ticks: u32,
    ticks_fired: u32,
    cancelled: bool,
}

impl SessionClock {
    /// Callers validate that both values are positive.
    pub fn new(duration_secs: u32, tick_interval_secs: f64) -> Self {
        let duration = duration_secs as f64;
        let total_ticks = ((duration - CLOCK_EPSILON_SECS) / tick_interval_secs)
            .ceil()
            .max(1.0) as u32;
        Self {
            elapsed_secs: 0.0,
            duration_secs: duration,
            tick_interval_secs,
            total_ticks,
            ticks_fired: 0,
            cancelled: false,
        }
    }

    /// Move the clock forward by `dt` seconds.
    pub fn advance(&mut self, dt: f64) -> ClockUpdate {
        if self.cancelled || self.is_expired() || !dt.is_finite() || dt <= 0.0 {
            return ClockUpdate::default();
        }

        self.elapsed_secs += dt;
        let due = if self.elapsed_secs + CLOCK_EPSILON_SECS >= self.duration_secs {
            self.total_ticks
        } else {
            let whole = ((self.elapsed_secs + CLOCK_EPSILON_SECS) / self.tick_interval_secs).floor();
            (whole as u32).min(self.total_ticks - 1)
        };

        let ticks = due.saturating_sub(self.ticks_fired);
        self.ticks_fired = self.ticks_fired.max(due);
        ClockUpdate {
            ticks,
            deadline_reached: ticks > 0 && self.is_expired(),
        }
    }

    /// Stop the clock. No further ticks or deadline will be reported.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// The deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.ticks_fired >= self.total_ticks
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn tick_interval_secs(&self) -> f64 {
        self.tick_interval_secs
    }

    pub fn ticks_fired(&self) -> u32 {
        self.ticks_fired
    }

    /// Whole seconds left on the countdown as of the last tick. Zero at the deadline.
    pub fn time_remaining_secs(&self) -> u32 {
        self.remaining_after_tick(self.ticks_fired)
    }

    /// Countdown value immediately after the `n`th tick (`0` = before the first).
    pub fn remaining_after_tick(&self, n: u32) -> u32 {
        if n >= self.total_ticks {
            return 0;
        }
        let at = n as f64 * self.tick_interval_secs;
        (self.duration_secs - at - CLOCK_EPSILON_SECS).ceil().max(0.0) as u32
    }
}
