//! Countdown system: turns clock updates into tick events.

use wormhole_core::events::SessionEvent;

use crate::clock::{ClockUpdate, SessionClock};

/// Emit a `Tick` event for each crossed tick that changes the visible
/// countdown, in order. Returns whether the deadline was reached, which the
/// caller checks after the ticks are applied.
pub fn run(clock: &SessionClock, update: ClockUpdate, events: &mut Vec<SessionEvent>) -> bool {
    let last = clock.ticks_fired();
    let first = last + 1 - update.ticks;
    let mut shown = clock.remaining_after_tick(first - 1);
    for n in first..=last {
        let remaining = clock.remaining_after_tick(n);
        if remaining != shown {
            events.push(SessionEvent::Tick {
                time_remaining_secs: remaining,
            });
            shown = remaining;
        }
    }
    update.deadline_reached
}
