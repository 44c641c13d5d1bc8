//! Events emitted by the session for presentation and navigation feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{IgnoredFire, ShotResult};
use crate::types::{FactImage, TargetId};

/// Session events drained into each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// Countdown decremented.
    Tick { time_remaining_secs: u32 },
    /// A shot was consumed.
    ShotFired {
        result: ShotResult,
        target: Option<TargetId>,
        points: u32,
        shots_remaining: u32,
    },
    /// A fire command was absorbed as a no-op.
    FireIgnored { reason: IgnoredFire },
    /// Countdown reached zero; the fact to display was chosen.
    DebriefReached { score: u32, fact: FactImage },
    /// Session torn down by the player.
    Exited { summary: DebriefSummary },
}

/// Final tally handed to the navigation collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebriefSummary {
    pub score: u32,
    pub shots_fired: u32,
    pub targets_hit: u32,
    /// `None` when the player left before the countdown ended.
    pub fact: Option<FactImage>,
}
