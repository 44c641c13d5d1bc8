//! Player commands sent from the presentation layer to the session.
//!
//! Commands are queued and processed at the start of the next frame, before
//! that frame's countdown tick is evaluated.

use serde::{Deserialize, Serialize};

use crate::types::TargetId;

/// Player fire input as delivered by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FireInput {
    /// Click position in normalized device coordinates (-1..1, +y up).
    Screen { x: f32, y: f32 },
    /// The renderer already picked this target.
    Target { id: TargetId },
}

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Fire one shot.
    Fire { input: FireInput },
    /// Leave the flight (any phase) and return to the calling screen.
    Exit,
}
