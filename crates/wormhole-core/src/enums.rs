//! Enumeration types used throughout the session.

use serde::{Deserialize, Serialize};

/// Session phase. `Debrief` is terminal within a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Flying,
    Debrief,
}

/// Result of a single fire event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShotResult {
    Hit,
    Miss,
}

/// Why a fire event was absorbed without consuming a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoredFire {
    /// Shot budget exhausted.
    NoShotsLeft,
    /// Countdown already ended.
    SessionOver,
}
