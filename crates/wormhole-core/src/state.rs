//! Session snapshot: the complete visible state handed to the presenter each frame.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::SessionPhase;
use crate::events::SessionEvent;
use crate::types::{FactImage, SimTime, TargetId};

/// Complete session state produced after each frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub time_remaining_secs: u32,
    pub shots_remaining: u32,
    pub score: u32,
    pub camera: CameraPose,
    /// Live targets only.
    pub targets: Vec<TargetView>,
    pub events: Vec<SessionEvent>,
    /// Set once Debrief is reached.
    pub fact: Option<FactImage>,
    /// Set once the player exits; the session accepts no further input.
    pub terminated: bool,
}

/// Camera placement along the flight path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
    /// Path parameter the pose was sampled at, in `[0, 1)`.
    pub parameter: f32,
}

impl CameraPose {
    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        (self.look_at - self.position).normalize_or_zero()
    }

    /// Right-handed view matrix, +Y up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.look_at, Vec3::Y)
    }
}

/// A live target as the presenter sees it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetView {
    pub id: TargetId,
    pub position: Vec3,
    pub rotation: Vec3,
    pub points: u32,
}
