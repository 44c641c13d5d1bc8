//! ECS components for hecs target entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::types::TargetId;

/// Scoring identity of a target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TargetInfo {
    pub id: TargetId,
    /// Points awarded on hit, in `[TARGET_POINTS_MIN, TARGET_POINTS_MAX]`.
    pub points: u32,
    /// Cleared exactly once, by a successful hit.
    pub alive: bool,
}

/// Where the target sits and how its mesh is turned.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Placement {
    pub position: Vec3,
    /// Euler angles (radians, XYZ order).
    pub rotation: Vec3,
}
