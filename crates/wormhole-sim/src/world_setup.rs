//! Entity spawn factories for the session world.
//!
//! Turns a generated target field into hecs entities with
//! `TargetInfo` and `Placement` component bundles.

use std::collections::HashMap;

use hecs::World;

use wormhole_core::components::{Placement, TargetInfo};
use wormhole_core::types::TargetId;
use wormhole_flight::Target;

/// Spawn every target and return the identity → entity index.
pub fn spawn_targets(world: &mut World, targets: &[Target]) -> HashMap<TargetId, hecs::Entity> {
    targets
        .iter()
        .map(|target| (target.id, spawn_target(world, target)))
        .collect()
}

/// Spawn a single target entity.
pub fn spawn_target(world: &mut World, target: &Target) -> hecs::Entity {
    world.spawn((
        TargetInfo {
            id: target.id,
            points: target.points,
            alive: target.alive,
        },
        Placement {
            position: target.position,
            rotation: target.rotation,
        },
    ))
}

/// Remove every target from play.
pub fn clear_targets(world: &mut World, index: &mut HashMap<TargetId, hecs::Entity>) {
    world.clear();
    index.clear();
}
