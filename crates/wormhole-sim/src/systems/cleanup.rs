//! Cleanup system: removes targets that have been hit.

use hecs::{Entity, World};

use wormhole_core::components::TargetInfo;

/// Despawn dead targets. Uses a pre-allocated buffer to avoid per-frame allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, info) in world.query_mut::<&TargetInfo>() {
        if !info.alive {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
