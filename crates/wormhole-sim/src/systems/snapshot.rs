//! Snapshot system: builds a complete SessionSnapshot from the world.

use hecs::World;

use wormhole_core::components::{Placement, TargetInfo};
use wormhole_core::enums::SessionPhase;
use wormhole_core::events::SessionEvent;
use wormhole_core::state::{CameraPose, SessionSnapshot, TargetView};
use wormhole_core::types::{FactImage, SimTime};

use crate::tally::Tally;

/// Everything the snapshot needs that does not live in the world.
pub struct SnapshotContext<'a> {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub time_remaining_secs: u32,
    pub camera: CameraPose,
    pub tally: &'a Tally,
    pub fact: Option<&'a FactImage>,
    pub terminated: bool,
}

/// Build the snapshot for the current frame. Targets are ordered by identity.
pub fn build_snapshot(
    world: &World,
    ctx: SnapshotContext<'_>,
    events: Vec<SessionEvent>,
) -> SessionSnapshot {
    let mut targets: Vec<TargetView> = world
        .query::<(&TargetInfo, &Placement)>()
        .iter()
        .filter(|(_entity, (info, _placement))| info.alive)
        .map(|(_entity, (info, placement))| TargetView {
            id: info.id,
            position: placement.position,
            rotation: placement.rotation,
            points: info.points,
        })
        .collect();
    targets.sort_by_key(|t| t.id);

    SessionSnapshot {
        time: ctx.time,
        phase: ctx.phase,
        time_remaining_secs: ctx.time_remaining_secs,
        shots_remaining: ctx.tally.shots_remaining,
        score: ctx.tally.score,
        camera: ctx.camera,
        targets,
        events,
        fact: ctx.fact.cloned(),
        terminated: ctx.terminated,
    }
}
