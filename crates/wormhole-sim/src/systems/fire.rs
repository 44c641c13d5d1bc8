//! Fire resolution: consumes a shot, asks the picker what was hit, scores it.

use std::collections::HashMap;

use hecs::World;

use wormhole_core::commands::FireInput;
use wormhole_core::components::{Placement, TargetInfo};
use wormhole_core::enums::{IgnoredFire, ShotResult};
use wormhole_core::events::SessionEvent;
use wormhole_core::state::CameraPose;
use wormhole_core::types::TargetId;

use crate::picking::{PickCandidate, PickView, TargetPicker};
use crate::tally::Tally;

/// Read-only inputs for resolving one shot.
pub struct FireContext<'a> {
    pub picker: &'a dyn TargetPicker,
    pub camera: CameraPose,
    pub aspect: f32,
    pub index: &'a HashMap<TargetId, hecs::Entity>,
}

/// Resolve one fire event. Callers only invoke this while flying.
pub fn run(
    world: &mut World,
    ctx: &FireContext<'_>,
    input: &FireInput,
    tally: &mut Tally,
    events: &mut Vec<SessionEvent>,
) {
    if tally.shots_remaining == 0 {
        log::debug!("fire ignored: no shots left");
        events.push(SessionEvent::FireIgnored {
            reason: IgnoredFire::NoShotsLeft,
        });
        return;
    }

    // The shot is spent whether or not it connects.
    tally.shots_remaining -= 1;
    tally.shots_fired += 1;

    let candidates = live_candidates(world);
    let view = PickView {
        camera: ctx.camera,
        aspect: ctx.aspect,
        targets: &candidates,
    };
    let picked = ctx.picker.pick(input, &view);

    let awarded = picked.and_then(|id| kill_target(world, ctx.index, id));
    let (result, points) = match awarded {
        Some(points) => {
            tally.score += points;
            tally.targets_hit += 1;
            log::debug!("hit target {:?} for {points} points", picked);
            (ShotResult::Hit, points)
        }
        None => {
            log::debug!("miss (picked {:?})", picked);
            (ShotResult::Miss, 0)
        }
    };

    events.push(SessionEvent::ShotFired {
        result,
        target: picked,
        points,
        shots_remaining: tally.shots_remaining,
    });
}

/// Live targets as pick candidates, ordered by identity.
pub fn live_candidates(world: &World) -> Vec<PickCandidate> {
    let mut query = world.query::<(&TargetInfo, &Placement)>();
    let mut candidates: Vec<PickCandidate> = query
        .iter()
        .filter(|(_entity, (info, _placement))| info.alive)
        .map(|(_entity, (info, placement))| PickCandidate {
            id: info.id,
            position: placement.position,
        })
        .collect();
    candidates.sort_by_key(|c| c.id);
    candidates
}

/// Flip a live target to dead and return its points. `None` if unknown or already dead.
fn kill_target(
    world: &mut World,
    index: &HashMap<TargetId, hecs::Entity>,
    id: TargetId,
) -> Option<u32> {
    let entity = *index.get(&id)?;
    let mut info = world.get::<&mut TargetInfo>(entity).ok()?;
    if !info.alive {
        return None;
    }
    info.alive = false;
    Some(info.points)
}
