//! Procedural target placement along the flight path.
//!
//! Targets are spread evenly by index around the loop, nudged forward by a
//! small random parameter offset, then pushed sideways on X and Z so they do
//! not all sit on the centerline.

use std::f32::consts::PI;

use glam::Vec3;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use wormhole_core::constants::*;
use wormhole_core::error::SetupError;
use wormhole_core::types::TargetId;

use crate::curve::PathCurve;

/// A scorable asteroid as generated, before it enters the session world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub id: TargetId,
    pub position: Vec3,
    /// Euler angles for the mesh, each in `[0, PI)`.
    pub rotation: Vec3,
    pub points: u32,
    pub alive: bool,
}

/// Seeded target generator. Owns its RNG so a seed fully determines the field.
#[derive(Debug, Clone)]
pub struct TargetField {
    rng: ChaCha8Rng,
}

impl TargetField {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Generate `count` targets along `path`.
    pub fn generate(&mut self, path: &PathCurve, count: usize) -> Result<Vec<Target>, SetupError> {
        generate(path, count, &mut self.rng)
    }
}

/// Generate exactly `count` targets with identities `0..count`.
pub fn generate(
    path: &PathCurve,
    count: usize,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<Target>, SetupError> {
    if count == 0 {
        return Err(SetupError::NoTargets);
    }

    let targets: Vec<Target> = (0..count)
        .map(|i| {
            let jitter: f32 = rng.gen_range(0.0..TARGET_PARAM_JITTER);
            let p = (i as f32 / count as f32 + jitter).rem_euclid(1.0);

            let mut position = path.position(p);
            position.x += rng.gen_range(TARGET_LATERAL_OFFSET_MIN..TARGET_LATERAL_OFFSET_MAX);
            position.z += rng.gen_range(TARGET_LATERAL_OFFSET_MIN..TARGET_LATERAL_OFFSET_MAX);

            let rotation = Vec3::new(
                rng.gen_range(0.0..PI),
                rng.gen_range(0.0..PI),
                rng.gen_range(0.0..PI),
            );

            Target {
                id: TargetId(i as u32),
                position,
                rotation,
                points: rng.gen_range(TARGET_POINTS_MIN..=TARGET_POINTS_MAX),
                alive: true,
            }
        })
        .collect();

    log::debug!(
        "generated {} targets worth {} points",
        targets.len(),
        targets.iter().map(|t| t.points).sum::<u32>()
    );
    Ok(targets)
}
