//! Hit testing: turning a fire input into an optional target identity.
//!
//! The session only sees the `TargetPicker` interface, so it stays
//! independent of any renderer. `RayPicker` is a geometric fallback that
//! unprojects screen clicks through the flight camera.

use glam::{Mat4, Vec3};

use wormhole_core::commands::FireInput;
use wormhole_core::constants::*;
use wormhole_core::state::CameraPose;
use wormhole_core::types::TargetId;

/// A live target that can be picked.
#[derive(Debug, Clone, Copy)]
pub struct PickCandidate {
    pub id: TargetId,
    pub position: Vec3,
}

/// What the picker may look at when resolving a shot.
#[derive(Debug, Clone, Copy)]
pub struct PickView<'a> {
    pub camera: CameraPose,
    /// Viewport width / height.
    pub aspect: f32,
    /// Live targets only.
    pub targets: &'a [PickCandidate],
}

/// Resolves a fire input to the identity of the target under it, if any.
pub trait TargetPicker: Send {
    fn pick(&self, input: &FireInput, view: &PickView<'_>) -> Option<TargetId>;
}

impl<F> TargetPicker for F
where
    F: Fn(&FireInput, &PickView<'_>) -> Option<TargetId> + Send,
{
    fn pick(&self, input: &FireInput, view: &PickView<'_>) -> Option<TargetId> {
        self(input, view)
    }
}

/// Casts a ray from the camera through the click and returns the nearest
/// target whose bounding sphere it crosses.
#[derive(Debug, Clone, Copy)]
pub struct RayPicker {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Sphere radius used for intersection.
    pub hit_radius: f32,
}

impl Default for RayPicker {
    fn default() -> Self {
        Self {
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            hit_radius: TARGET_RADIUS + PICK_MARGIN,
        }
    }
}

impl RayPicker {
    /// World-space ray (origin, unit direction) through normalized device coords.
    pub fn screen_ray(&self, camera: &CameraPose, aspect: f32, x: f32, y: f32) -> Option<(Vec3, Vec3)> {
        let projection = Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            aspect.max(f32::EPSILON),
            self.near,
            self.far,
        );
        let inverse = (projection * camera.view_matrix()).inverse();

        // perspective_rh maps depth to [0, 1].
        let near = inverse.project_point3(Vec3::new(x, y, 0.0));
        let far = inverse.project_point3(Vec3::new(x, y, 1.0));
        let direction = (far - near).normalize_or_zero();
        if direction == Vec3::ZERO || !near.is_finite() {
            return None;
        }
        Some((near, direction))
    }
}

impl TargetPicker for RayPicker {
    fn pick(&self, input: &FireInput, view: &PickView<'_>) -> Option<TargetId> {
        match *input {
            FireInput::Target { id } => Some(id),
            FireInput::Screen { x, y } => {
                let (origin, direction) = self.screen_ray(&view.camera, view.aspect, x, y)?;
                view.targets
                    .iter()
                    .filter_map(|candidate| {
                        ray_sphere(origin, direction, candidate.position, self.hit_radius)
                            .filter(|&distance| distance <= self.far)
                            .map(|distance| (distance, candidate.id))
                    })
                    .min_by(|a, b| a.0.total_cmp(&b.0))
                    .map(|(_, id)| id)
            }
        }
    }
}

/// Distance along the ray to the first intersection with a sphere, if ahead of the origin.
fn ray_sphere(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let to_center = center - origin;
    let along = to_center.dot(direction);
    let miss_sq = to_center.length_squared() - along * along;
    let radius_sq = radius * radius;
    if miss_sq > radius_sq {
        return None;
    }
    let half_chord = (radius_sq - miss_sq).sqrt();
    let entry = along - half_chord;
    let exit = along + half_chord;
    if exit < 0.0 {
        None
    } else {
        Some(entry.max(0.0))
    }
}
