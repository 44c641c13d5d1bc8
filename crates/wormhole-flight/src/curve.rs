//! Closed Catmull-Rom flight path with arc-length parameterization.
//!
//! `p` maps to distance travelled along the loop, so a constant rate of
//! change in `p` moves the camera at constant speed regardless of how the
//! control points are spaced.

use glam::Vec3;

use wormhole_core::constants::{
    ARC_LENGTH_DIVISIONS, MIN_CONTROL_POINTS, SPLINE_TENSION, TANGENT_EPSILON,
};
use wormhole_core::error::SetupError;

/// Immutable closed spline through a fixed set of control points.
#[derive(Debug, Clone)]
pub struct PathCurve {
    points: Vec<Vec3>,
    tension: f32,
    /// Cumulative length at each of `ARC_LENGTH_DIVISIONS + 1` evenly spaced raw parameters.
    arc_lengths: Vec<f32>,
}

impl PathCurve {
    /// Build a closed path. Needs at least two distinct control points.
    pub fn new(points: Vec<Vec3>) -> Result<Self, SetupError> {
        if points.len() < MIN_CONTROL_POINTS {
            return Err(SetupError::TooFewControlPoints {
                count: points.len(),
                min: MIN_CONTROL_POINTS,
            });
        }

        let mut curve = Self {
            points,
            tension: SPLINE_TENSION,
            arc_lengths: Vec::with_capacity(ARC_LENGTH_DIVISIONS + 1),
        };
        curve.build_arc_lengths();

        let total = curve.length();
        if !total.is_finite() || total <= f32::EPSILON {
            return Err(SetupError::DegeneratePath);
        }
        Ok(curve)
    }

    /// Build from `[x, y, z]` triples, the configuration format.
    pub fn from_control_points(points: &[[f32; 3]]) -> Result<Self, SetupError> {
        Self::new(points.iter().copied().map(Vec3::from_array).collect())
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Total loop length in world units.
    pub fn length(&self) -> f32 {
        self.arc_lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at normalized parameter `p`. Periodic: `p` is wrapped into `[0, 1)`.
    pub fn position(&self, p: f32) -> Vec3 {
        self.raw_point(self.arc_to_raw(wrap(p)))
    }

    /// Point `look_ahead` further along the loop than `p`.
    pub fn tangent_point(&self, p: f32, look_ahead: f32) -> Vec3 {
        self.position(wrap(p + look_ahead))
    }

    /// Unit direction of travel at `p`.
    pub fn tangent_direction(&self, p: f32) -> Vec3 {
        let a = self.position(p - TANGENT_EPSILON);
        let b = self.position(p + TANGENT_EPSILON);
        (b - a).normalize_or_zero()
    }

    /// Sample the spline at a raw (segment-uniform) parameter in `[0, 1)`.
    fn raw_point(&self, t: f32) -> Vec3 {
        let n = self.points.len();
        let scaled = wrap(t) * n as f32;
        let segment = scaled.floor();
        let local = scaled - segment;
        let i = (segment as usize) % n;

        catmull_rom(
            self.points[(i + n - 1) % n],
            self.points[i],
            self.points[(i + 1) % n],
            self.points[(i + 2) % n],
            local,
            self.tension,
        )
    }

    fn build_arc_lengths(&mut self) {
        self.arc_lengths.clear();
        self.arc_lengths.push(0.0);
        let mut total = 0.0;
        let mut last = self.raw_point(0.0);
        for k in 1..=ARC_LENGTH_DIVISIONS {
            // The last sample closes the loop back at the first control point.
            let t = k as f32 / ARC_LENGTH_DIVISIONS as f32;
            let point = if k == ARC_LENGTH_DIVISIONS {
                self.raw_point(0.0)
            } else {
                self.raw_point(t)
            };
            total += point.distance(last);
            self.arc_lengths.push(total);
            last = point;
        }
    }

    /// Map a distance fraction `u` to the raw parameter covering that distance.
    fn arc_to_raw(&self, u: f32) -> f32 {
        let target = u * self.length();
        // Index of the last table entry <= target.
        let upper = self.arc_lengths.partition_point(|&len| len <= target);
        let i = upper.saturating_sub(1).min(ARC_LENGTH_DIVISIONS - 1);

        let before = self.arc_lengths[i];
        let span = self.arc_lengths[i + 1] - before;
        let fraction = if span > 0.0 {
            ((target - before) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (i as f32 + fraction) / ARC_LENGTH_DIVISIONS as f32
    }
}

/// Wrap into `[0, 1)`. `rem_euclid` can round up to exactly 1.0 for tiny negatives.
fn wrap(p: f32) -> f32 {
    let w = p.rem_euclid(1.0);
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}

/// Cubic Hermite form of a Catmull-Rom segment from `p1` to `p2`.
fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32, tension: f32) -> Vec3 {
    let v0 = (p2 - p0) * tension;
    let v1 = (p3 - p1) * tension;

    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    p1 * h00 + v0 * h10 + p2 * h01 + v1 * h11
}
