//! Time-driven camera advancement along the flight path.

use std::sync::Arc;

use wormhole_core::config::SessionConfig;
use wormhole_core::constants::{LOOK_AHEAD_FRACTION, LOOP_PERIOD_SECS, TRAVERSAL_RATE};
use wormhole_core::error::SetupError;
use wormhole_core::state::CameraPose;

use crate::curve::PathCurve;

/// Traversal tuning for the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightParams {
    /// Path-time units per second of elapsed time.
    pub traversal_rate: f32,
    /// Path-time units per loop.
    pub loop_period_secs: f32,
    /// Fraction of the loop to look ahead.
    pub look_ahead: f32,
}

impl Default for FlightParams {
    fn default() -> Self {
        Self {
            traversal_rate: TRAVERSAL_RATE,
            loop_period_secs: LOOP_PERIOD_SECS,
            look_ahead: LOOK_AHEAD_FRACTION,
        }
    }
}

impl From<&SessionConfig> for FlightParams {
    fn from(config: &SessionConfig) -> Self {
        Self {
            traversal_rate: config.traversal_rate,
            loop_period_secs: config.loop_period_secs,
            look_ahead: config.look_ahead,
        }
    }
}

/// Maps elapsed time to a camera pose on a shared, read-only path.
#[derive(Debug, Clone)]
pub struct FlightController {
    path: Arc<PathCurve>,
    params: FlightParams,
}

impl FlightController {
    pub fn new(path: Arc<PathCurve>, params: FlightParams) -> Result<Self, SetupError> {
        let valid = params.traversal_rate.is_finite()
            && params.traversal_rate >= 0.0
            && params.loop_period_secs.is_finite()
            && params.loop_period_secs > 0.0;
        if !valid {
            return Err(SetupError::InvalidFlightParams {
                traversal_rate: params.traversal_rate,
                loop_period_secs: params.loop_period_secs,
            });
        }
        if !params.look_ahead.is_finite() || !(0.0..1.0).contains(&params.look_ahead) {
            return Err(SetupError::InvalidLookAhead {
                look_ahead: params.look_ahead,
            });
        }
        Ok(Self { path, params })
    }

    pub fn path(&self) -> &Arc<PathCurve> {
        &self.path
    }

    pub fn params(&self) -> FlightParams {
        self.params
    }

    /// Seconds for one full loop.
    pub fn loop_duration_secs(&self) -> f64 {
        self.params.loop_period_secs as f64 / self.params.traversal_rate as f64
    }

    /// Path parameter in `[0, 1)` reached after `elapsed_secs`.
    pub fn parameter_at(&self, elapsed_secs: f64) -> f32 {
        // f64 keeps long sessions from losing precision before the modulo.
        let period = self.params.loop_period_secs as f64;
        let time = elapsed_secs * self.params.traversal_rate as f64;
        let p = (time.rem_euclid(period) / period) as f32;
        if p >= 1.0 {
            0.0
        } else {
            p
        }
    }

    /// Camera pose after `elapsed_secs`, looking slightly ahead along the path.
    pub fn advance(&self, elapsed_secs: f64) -> CameraPose {
        let p = self.parameter_at(elapsed_secs);
        CameraPose {
            position: self.path.position(p),
            look_at: self.path.tangent_point(p, self.params.look_ahead),
            parameter: p,
        }
    }
}
