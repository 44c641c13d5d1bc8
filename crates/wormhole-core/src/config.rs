//! Runtime session configuration.
//!
//! [`SessionConfig`] mirrors the defaults in [`crate::constants`]. Missing keys
//! in a JSON config fall back to those defaults, so a minimal file can override
//! just the values you care about.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{ConfigError, SetupError};

/// Everything needed to start one flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// RNG seed for target placement and fact selection.
    pub seed: u64,
    pub duration_secs: u32,
    pub tick_interval_secs: f64,
    pub shot_budget: u32,
    pub target_count: usize,
    pub traversal_rate: f32,
    pub loop_period_secs: f32,
    pub look_ahead: f32,
    /// Viewport aspect ratio used when unprojecting screen clicks.
    pub aspect_ratio: f32,
    pub fact_images: Vec<String>,
    pub control_points: Vec<[f32; 3]>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            duration_secs: SESSION_DURATION_SECS,
            tick_interval_secs: TICK_INTERVAL_SECS,
            shot_budget: SHOT_BUDGET,
            target_count: TARGET_COUNT,
            traversal_rate: TRAVERSAL_RATE,
            loop_period_secs: LOOP_PERIOD_SECS,
            look_ahead: LOOK_AHEAD_FRACTION,
            aspect_ratio: CAMERA_ASPECT,
            fact_images: DEFAULT_FACT_IMAGES.iter().map(|s| s.to_string()).collect(),
            control_points: DEFAULT_CONTROL_POINTS.to_vec(),
        }
    }
}

impl SessionConfig {
    /// Parse a JSON config. Absent keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Check the values that are not covered by path or target-field construction.
    pub fn validate(&self) -> Result<(), SetupError> {
        // Tick interval within [MIN_TICK_INTERVAL_SECS, duration].
        if self.duration_secs == 0
            || !self.tick_interval_secs.is_finite()
            || self.tick_interval_secs < MIN_TICK_INTERVAL_SECS
            || self.tick_interval_secs > self.duration_secs as f64
        {
            return Err(SetupError::InvalidTiming {
                duration_secs: self.duration_secs,
                tick_interval_secs: self.tick_interval_secs,
            });
        }
        if !self.look_ahead.is_finite() || !(0.0..1.0).contains(&self.look_ahead) {
            return Err(SetupError::InvalidLookAhead {
                look_ahead: self.look_ahead,
            });
        }
        if !self.aspect_ratio.is_finite() || self.aspect_ratio <= 0.0 {
            return Err(SetupError::InvalidAspectRatio {
                aspect_ratio: self.aspect_ratio,
            });
        }
        if self.target_count == 0 {
            return Err(SetupError::NoTargets);
        }
        if self.fact_images.is_empty() {
            return Err(SetupError::NoFacts);
        }
        Ok(())
    }
}
