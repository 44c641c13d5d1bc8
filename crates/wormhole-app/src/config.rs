//! Host configuration: the session settings plus frame pacing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use wormhole_core::config::SessionConfig;
use wormhole_core::constants::FRAME_RATE;
use wormhole_core::error::ConfigError;

/// Slowest allowed playback speed.
const MIN_TIME_SCALE: f64 = 0.01;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    /// Frames per second of the loop thread.
    pub frame_rate: u32,
    /// Wall-clock speed multiplier. 2.0 runs the 30 s flight in 15 s.
    pub time_scale: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            frame_rate: FRAME_RATE,
            time_scale: 1.0,
        }
    }
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Simulated seconds per frame.
    pub fn frame_dt(&self) -> f64 {
        1.0 / self.frame_rate.max(1) as f64
    }

    /// Replace unusable pacing values with defaults.
    pub fn sanitized(mut self) -> Self {
        if self.frame_rate == 0 {
            log::warn!("frame_rate 0 is not usable, falling back to {FRAME_RATE}");
            self.frame_rate = FRAME_RATE;
        }
        if !self.time_scale.is_finite() || self.time_scale < MIN_TIME_SCALE {
            log::warn!("time_scale {} is not usable, falling back to 1.0", self.time_scale);
            self.time_scale = 1.0;
        }
        self
    }
}
