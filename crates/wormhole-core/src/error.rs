//! Error types for session setup and configuration loading.
//!
//! Only construction can fail. Once a session is flying, invalid input is
//! absorbed as a no-op and never surfaces as an error.

use thiserror::Error;

/// A session could not be set up; no flight is started.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    #[error("flight path needs at least {min} control points, got {count}")]
    TooFewControlPoints { count: usize, min: usize },
    #[error("flight path has zero length")]
    DegeneratePath,
    #[error("target count must be positive")]
    NoTargets,
    #[error("invalid session timing: duration {duration_secs}s, tick interval {tick_interval_secs}s")]
    InvalidTiming {
        duration_secs: u32,
        tick_interval_secs: f64,
    },
    #[error("invalid flight parameters: rate {traversal_rate}, loop period {loop_period_secs}")]
    InvalidFlightParams {
        traversal_rate: f32,
        loop_period_secs: f32,
    },
    #[error("look-ahead must be a finite fraction in [0, 1), got {look_ahead}")]
    InvalidLookAhead { look_ahead: f32 },
    #[error("aspect ratio must be finite and positive, got {aspect_ratio}")]
    InvalidAspectRatio { aspect_ratio: f32 },
    #[error("fact set is empty")]
    NoFacts,
}

/// Failure to read or parse a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
