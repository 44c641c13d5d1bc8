//! Encounter engine for WORMHOLE.
//!
//! Owns the hecs target world, the session clock, and the scoring state,
//! and produces SessionSnapshots for the presentation layer.

pub mod clock;
pub mod engine;
pub mod picking;
pub mod systems;
pub mod tally;
pub mod world_setup;

pub use engine::EncounterSession;
pub use picking::{PickView, RayPicker, TargetPicker};
pub use wormhole_core as core;
