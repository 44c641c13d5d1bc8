//! Flight geometry for WORMHOLE.
//!
//! Implements the closed flight path, procedural target placement along it,
//! and the time-to-camera mapping. Pure functions over plain data, no ECS.

pub mod controller;
pub mod curve;
pub mod targets;

pub use controller::{FlightController, FlightParams};
pub use curve::PathCurve;
pub use targets::{Target, TargetField};
pub use wormhole_core as core;
