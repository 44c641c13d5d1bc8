//! WORMHOLE frame-loop host.
//!
//! Runs an encounter session on its own thread and forwards each frame to
//! the presentation collaborators.

pub mod collaborators;
pub mod config;
pub mod game_loop;
pub mod state;

pub use wormhole_core as core;
