//! Core types and definitions for the WORMHOLE flight mini-game.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, session snapshots, events, configuration,
//! errors, and constants. It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
