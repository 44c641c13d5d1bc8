//! Systems that operate on the session world each frame.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components or the session.

pub mod cleanup;
pub mod countdown;
pub mod fire;
pub mod snapshot;
