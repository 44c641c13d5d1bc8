//! State shared between the game loop thread and whoever drives it.

use std::sync::{Arc, Mutex};

use wormhole_core::commands::PlayerCommand;
use wormhole_core::state::SessionSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the session.
    Player(PlayerCommand),
    /// Tear the session down and stop the loop.
    Shutdown,
}

/// Latest snapshot, written by the loop thread after every frame.
pub type SharedSnapshot = Arc<Mutex<Option<SessionSnapshot>>>;

pub fn new_shared_snapshot() -> SharedSnapshot {
    Arc::new(Mutex::new(None))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_snapshot_starts_empty() {
        let shared = new_shared_snapshot();
        assert!(shared.lock().unwrap().is_none());

        *shared.lock().unwrap() = Some(SessionSnapshot::default());
        let clone = Arc::clone(&shared);
        assert!(clone.lock().unwrap().is_some());
    }
}
