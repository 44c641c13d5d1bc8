//! Game loop thread: drives one encounter session at a fixed frame rate.
//!
//! The session is created inside this thread because it's cleaner for
//! ownership. Commands arrive via `mpsc` channel. Every frame's snapshot goes
//! to the presenter and into shared state for synchronous polling. The thread
//! ends when the session terminates; `Shutdown` or a dropped sender turn into
//! an exit so teardown always runs the same way.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use wormhole_core::commands::PlayerCommand;
use wormhole_core::enums::SessionPhase;
use wormhole_core::events::SessionEvent;
use wormhole_core::state::SessionSnapshot;
use wormhole_sim::EncounterSession;

use crate::collaborators::{Collaborators, FactDisplay, Navigator, Presenter, SessionOutcome};
use crate::config::AppConfig;
use crate::state::{new_shared_snapshot, GameLoopCommand, SharedSnapshot};

/// Frames the loop may fall behind before it stops trying to catch up.
const MAX_FRAME_LAG: u32 = 2;

/// One session plus the collaborators it reports to. Knows nothing about threads.
pub struct FrameRunner {
    session: EncounterSession,
    presenter: Box<dyn Presenter>,
    fact_display: Box<dyn FactDisplay>,
    navigator: Box<dyn Navigator>,
}

impl FrameRunner {
    /// Build the session. On rejection the navigator is told and the outcome returned.
    pub fn new(config: &AppConfig, collaborators: Collaborators) -> Result<Self, SessionOutcome> {
        let Collaborators {
            presenter,
            fact_display,
            mut navigator,
            picker,
        } = collaborators;

        let mut session = match EncounterSession::new(config.session.clone()) {
            Ok(session) => session,
            Err(error) => {
                log::warn!("session setup rejected: {error}");
                let outcome = SessionOutcome::Rejected { error };
                navigator.return_to_menu(&outcome);
                return Err(outcome);
            }
        };
        if let Some(picker) = picker {
            session.set_boxed_picker(picker);
        }

        Ok(Self {
            session,
            presenter,
            fact_display,
            navigator,
        })
    }

    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.session.queue_command(command);
    }

    pub fn session(&self) -> &EncounterSession {
        &self.session
    }

    /// Advance one frame and hand the result to the collaborators.
    ///
    /// Returns the outcome once the session has terminated.
    pub fn frame(&mut self, dt_secs: f64) -> (SessionSnapshot, Option<SessionOutcome>) {
        let snapshot = self.session.advance(dt_secs);
        self.presenter.present_frame(&snapshot);

        let mut outcome = None;
        for event in &snapshot.events {
            match event {
                SessionEvent::DebriefReached { fact, .. } => self.fact_display.show_fact(fact),
                SessionEvent::Exited { summary } => {
                    let summary = summary.clone();
                    outcome = Some(match snapshot.phase {
                        SessionPhase::Debrief => SessionOutcome::Completed { summary },
                        SessionPhase::Flying => SessionOutcome::Exited { summary },
                    });
                }
                _ => {}
            }
        }

        if let Some(outcome) = &outcome {
            self.navigator.return_to_menu(outcome);
        }
        (snapshot, outcome)
    }
}

/// Handle to a running game loop thread.
pub struct GameLoopHandle {
    command_tx: mpsc::Sender<GameLoopCommand>,
    latest_snapshot: SharedSnapshot,
    thread: JoinHandle<SessionOutcome>,
}

impl GameLoopHandle {
    /// Forward a player command. Returns `false` once the loop has stopped.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::Player(command))
            .is_ok()
    }

    /// A clone of the command sender for other producers.
    pub fn sender(&self) -> mpsc::Sender<GameLoopCommand> {
        self.command_tx.clone()
    }

    pub fn latest_snapshot(&self) -> Option<SessionSnapshot> {
        self.latest_snapshot
            .lock()
            .ok()
            .and_then(|lock| lock.clone())
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Wait for the session to end on its own.
    pub fn join(self) -> std::thread::Result<SessionOutcome> {
        self.thread.join()
    }

    /// Ask the loop to tear the session down, then wait for it.
    pub fn shutdown(self) -> std::thread::Result<SessionOutcome> {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        self.thread.join()
    }
}

/// Spawns the game loop in a new thread.
pub fn spawn_game_loop(
    config: AppConfig,
    collaborators: Collaborators,
) -> std::io::Result<GameLoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = new_shared_snapshot();
    let shared = SharedSnapshot::clone(&latest_snapshot);
    let config = config.sanitized();

    let thread = std::thread::Builder::new()
        .name("wormhole-game-loop".into())
        .spawn(move || run_game_loop(&config, collaborators, cmd_rx, &shared))?;

    Ok(GameLoopHandle {
        command_tx: cmd_tx,
        latest_snapshot,
        thread,
    })
}

/// The game loop. Runs until the session terminates.
fn run_game_loop(
    config: &AppConfig,
    collaborators: Collaborators,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &SharedSnapshot,
) -> SessionOutcome {
    let mut runner = match FrameRunner::new(config, collaborators) {
        Ok(runner) => runner,
        Err(outcome) => return outcome,
    };

    let dt = config.frame_dt();
    let frame_duration = Duration::from_secs_f64(dt / config.time_scale);
    let mut next_frame_time = Instant::now();
    let mut exit_requested = false;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(command)) => runner.queue_command(command),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    if !exit_requested {
                        log::debug!("game loop asked to stop");
                        runner.queue_command(PlayerCommand::Exit);
                        exit_requested = true;
                    }
                    break;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one frame
        let (snapshot, outcome) = runner.frame(dt);

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if let Some(outcome) = outcome {
            return outcome;
        }

        // 4. Sleep until the next frame, scaled by time_scale
        next_frame_time += frame_duration;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > frame_duration * MAX_FRAME_LAG {
            // Too far behind, reset to avoid catch-up spiral
            next_frame_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use wormhole_core::commands::FireInput;
    use wormhole_core::config::SessionConfig;
    use wormhole_core::error::SetupError;
    use wormhole_core::types::{FactImage, TargetId};

    #[derive(Default)]
    struct Record {
        frames: usize,
        facts: Vec<FactImage>,
        outcomes: Vec<SessionOutcome>,
    }

    type Shared = Arc<Mutex<Record>>;

    struct RecordingPresenter(Shared);
    struct RecordingFacts(Shared);
    struct RecordingNavigator(Shared);

    impl Presenter for RecordingPresenter {
        fn present_frame(&mut self, _snapshot: &SessionSnapshot) {
            self.0.lock().unwrap().frames += 1;
        }
    }

    impl FactDisplay for RecordingFacts {
        fn show_fact(&mut self, fact: &FactImage) {
            self.0.lock().unwrap().facts.push(fact.clone());
        }
    }

    impl Navigator for RecordingNavigator {
        fn return_to_menu(&mut self, outcome: &SessionOutcome) {
            self.0.lock().unwrap().outcomes.push(outcome.clone());
        }
    }

    fn recording() -> (Collaborators, Shared) {
        let record = Shared::default();
        let collaborators = Collaborators {
            presenter: Box::new(RecordingPresenter(Arc::clone(&record))),
            fact_display: Box::new(RecordingFacts(Arc::clone(&record))),
            navigator: Box::new(RecordingNavigator(Arc::clone(&record))),
            picker: None,
        };
        (collaborators, record)
    }

    fn fast_config() -> AppConfig {
        AppConfig {
            time_scale: 50.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Player(PlayerCommand::Fire {
            input: FireInput::Screen { x: 0.0, y: 0.0 },
        }))
        .unwrap();
        tx.send(GameLoopCommand::Player(PlayerCommand::Exit)).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Player(PlayerCommand::Fire { .. })
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Player(PlayerCommand::Exit)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_runner_full_flight_then_exit() {
        let (collaborators, record) = recording();
        let mut runner = FrameRunner::new(&AppConfig::default(), collaborators).unwrap();

        runner.queue_command(PlayerCommand::Fire {
            input: FireInput::Target { id: TargetId(0) },
        });
        for _ in 0..30 {
            let (_snapshot, outcome) = runner.frame(1.0);
            assert!(outcome.is_none());
        }
        assert_eq!(runner.session().phase(), SessionPhase::Debrief);

        // Idle Debrief frames show nothing new.
        runner.frame(1.0);
        assert_eq!(record.lock().unwrap().facts.len(), 1);

        runner.queue_command(PlayerCommand::Exit);
        let (snapshot, outcome) = runner.frame(1.0);
        assert!(snapshot.terminated);

        let record = record.lock().unwrap();
        assert_eq!(record.frames, 32);
        assert_eq!(record.outcomes.len(), 1);
        let outcome = outcome.unwrap();
        assert_eq!(record.outcomes[0], outcome);
        match outcome {
            SessionOutcome::Completed { summary } => {
                assert!(summary.score > 0);
                assert_eq!(summary.shots_fired, 1);
                assert_eq!(summary.fact.as_ref(), Some(&record.facts[0]));
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[test]
    fn test_runner_exit_mid_flight() {
        let (collaborators, record) = recording();
        let mut runner = FrameRunner::new(&AppConfig::default(), collaborators).unwrap();
        runner.frame(5.0);
        runner.queue_command(PlayerCommand::Exit);
        let (_snapshot, outcome) = runner.frame(1.0 / 60.0);
        assert!(matches!(outcome, Some(SessionOutcome::Exited { .. })));
        assert!(record.lock().unwrap().facts.is_empty());
    }

    #[test]
    fn test_rejected_setup_returns_to_menu() {
        let (collaborators, record) = recording();
        let config = AppConfig {
            session: SessionConfig {
                target_count: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        let handle = spawn_game_loop(config, collaborators).unwrap();
        let outcome = handle.join().unwrap();
        assert_eq!(
            outcome,
            SessionOutcome::Rejected {
                error: SetupError::NoTargets
            }
        );
        let record = record.lock().unwrap();
        assert_eq!(record.outcomes, vec![outcome]);
        assert_eq!(record.frames, 0);
    }

    #[test]
    fn test_shutdown_exits_session() {
        let (collaborators, record) = recording();
        let handle = spawn_game_loop(fast_config(), collaborators).unwrap();
        assert!(handle.send(PlayerCommand::Fire {
            input: FireInput::Target { id: TargetId(1) },
        }));

        let outcome = handle.shutdown().unwrap();
        let summary = outcome.summary().cloned().unwrap();
        // The fire was queued first, so it lands before the exit.
        assert_eq!(summary.shots_fired, 1);
        assert_eq!(record.lock().unwrap().outcomes.len(), 1);
    }

    #[test]
    fn test_dropped_sender_still_tears_down() {
        let (collaborators, _record) = recording();
        let handle = spawn_game_loop(fast_config(), collaborators).unwrap();
        let GameLoopHandle {
            command_tx, thread, ..
        } = handle;
        drop(command_tx);
        let outcome = thread.join().unwrap();
        assert!(outcome.summary().is_some());
    }

    #[test]
    fn test_latest_snapshot_is_published() {
        let (collaborators, _record) = recording();
        let handle = spawn_game_loop(fast_config(), collaborators).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        let mut seen = None;
        while Instant::now() < deadline {
            if let Some(snapshot) = handle.latest_snapshot() {
                seen = Some(snapshot);
                break;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        let snapshot = seen.expect("loop should publish a snapshot");
        assert_eq!(snapshot.shots_remaining, 5);
        handle.shutdown().unwrap();
    }
}
