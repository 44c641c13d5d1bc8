//! Encounter session: the core of the game.
//!
//! `EncounterSession` owns the hecs target world, the session clock, the
//! scoring tally, and the flight camera. It processes queued player commands,
//! advances time, and produces `SessionSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use hecs::World;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use wormhole_core::commands::{FireInput, PlayerCommand};
use wormhole_core::config::SessionConfig;
use wormhole_core::enums::{IgnoredFire, SessionPhase};
use wormhole_core::error::SetupError;
use wormhole_core::events::{DebriefSummary, SessionEvent};
use wormhole_core::state::{CameraPose, SessionSnapshot};
use wormhole_core::types::{FactImage, SimTime, TargetId};
use wormhole_flight::{FlightController, FlightParams, PathCurve, TargetField};

use crate::clock::SessionClock;
use crate::picking::{RayPicker, TargetPicker};
use crate::systems;
use crate::systems::fire::FireContext;
use crate::systems::snapshot::SnapshotContext;
use crate::tally::Tally;
use crate::world_setup;

/// ChaCha stream for session-level draws, kept apart from target placement.
const SESSION_RNG_STREAM: u64 = 1;

/// One timed flight, from start to Debrief.
pub struct EncounterSession {
    world: World,
    target_index: HashMap<TargetId, hecs::Entity>,
    path: Arc<PathCurve>,
    flight: FlightController,
    clock: SessionClock,
    time: SimTime,
    phase: SessionPhase,
    camera: CameraPose,
    tally: Tally,
    rng: ChaCha8Rng,
    picker: Box<dyn TargetPicker>,
    aspect: f32,
    fact_images: Vec<FactImage>,
    fact: Option<FactImage>,
    terminated: bool,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<SessionEvent>,
}

impl EncounterSession {
    /// Set up a session. Any precondition violation rejects the whole setup.
    pub fn new(config: SessionConfig) -> Result<Self, SetupError> {
        config.validate()?;

        let path = Arc::new(PathCurve::from_control_points(&config.control_points)?);
        let flight = FlightController::new(Arc::clone(&path), FlightParams::from(&config))?;
        let targets = TargetField::new(config.seed).generate(&path, config.target_count)?;

        let mut world = World::new();
        let target_index = world_setup::spawn_targets(&mut world, &targets);

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        rng.set_stream(SESSION_RNG_STREAM);

        log::info!(
            "flight started: {} targets, {} shots, {}s, seed {}",
            targets.len(),
            config.shot_budget,
            config.duration_secs,
            config.seed
        );

        Ok(Self {
            world,
            target_index,
            camera: flight.advance(0.0),
            path,
            flight,
            clock: SessionClock::new(config.duration_secs, config.tick_interval_secs),
            time: SimTime::default(),
            phase: SessionPhase::Flying,
            tally: Tally::new(config.shot_budget),
            rng,
            picker: Box::new(RayPicker::default()),
            aspect: config.aspect_ratio,
            fact_images: config.fact_images.into_iter().map(FactImage::new).collect(),
            fact: None,
            terminated: false,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
        })
    }

    /// Replace the hit-test used to resolve fire inputs.
    pub fn set_picker(&mut self, picker: impl TargetPicker + 'static) {
        self.picker = Box::new(picker);
    }

    /// Same as [`Self::set_picker`] for a picker chosen at runtime.
    pub fn set_boxed_picker(&mut self, picker: Box<dyn TargetPicker>) {
        self.picker = picker;
    }

    /// Builder form of [`Self::set_picker`].
    pub fn with_picker(mut self, picker: impl TargetPicker + 'static) -> Self {
        self.set_picker(picker);
        self
    }

    /// Queue a player command for processing at the start of the next frame.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Shorthand for queueing a fire command.
    pub fn fire(&mut self, input: FireInput) {
        self.queue_command(PlayerCommand::Fire { input });
    }

    /// Advance the session by `dt_secs` and return the resulting snapshot.
    ///
    /// Queued commands are applied first, so a shot fired in the same frame
    /// as a tick is scored before the tick is evaluated.
    pub fn advance(&mut self, dt_secs: f64) -> SessionSnapshot {
        self.process_commands();

        if self.phase == SessionPhase::Flying && !self.terminated {
            self.run_systems(dt_secs);
        }

        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotContext {
                time: self.time,
                phase: self.phase,
                time_remaining_secs: self.clock.time_remaining_secs(),
                camera: self.camera,
                tally: &self.tally,
                fact: self.fact.as_ref(),
                terminated: self.terminated,
            },
            events,
        )
    }

    /// Advance by exactly one countdown tick.
    pub fn tick(&mut self) -> SessionSnapshot {
        self.advance(self.clock.tick_interval_secs())
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn score(&self) -> u32 {
        self.tally.score
    }

    pub fn shots_remaining(&self) -> u32 {
        self.tally.shots_remaining
    }

    pub fn time_remaining_secs(&self) -> u32 {
        self.clock.time_remaining_secs()
    }

    pub fn camera(&self) -> CameraPose {
        self.camera
    }

    pub fn path(&self) -> &Arc<PathCurve> {
        &self.path
    }

    /// The fact chosen on reaching Debrief.
    pub fn fact(&self) -> Option<&FactImage> {
        self.fact.as_ref()
    }

    pub fn fact_images(&self) -> &[FactImage] {
        &self.fact_images
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Final tally for the navigation collaborator.
    pub fn summary(&self) -> DebriefSummary {
        DebriefSummary {
            score: self.tally.score,
            shots_fired: self.tally.shots_fired,
            targets_hit: self.tally.targets_hit,
            fact: self.fact.clone(),
        }
    }

    /// Override a target's point value (for tests needing known scores).
    #[cfg(test)]
    pub fn set_target_points(&mut self, id: TargetId, points: u32) {
        if let Some(&entity) = self.target_index.get(&id) {
            if let Ok(mut info) = self
                .world
                .get::<&mut wormhole_core::components::TargetInfo>(entity)
            {
                info.points = points;
            }
        }
    }

    /// Get a read-only reference to the session clock.
    #[cfg(test)]
    pub fn clock(&self) -> &SessionClock {
        &self.clock
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        if self.terminated {
            log::debug!("command after exit ignored: {:?}", command);
            return;
        }

        match command {
            PlayerCommand::Fire { input } => {
                if self.phase != SessionPhase::Flying {
                    log::debug!("fire ignored: session over");
                    self.events.push(SessionEvent::FireIgnored {
                        reason: IgnoredFire::SessionOver,
                    });
                    return;
                }
                let ctx = FireContext {
                    picker: self.picker.as_ref(),
                    camera: self.camera,
                    aspect: self.aspect,
                    index: &self.target_index,
                };
                systems::fire::run(
                    &mut self.world,
                    &ctx,
                    &input,
                    &mut self.tally,
                    &mut self.events,
                );
            }
            PlayerCommand::Exit => self.exit(),
        }
    }

    /// Run one frame of flight: camera, then countdown, then the deadline check.
    fn run_systems(&mut self, dt_secs: f64) {
        let dt = if dt_secs.is_finite() { dt_secs.max(0.0) } else { 0.0 };

        // 1. Flight camera
        self.time.advance(dt);
        self.camera = self.flight.advance(self.time.elapsed_secs);

        // 2. Countdown ticks
        let update = self.clock.advance(dt);
        let deadline = systems::countdown::run(&self.clock, update, &mut self.events);

        // 3. Deadline, checked after every batch of ticks
        if deadline {
            self.enter_debrief();
        }
    }

    /// Flying → Debrief. Happens once; freezes scoring and removes all targets.
    fn enter_debrief(&mut self) {
        if self.phase == SessionPhase::Debrief {
            return;
        }
        self.phase = SessionPhase::Debrief;
        world_setup::clear_targets(&mut self.world, &mut self.target_index);

        let fact = self.fact_images[self.rng.gen_range(0..self.fact_images.len())].clone();
        log::info!(
            "countdown over: score {}, {} of {} shots hit, fact {}",
            self.tally.score,
            self.tally.targets_hit,
            self.tally.shots_fired,
            fact.as_str()
        );
        self.fact = Some(fact.clone());
        self.events.push(SessionEvent::DebriefReached {
            score: self.tally.score,
            fact,
        });
    }

    /// Tear the session down. Valid in any phase; later calls do nothing.
    fn exit(&mut self) {
        self.clock.cancel();
        world_setup::clear_targets(&mut self.world, &mut self.target_index);
        self.terminated = true;

        let summary = self.summary();
        log::info!("flight exited with score {}", summary.score);
        self.events.push(SessionEvent::Exited { summary });
    }
}
