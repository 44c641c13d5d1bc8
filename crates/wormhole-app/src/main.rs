//! wormhole: headless fly-through with a scripted pilot.
//!
//! Usage:
//!   wormhole [--config session.json] [--seed N] [--time-scale X]
//!
//! The pilot fires at screen center every couple of seconds, then leaves
//! shortly after the debrief appears.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context};

use wormhole_app::collaborators::{Collaborators, SessionOutcome};
use wormhole_app::config::AppConfig;
use wormhole_app::game_loop;
use wormhole_core::commands::{FireInput, PlayerCommand};
use wormhole_core::enums::SessionPhase;

/// Simulated seconds between scripted shots.
const AUTO_FIRE_INTERVAL_SECS: f64 = 2.5;
/// Seconds at 1x speed the debrief stays up before the pilot leaves.
const DEBRIEF_LINGER_SECS: f64 = 3.0;

#[derive(Debug, Default)]
struct CliArgs {
    config: Option<PathBuf>,
    seed: Option<u64>,
    time_scale: Option<f64>,
    help: bool,
}

impl CliArgs {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut parsed = Self::default();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" => {
                    i += 1;
                    let value = args.get(i).context("--config needs a path")?;
                    parsed.config = Some(PathBuf::from(value));
                }
                "--seed" => {
                    i += 1;
                    let value = args.get(i).context("--seed needs a value")?;
                    parsed.seed = Some(value.parse().with_context(|| format!("bad seed: {value}"))?);
                }
                "--time-scale" => {
                    i += 1;
                    let value = args.get(i).context("--time-scale needs a value")?;
                    parsed.time_scale =
                        Some(value.parse().with_context(|| format!("bad time scale: {value}"))?);
                }
                "help" | "--help" | "-h" => parsed.help = true,
                other => bail!("unknown argument: {other}"),
            }
            i += 1;
        }
        Ok(parsed)
    }

    fn resolve(&self) -> anyhow::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => AppConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.session.seed = seed;
        }
        if let Some(time_scale) = self.time_scale {
            config.time_scale = time_scale;
        }
        Ok(config.sanitized())
    }
}

fn print_usage() {
    eprintln!(
        "wormhole: headless wormhole fly-through\n\
         \n\
           --config <path>     JSON config (session settings, frame_rate, time_scale)\n\
           --seed <N>          Seed for target placement and fact choice\n\
           --time-scale <X>    Wall-clock speed multiplier (default: 1.0)\n"
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = CliArgs::parse(&args)?;
    if cli.help {
        print_usage();
        return Ok(());
    }
    let config = cli.resolve()?;

    let poll = Duration::from_secs_f64(config.frame_dt() / config.time_scale);
    // Sim time stops at Debrief, so the linger runs on wall time.
    let linger = Duration::from_secs_f64(DEBRIEF_LINGER_SECS / config.time_scale);
    let handle = game_loop::spawn_game_loop(config, Collaborators::logging())
        .context("failed to spawn game loop thread")?;

    let mut next_shot = AUTO_FIRE_INTERVAL_SECS;
    let mut leave_at = None;
    while !handle.is_finished() {
        std::thread::sleep(poll);
        let Some(snapshot) = handle.latest_snapshot() else {
            continue;
        };
        let elapsed = snapshot.time.elapsed_secs;

        match snapshot.phase {
            SessionPhase::Flying if elapsed >= next_shot && snapshot.shots_remaining > 0 => {
                next_shot += AUTO_FIRE_INTERVAL_SECS;
                handle.send(PlayerCommand::Fire {
                    input: FireInput::Screen { x: 0.0, y: 0.0 },
                });
            }
            SessionPhase::Flying => {}
            SessionPhase::Debrief => {
                let leave_at = *leave_at.get_or_insert_with(|| Instant::now() + linger);
                if Instant::now() >= leave_at {
                    handle.send(PlayerCommand::Exit);
                }
            }
        }
    }

    let outcome = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    match outcome {
        SessionOutcome::Rejected { error } => Err(error).context("session could not start"),
        SessionOutcome::Completed { summary } | SessionOutcome::Exited { summary } => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            Ok(())
        }
    }
}
