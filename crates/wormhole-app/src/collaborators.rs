//! Interfaces the game loop hands frames and outcomes to.
//!
//! A renderer implements `Presenter` (and usually a `TargetPicker`), a UI
//! layer implements `FactDisplay` and `Navigator`. The `Log*` versions back
//! the headless binary.

use wormhole_core::error::SetupError;
use wormhole_core::events::DebriefSummary;
use wormhole_core::state::SessionSnapshot;
use wormhole_core::types::FactImage;
use wormhole_sim::TargetPicker;

/// How a session ended, as reported to the navigator.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The countdown ran out and the player left from Debrief.
    Completed { summary: DebriefSummary },
    /// The player left mid-flight.
    Exited { summary: DebriefSummary },
    /// Setup failed; no session ever ran.
    Rejected { error: SetupError },
}

impl SessionOutcome {
    pub fn summary(&self) -> Option<&DebriefSummary> {
        match self {
            Self::Completed { summary } | Self::Exited { summary } => Some(summary),
            Self::Rejected { .. } => None,
        }
    }
}

/// Receives every frame's camera pose and live targets.
pub trait Presenter: Send {
    fn present_frame(&mut self, snapshot: &SessionSnapshot);
}

/// Shows the fact chosen at Debrief.
pub trait FactDisplay: Send {
    fn show_fact(&mut self, fact: &FactImage);
}

/// Returns the user to the previous screen.
pub trait Navigator: Send {
    fn return_to_menu(&mut self, outcome: &SessionOutcome);
}

/// Everything the loop talks to, bundled for the spawn call.
pub struct Collaborators {
    pub presenter: Box<dyn Presenter>,
    pub fact_display: Box<dyn FactDisplay>,
    pub navigator: Box<dyn Navigator>,
    /// `None` keeps the session's built-in ray picker.
    pub picker: Option<Box<dyn TargetPicker>>,
}

impl Collaborators {
    /// Log-backed collaborators for headless runs.
    pub fn logging() -> Self {
        Self {
            presenter: Box::new(LogPresenter::default()),
            fact_display: Box::new(LogFactDisplay),
            navigator: Box::new(LogNavigator),
            picker: None,
        }
    }
}

/// Logs the countdown and score whenever either changes.
#[derive(Debug, Default)]
pub struct LogPresenter {
    last: Option<(u32, u32, u32)>,
}

impl Presenter for LogPresenter {
    fn present_frame(&mut self, snapshot: &SessionSnapshot) {
        let current = (
            snapshot.time_remaining_secs,
            snapshot.score,
            snapshot.shots_remaining,
        );
        if self.last == Some(current) {
            return;
        }
        self.last = Some(current);
        log::info!(
            "{:>2}s left | score {} | shots {} | {} targets | p={:.3}",
            snapshot.time_remaining_secs,
            snapshot.score,
            snapshot.shots_remaining,
            snapshot.targets.len(),
            snapshot.camera.parameter
        );
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogFactDisplay;

impl FactDisplay for LogFactDisplay {
    fn show_fact(&mut self, fact: &FactImage) {
        log::info!("fact: {}", fact.as_str());
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn return_to_menu(&mut self, outcome: &SessionOutcome) {
        match outcome {
            SessionOutcome::Completed { summary } => {
                log::info!("back to menu: final score {}", summary.score)
            }
            SessionOutcome::Exited { summary } => {
                log::info!("back to menu: left early with {} points", summary.score)
            }
            SessionOutcome::Rejected { error } => {
                log::warn!("back to menu: session could not start ({error})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_summary() {
        let summary = DebriefSummary {
            score: 12,
            shots_fired: 5,
            targets_hit: 3,
            fact: Some(FactImage::new("/fact2.jpg")),
        };
        let done = SessionOutcome::Completed {
            summary: summary.clone(),
        };
        assert_eq!(done.summary(), Some(&summary));

        let rejected = SessionOutcome::Rejected {
            error: SetupError::NoTargets,
        };
        assert!(rejected.summary().is_none());
    }

    #[test]
    fn test_log_presenter_dedupes_frames() {
        let mut presenter = LogPresenter::default();
        let snapshot = SessionSnapshot {
            time_remaining_secs: 30,
            shots_remaining: 5,
            ..Default::default()
        };
        presenter.present_frame(&snapshot);
        assert_eq!(presenter.last, Some((30, 0, 5)));
        presenter.present_frame(&snapshot);
        assert_eq!(presenter.last, Some((30, 0, 5)));
    }
}
