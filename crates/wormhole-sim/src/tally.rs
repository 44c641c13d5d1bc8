//! Scoring state: counters owned by the session.

/// Running score and shot budget.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    pub score: u32,
    pub shots_remaining: u32,
    pub shots_fired: u32,
    pub targets_hit: u32,
}

impl Tally {
    pub fn new(shot_budget: u32) -> Self {
        Self {
            shots_remaining: shot_budget,
            ..Default::default()
        }
    }
}
