//! Minute-level aggregates returned to the caller.

use super::events::{ActionEvent, EngineEvent};
use super::side::{Score, Side, SideCounts};
use crate::engine::momentum::Momentum;
use crate::engine::state::MacroState;
use crate::engine::token::SimulationToken;
use crate::engine::zone::{MacroZone, PitchZone};
use serde::{Deserialize, Serialize};

/// Per-outcome counters for one minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub shots: u32,
    pub goals: u32,
    pub fouls: u32,
    pub outs: u32,
    pub goalkeeper_restarts: u32,
    pub turnovers: u32,
}

impl OutcomeCounts {
    pub fn merge(&mut self, other: &OutcomeCounts) {
        self.shots += other.shots;
        self.goals += other.goals;
        self.fouls += other.fouls;
        self.outs += other.outs;
        self.goalkeeper_restarts += other.goalkeeper_restarts;
        self.turnovers += other.turnovers;
    }
}

/// One simulated minute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinuteSummary {
    pub minute: u32,
    pub end_state: MacroState,
    pub end_possession: Side,
    pub end_zone: MacroZone,
    pub score_delta: Score,
    pub score: Score,
    pub counts: OutcomeCounts,
    pub final_third_entries: SideCounts,
    /// Estimated seconds on the ball per side (tick granularity).
    pub possession_seconds: SideCounts,
    pub events: Vec<EngineEvent>,
    pub narrative: Vec<String>,
    /// Regulation time reached with this minute.
    pub full_time: bool,
    pub next_token: SimulationToken,
}

impl MinuteSummary {
    pub fn goals(&self) -> impl Iterator<Item = &EngineEvent> {
        self.events.iter().filter(|e| e.is_goal())
    }
}

/// Resumable state of the action simulator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ActionState {
    pub minute: u32,
    pub possession: Side,
    /// Ball zone from the possessing side's view.
    pub zone: PitchZone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<u32>,
    pub score: Score,
    pub momentum: Momentum,
}

impl ActionState {
    /// Kickoff in the centre circle.
    pub fn kickoff(possession: Side) -> Self {
        Self {
            minute: 1,
            possession,
            zone: PitchZone::MidCentre,
            carrier: None,
            score: Score::default(),
            momentum: Momentum::default(),
        }
    }
}

/// One minute of the action simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionMinute {
    pub minute: u32,
    pub actions: Vec<ActionEvent>,
    pub score_delta: Score,
    pub score: Score,
    pub counts: OutcomeCounts,
    pub next_state: ActionState,
}
