//! Per-tick and per-action event records

use super::player::PlayerSnapshot;
use super::side::Side;
use crate::engine::state::MacroState;
use crate::engine::zone::{MacroZone, PitchZone};
use serde::{Deserialize, Serialize};

/// Identity of the player behind an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorRef {
    pub id: u32,
    pub name: String,
    pub side: Side,
}

impl ActorRef {
    pub fn from_player(player: &PlayerSnapshot, side: Side) -> Self {
        Self { id: player.id, name: player.name.clone(), side }
    }
}

/// One macro tick. Immutable once emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineEvent {
    pub tick: u32,
    pub from: MacroState,
    pub to: MacroState,
    /// Side in possession after the tick.
    pub possession: Side,
    pub zone: MacroZone,
    pub turnover: bool,
    /// e.g. `SHOT:goal`, `FOUL:retain`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<ActorRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

impl EngineEvent {
    pub fn is_goal(&self) -> bool {
        self.outcome.as_deref() == Some("SHOT:goal")
    }

    /// Side that had the ball when the tick started.
    pub fn acting_side(&self) -> Side {
        if self.turnover {
            self.possession.flip()
        } else {
            self.possession
        }
    }
}

/// Action type in the action-level simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Pass,
    LongPass,
    Dribble,
    Shot,
    LongShot,
    Tackle,
    Foul,
    Interception,
}

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Pass => "pass",
            ActionKind::LongPass => "long_pass",
            ActionKind::Dribble => "dribble",
            ActionKind::Shot => "shot",
            ActionKind::LongShot => "long_shot",
            ActionKind::Tackle => "tackle",
            ActionKind::Foul => "foul",
            ActionKind::Interception => "interception",
        }
    }

    pub fn is_shot(&self) -> bool {
        matches!(self, ActionKind::Shot | ActionKind::LongShot)
    }
}

/// One resolved action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEvent {
    pub index: u32,
    pub side: Side,
    pub kind: ActionKind,
    pub success: bool,
    /// Zone the action started from, seen from `side`.
    pub zone: PitchZone,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<ActorRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ActorRef>,
    #[serde(default)]
    pub goal: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
}
