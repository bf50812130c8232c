//! Macro phases of play and possession directives.

use super::zone::MacroZone;
use crate::models::Side;
use serde::{Deserialize, Serialize};

/// 매크로 상태 (phase of play)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MacroState {
    Kickoff,
    OpenPlayDef,
    OpenPlayMid,
    OpenPlayFinal,
    Shot,
    Out,
    Foul,
    Gk,
}

impl MacroState {
    pub const ALL: [MacroState; 8] = [
        MacroState::Kickoff,
        MacroState::OpenPlayDef,
        MacroState::OpenPlayMid,
        MacroState::OpenPlayFinal,
        MacroState::Shot,
        MacroState::Out,
        MacroState::Foul,
        MacroState::Gk,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MacroState::Kickoff => "KICKOFF",
            MacroState::OpenPlayDef => "OPEN_PLAY_DEF",
            MacroState::OpenPlayMid => "OPEN_PLAY_MID",
            MacroState::OpenPlayFinal => "OPEN_PLAY_FINAL",
            MacroState::Shot => "SHOT",
            MacroState::Out => "OUT",
            MacroState::Foul => "FOUL",
            MacroState::Gk => "GK",
        }
    }

    pub fn from_name(name: &str) -> Option<MacroState> {
        MacroState::ALL.iter().copied().find(|s| s.name() == name)
    }

    /// Stable byte code used when hashing minute seeds.
    pub fn code(&self) -> u8 {
        match self {
            MacroState::Kickoff => 0,
            MacroState::OpenPlayDef => 1,
            MacroState::OpenPlayMid => 2,
            MacroState::OpenPlayFinal => 3,
            MacroState::Shot => 4,
            MacroState::Out => 5,
            MacroState::Foul => 6,
            MacroState::Gk => 7,
        }
    }

    /// Resolved through a dedicated outcome table within a single tick.
    pub fn is_terminal(&self) -> bool {
        matches!(self, MacroState::Shot | MacroState::Out | MacroState::Foul | MacroState::Gk)
    }

    pub fn is_open_play(&self) -> bool {
        matches!(self, MacroState::OpenPlayDef | MacroState::OpenPlayMid | MacroState::OpenPlayFinal)
    }

    /// Open-play phase for a macro-zone.
    pub fn open_play(zone: MacroZone) -> MacroState {
        match zone {
            MacroZone::Def => MacroState::OpenPlayDef,
            MacroZone::Mid => MacroState::OpenPlayMid,
            MacroZone::Final => MacroState::OpenPlayFinal,
        }
    }
}

impl std::fmt::Display for MacroState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Who holds the ball after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PossessionDirective {
    Retain,
    Flip,
}

impl PossessionDirective {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "retain" => Some(PossessionDirective::Retain),
            "flip" => Some(PossessionDirective::Flip),
            _ => None,
        }
    }

    pub fn apply(&self, possession: Side) -> Side {
        match self {
            PossessionDirective::Retain => possession,
            PossessionDirective::Flip => possession.flip(),
        }
    }
}
