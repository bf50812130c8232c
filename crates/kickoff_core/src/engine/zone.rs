//! Pitch zone model
//!
//! 피치는 골키퍼 존 + 5개 라인 x 3개 채널(좌/중/우)로 나뉜다. 모든 존은
//! 공격하는 팀 기준으로 표현되며, 소유권이 넘어가면 `mirror()`로 관점을 뒤집는다.
//!
//! Each fine zone maps to one of three macro-zones (DEF/MID/FINAL) used by
//! the macro state machine.

use super::state::MacroState;
use serde::{Deserialize, Serialize};

/// Coarse third of the pitch, seen from the side in possession.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MacroZone {
    Def,
    Mid,
    Final,
}

impl MacroZone {
    pub const ALL: [MacroZone; 3] = [MacroZone::Def, MacroZone::Mid, MacroZone::Final];

    /// Zone implied by a phase. Shot/out/foul keep whatever zone play was in.
    pub fn from_state(state: MacroState) -> Option<MacroZone> {
        match state {
            MacroState::OpenPlayDef | MacroState::Gk => Some(MacroZone::Def),
            MacroState::OpenPlayMid | MacroState::Kickoff => Some(MacroZone::Mid),
            MacroState::OpenPlayFinal => Some(MacroZone::Final),
            MacroState::Shot | MacroState::Out | MacroState::Foul => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MacroZone::Def => "DEF",
            MacroZone::Mid => "MID",
            MacroZone::Final => "FINAL",
        }
    }

    pub fn from_name(name: &str) -> Option<MacroZone> {
        MacroZone::ALL.iter().copied().find(|z| z.name() == name)
    }

    pub fn code(&self) -> u8 {
        match self {
            MacroZone::Def => 0,
            MacroZone::Mid => 1,
            MacroZone::Final => 2,
        }
    }

    /// Same physical third seen from the other side.
    pub fn mirror(&self) -> MacroZone {
        match self {
            MacroZone::Def => MacroZone::Final,
            MacroZone::Mid => MacroZone::Mid,
            MacroZone::Final => MacroZone::Def,
        }
    }

    /// Representative fine zone when dropping from macro to action level.
    pub fn entry_zone(&self) -> PitchZone {
        match self {
            MacroZone::Def => PitchZone::DefenseCentre,
            MacroZone::Mid => PitchZone::MidCentre,
            MacroZone::Final => PitchZone::AttackingMidCentre,
        }
    }
}

/// Line (depth) of a fine zone, 0 = own goalkeeper, 5 = forward line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneLine {
    Goalkeeper,
    Defense,
    DefensiveMid,
    Mid,
    AttackingMid,
    Forward,
}

impl ZoneLine {
    pub fn depth(&self) -> u8 {
        match self {
            ZoneLine::Goalkeeper => 0,
            ZoneLine::Defense => 1,
            ZoneLine::DefensiveMid => 2,
            ZoneLine::Mid => 3,
            ZoneLine::AttackingMid => 4,
            ZoneLine::Forward => 5,
        }
    }

    pub fn from_depth(depth: u8) -> ZoneLine {
        match depth {
            0 => ZoneLine::Goalkeeper,
            1 => ZoneLine::Defense,
            2 => ZoneLine::DefensiveMid,
            3 => ZoneLine::Mid,
            4 => ZoneLine::AttackingMid,
            _ => ZoneLine::Forward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Left,
    Centre,
    Right,
}

impl Channel {
    fn index(&self) -> i8 {
        match self {
            Channel::Left => 0,
            Channel::Centre => 1,
            Channel::Right => 2,
        }
    }

    fn mirror(&self) -> Channel {
        match self {
            Channel::Left => Channel::Right,
            Channel::Centre => Channel::Centre,
            Channel::Right => Channel::Left,
        }
    }
}

/// Coarse pass length bucket derived from zone distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassDistance {
    Short,
    Medium,
    Long,
}

/// Named fine-grained pitch region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchZone {
    Goalkeeper,
    DefenseLeft,
    DefenseCentre,
    DefenseRight,
    DefensiveMidLeft,
    DefensiveMidCentre,
    DefensiveMidRight,
    MidLeft,
    MidCentre,
    MidRight,
    AttackingMidLeft,
    AttackingMidCentre,
    AttackingMidRight,
    ForwardLeft,
    ForwardCentre,
    ForwardRight,
}

impl PitchZone {
    pub fn from_parts(line: ZoneLine, channel: Channel) -> PitchZone {
        use Channel::*;
        match (line, channel) {
            (ZoneLine::Goalkeeper, _) => PitchZone::Goalkeeper,
            (ZoneLine::Defense, Left) => PitchZone::DefenseLeft,
            (ZoneLine::Defense, Centre) => PitchZone::DefenseCentre,
            (ZoneLine::Defense, Right) => PitchZone::DefenseRight,
            (ZoneLine::DefensiveMid, Left) => PitchZone::DefensiveMidLeft,
            (ZoneLine::DefensiveMid, Centre) => PitchZone::DefensiveMidCentre,
            (ZoneLine::DefensiveMid, Right) => PitchZone::DefensiveMidRight,
            (ZoneLine::Mid, Left) => PitchZone::MidLeft,
            (ZoneLine::Mid, Centre) => PitchZone::MidCentre,
            (ZoneLine::Mid, Right) => PitchZone::MidRight,
            (ZoneLine::AttackingMid, Left) => PitchZone::AttackingMidLeft,
            (ZoneLine::AttackingMid, Centre) => PitchZone::AttackingMidCentre,
            (ZoneLine::AttackingMid, Right) => PitchZone::AttackingMidRight,
            (ZoneLine::Forward, Left) => PitchZone::ForwardLeft,
            (ZoneLine::Forward, Centre) => PitchZone::ForwardCentre,
            (ZoneLine::Forward, Right) => PitchZone::ForwardRight,
        }
    }

    /// Stable byte code used when hashing action seeds.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn line(&self) -> ZoneLine {
        match self {
            PitchZone::Goalkeeper => ZoneLine::Goalkeeper,
            PitchZone::DefenseLeft | PitchZone::DefenseCentre | PitchZone::DefenseRight => {
                ZoneLine::Defense
            }
            PitchZone::DefensiveMidLeft
            | PitchZone::DefensiveMidCentre
            | PitchZone::DefensiveMidRight => ZoneLine::DefensiveMid,
            PitchZone::MidLeft | PitchZone::MidCentre | PitchZone::MidRight => ZoneLine::Mid,
            PitchZone::AttackingMidLeft
            | PitchZone::AttackingMidCentre
            | PitchZone::AttackingMidRight => ZoneLine::AttackingMid,
            PitchZone::ForwardLeft | PitchZone::ForwardCentre | PitchZone::ForwardRight => {
                ZoneLine::Forward
            }
        }
    }

    pub fn channel(&self) -> Channel {
        match self {
            PitchZone::DefenseLeft
            | PitchZone::DefensiveMidLeft
            | PitchZone::MidLeft
            | PitchZone::AttackingMidLeft
            | PitchZone::ForwardLeft => Channel::Left,
            PitchZone::DefenseRight
            | PitchZone::DefensiveMidRight
            | PitchZone::MidRight
            | PitchZone::AttackingMidRight
            | PitchZone::ForwardRight => Channel::Right,
            _ => Channel::Centre,
        }
    }

    pub fn macro_zone(&self) -> MacroZone {
        match self.line() {
            ZoneLine::Goalkeeper | ZoneLine::Defense => MacroZone::Def,
            ZoneLine::DefensiveMid | ZoneLine::Mid => MacroZone::Mid,
            ZoneLine::AttackingMid | ZoneLine::Forward => MacroZone::Final,
        }
    }

    pub fn is_central(&self) -> bool {
        self.channel() == Channel::Centre
    }

    /// Same physical region seen from the opponent's side.
    pub fn mirror(&self) -> PitchZone {
        let depth = self.line().depth();
        PitchZone::from_parts(ZoneLine::from_depth(5 - depth), self.channel().mirror())
    }

    /// One line closer to the opponent goal, same channel.
    pub fn advance(&self) -> PitchZone {
        match self.line() {
            ZoneLine::Goalkeeper => PitchZone::DefenseCentre,
            ZoneLine::Forward => *self,
            line => PitchZone::from_parts(ZoneLine::from_depth(line.depth() + 1), self.channel()),
        }
    }

    pub fn retreat(&self) -> PitchZone {
        match self.line() {
            ZoneLine::Goalkeeper | ZoneLine::Defense => PitchZone::from_parts(
                ZoneLine::Defense,
                self.channel(),
            ),
            line => PitchZone::from_parts(ZoneLine::from_depth(line.depth() - 1), self.channel()),
        }
    }

    /// Move across to another channel on the same line.
    pub fn switch_to(&self, channel: Channel) -> PitchZone {
        PitchZone::from_parts(self.line(), channel)
    }

    /// 0.0 at own goalkeeper zone, 1.0 on the forward line.
    pub fn goal_proximity(&self) -> f32 {
        self.line().depth() as f32 / 5.0
    }

    pub fn pass_distance(&self, to: PitchZone) -> PassDistance {
        let lines = (self.line().depth() as i8 - to.line().depth() as i8).abs();
        let channels = (self.channel().index() - to.channel().index()).abs();
        match lines + channels {
            0 | 1 => PassDistance::Short,
            2 => PassDistance::Medium,
            _ => PassDistance::Long,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PitchZone::Goalkeeper => "the goalkeeper's area",
            PitchZone::DefenseLeft | PitchZone::DefenseRight => "the full-back channel",
            PitchZone::DefenseCentre => "the heart of defence",
            PitchZone::DefensiveMidLeft
            | PitchZone::DefensiveMidCentre
            | PitchZone::DefensiveMidRight => "in front of the back line",
            PitchZone::MidLeft | PitchZone::MidRight => "the wide midfield",
            PitchZone::MidCentre => "the centre circle",
            PitchZone::AttackingMidLeft | PitchZone::AttackingMidRight => "the wide attacking areas",
            PitchZone::AttackingMidCentre => "the space behind the striker",
            PitchZone::ForwardLeft | PitchZone::ForwardRight => "the edge of the box",
            PitchZone::ForwardCentre => "the penalty area",
        }
    }
}
