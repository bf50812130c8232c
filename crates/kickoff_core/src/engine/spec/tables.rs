//! Validated, typed Markov tables.

use crate::engine::state::{MacroState, PossessionDirective};
use crate::engine::zone::MacroZone;
use serde::{Deserialize, Serialize};

/// Ticks in one simulated minute.
pub const TICKS_PER_MINUTE: u32 = 6;

/// Shot outcome label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotResult {
    Goal,
    Save,
    Block,
    Miss,
    Corner,
    Woodwork,
}

impl ShotResult {
    pub const ALL: [ShotResult; 6] = [
        ShotResult::Goal,
        ShotResult::Save,
        ShotResult::Block,
        ShotResult::Miss,
        ShotResult::Corner,
        ShotResult::Woodwork,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShotResult::Goal => "goal",
            ShotResult::Save => "save",
            ShotResult::Block => "block",
            ShotResult::Miss => "miss",
            ShotResult::Corner => "corner",
            ShotResult::Woodwork => "woodwork",
        }
    }

    pub fn from_name(name: &str) -> Option<ShotResult> {
        ShotResult::ALL.iter().copied().find(|r| r.name() == name)
    }

    /// Restart used when the document row leaves `to`/`possession` out.
    pub fn default_restart(&self) -> (MacroState, PossessionDirective) {
        use PossessionDirective::*;
        match self {
            ShotResult::Goal => (MacroState::Kickoff, Flip),
            ShotResult::Save => (MacroState::Gk, Flip),
            ShotResult::Block => (MacroState::OpenPlayDef, Flip),
            ShotResult::Miss => (MacroState::Gk, Flip),
            ShotResult::Corner => (MacroState::OpenPlayFinal, Retain),
            ShotResult::Woodwork => (MacroState::OpenPlayFinal, Retain),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub to: MacroState,
    pub possession: PossessionDirective,
    pub p: f64,
}

impl Transition {
    /// Moves play forward while the same side keeps the ball.
    pub fn is_advancing_from(&self, from: MacroState) -> bool {
        self.possession == PossessionDirective::Retain
            && matches!(
                (from, self.to),
                (MacroState::OpenPlayMid, MacroState::OpenPlayFinal)
                    | (MacroState::OpenPlayFinal, MacroState::Shot)
            )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShotOutcome {
    pub result: ShotResult,
    pub to: MacroState,
    pub possession: PossessionDirective,
    pub p: f64,
}

/// Zone-conditioned tables for OUT and FOUL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneTables {
    pub def: Vec<Transition>,
    pub mid: Vec<Transition>,
    #[serde(rename = "final")]
    pub final_third: Vec<Transition>,
}

impl ZoneTables {
    pub fn get(&self, zone: MacroZone) -> &[Transition] {
        match zone {
            MacroZone::Def => &self.def,
            MacroZone::Mid => &self.mid,
            MacroZone::Final => &self.final_third,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateTable {
    Transitions(Vec<Transition>),
    ByZone(ZoneTables),
    Outcomes(Vec<ShotOutcome>),
}

/// Validated state machine. Only [`super::validate`] builds one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkovSpec {
    version: u32,
    tick_seconds: u32,
    regulation_minutes: u32,
    /// Indexed by [`MacroState::code`].
    tables: Vec<StateTable>,
}

impl MarkovSpec {
    pub(super) fn from_validated(
        version: u32,
        tick_seconds: u32,
        regulation_minutes: u32,
        tables: Vec<StateTable>,
    ) -> Self {
        debug_assert_eq!(tables.len(), MacroState::ALL.len());
        Self { version, tick_seconds, regulation_minutes, tables }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn tick_seconds(&self) -> u32 {
        self.tick_seconds
    }

    pub fn regulation_minutes(&self) -> u32 {
        self.regulation_minutes
    }

    pub fn ticks_per_minute(&self) -> u32 {
        TICKS_PER_MINUTE
    }

    pub fn table(&self, state: MacroState) -> &StateTable {
        &self.tables[state.code() as usize]
    }

    /// Transition rows for `state` in `zone`. Empty for the SHOT table.
    pub fn transitions(&self, state: MacroState, zone: MacroZone) -> &[Transition] {
        match self.table(state) {
            StateTable::Transitions(rows) => rows,
            StateTable::ByZone(zones) => zones.get(zone),
            StateTable::Outcomes(_) => &[],
        }
    }

    pub fn shot_outcomes(&self) -> &[ShotOutcome] {
        match self.table(MacroState::Shot) {
            StateTable::Outcomes(rows) => rows,
            _ => &[],
        }
    }

    /// States reachable in one step from `state` (any zone).
    pub fn successors(&self, state: MacroState) -> Vec<MacroState> {
        let mut out: Vec<MacroState> = match self.table(state) {
            StateTable::Transitions(rows) => {
                rows.iter().filter(|t| t.p > 0.0).map(|t| t.to).collect()
            }
            StateTable::ByZone(zones) => MacroZone::ALL
                .iter()
                .flat_map(|z| zones.get(*z).iter())
                .filter(|t| t.p > 0.0)
                .map(|t| t.to)
                .collect(),
            StateTable::Outcomes(rows) => {
                rows.iter().filter(|o| o.p > 0.0).map(|o| o.to).collect()
            }
        };
        out.sort_by_key(|s| s.code());
        out.dedup();
        out
    }
}
