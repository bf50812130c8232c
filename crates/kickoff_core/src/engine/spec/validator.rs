//! Spec document validation
//!
//! 검증 순서: 시간 설정 → 상태 이름/중복 → 상태별 테이블 형태 → 합계 → 누락 상태.
//! 첫 번째 오류에서 멈추고 해당 상태와 계산된 합을 보고한다.

use super::document::{OutcomeDocument, SpecDocument, StateDocument, TransitionDocument};
use super::tables::{
    MarkovSpec, ShotOutcome, ShotResult, StateTable, Transition, ZoneTables, TICKS_PER_MINUTE,
};
use crate::engine::state::{MacroState, PossessionDirective};
use crate::engine::zone::MacroZone;
use crate::error::SpecError;
use tracing::debug;

/// Absolute tolerance on every table's sum.
pub const SUM_TOLERANCE: f64 = 0.001;

pub fn validate(doc: &SpecDocument) -> Result<MarkovSpec, SpecError> {
    if doc.time.tick_seconds.saturating_mul(TICKS_PER_MINUTE) != 60 {
        return Err(SpecError::InvalidTickDuration { tick_seconds: doc.time.tick_seconds });
    }
    if doc.time.regulation_minutes == 0 {
        return Err(SpecError::InvalidRegulationMinutes { minutes: doc.time.regulation_minutes });
    }

    let mut tables: Vec<Option<StateTable>> = vec![None; MacroState::ALL.len()];
    for state_doc in &doc.states {
        let state = MacroState::from_name(&state_doc.name)
            .ok_or_else(|| SpecError::UnknownState { name: state_doc.name.clone() })?;
        let slot = &mut tables[state.code() as usize];
        if slot.is_some() {
            return Err(SpecError::DuplicateState { state: state_doc.name.clone() });
        }
        *slot = Some(validate_state(state, state_doc)?);
    }

    let mut validated = Vec::with_capacity(MacroState::ALL.len());
    for (state, table) in MacroState::ALL.iter().zip(tables) {
        match table {
            Some(t) => validated.push(t),
            None => return Err(SpecError::MissingState { state: state.name().to_string() }),
        }
    }

    debug!(version = doc.version, states = validated.len(), "spec document validated");
    Ok(MarkovSpec::from_validated(
        doc.version,
        doc.time.tick_seconds,
        doc.time.regulation_minutes,
        validated,
    ))
}

fn validate_state(state: MacroState, doc: &StateDocument) -> Result<StateTable, SpecError> {
    match state {
        MacroState::Shot => {
            let rows = doc.outcomes.as_ref().ok_or_else(|| SpecError::MissingTable {
                state: state.name().to_string(),
                expected: "outcomes",
            })?;
            Ok(StateTable::Outcomes(validate_outcomes(state, rows)?))
        }
        MacroState::Out | MacroState::Foul => {
            if let Some(zones) = &doc.by_zone {
                for key in zones.keys() {
                    if MacroZone::from_name(key).is_none() {
                        return Err(SpecError::UnknownZone {
                            state: state.name().to_string(),
                            zone: key.clone(),
                        });
                    }
                }
                let table_for = |zone: MacroZone| -> Result<Vec<Transition>, SpecError> {
                    let rows = zones.get(zone.name()).ok_or_else(|| SpecError::MissingZone {
                        state: state.name().to_string(),
                        zone: zone.name().to_string(),
                    })?;
                    validate_transitions(state, rows, &format!("by_zone.{}", zone.name()))
                };
                Ok(StateTable::ByZone(ZoneTables {
                    def: table_for(MacroZone::Def)?,
                    mid: table_for(MacroZone::Mid)?,
                    final_third: table_for(MacroZone::Final)?,
                }))
            } else if let Some(rows) = &doc.transitions {
                Ok(StateTable::Transitions(validate_transitions(state, rows, "transitions")?))
            } else {
                Err(SpecError::MissingTable {
                    state: state.name().to_string(),
                    expected: "by_zone or transitions",
                })
            }
        }
        _ => {
            let rows = doc.transitions.as_ref().ok_or_else(|| SpecError::MissingTable {
                state: state.name().to_string(),
                expected: "transitions",
            })?;
            Ok(StateTable::Transitions(validate_transitions(state, rows, "transitions")?))
        }
    }
}

fn validate_transitions(
    state: MacroState,
    rows: &[TransitionDocument],
    table: &str,
) -> Result<Vec<Transition>, SpecError> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let to = parse_destination(state, &row.to)?;
        let possession = parse_directive(state, &row.possession)?;
        check_probability(state, row.p)?;
        out.push(Transition { to, possession, p: row.p });
    }
    check_sum(state, table, out.iter().map(|t| t.p))?;
    Ok(out)
}

fn validate_outcomes(
    state: MacroState,
    rows: &[OutcomeDocument],
) -> Result<Vec<ShotOutcome>, SpecError> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let result = ShotResult::from_name(&row.result).ok_or_else(|| {
            SpecError::UnknownShotResult {
                state: state.name().to_string(),
                result: row.result.clone(),
            }
        })?;
        let (default_to, default_possession) = result.default_restart();
        let to = match &row.to {
            Some(name) => parse_destination(state, name)?,
            None => default_to,
        };
        let possession = match &row.possession {
            Some(value) => parse_directive(state, value)?,
            None => default_possession,
        };
        check_probability(state, row.p)?;
        out.push(ShotOutcome { result, to, possession, p: row.p });
    }
    check_sum(state, "outcomes", out.iter().map(|o| o.p))?;
    Ok(out)
}

fn parse_destination(state: MacroState, name: &str) -> Result<MacroState, SpecError> {
    MacroState::from_name(name).ok_or_else(|| SpecError::UnknownDestination {
        state: state.name().to_string(),
        to: name.to_string(),
    })
}

fn parse_directive(state: MacroState, value: &str) -> Result<PossessionDirective, SpecError> {
    PossessionDirective::from_name(value).ok_or_else(|| SpecError::InvalidPossession {
        state: state.name().to_string(),
        value: value.to_string(),
    })
}

fn check_probability(state: MacroState, p: f64) -> Result<(), SpecError> {
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(SpecError::ProbabilityOutOfRange { state: state.name().to_string(), p });
    }
    Ok(())
}

fn check_sum(
    state: MacroState,
    table: &str,
    probabilities: impl Iterator<Item = f64>,
) -> Result<(), SpecError> {
    let sum: f64 = probabilities.sum();
    if (sum - 1.0).abs() > SUM_TOLERANCE {
        return Err(SpecError::SumMismatch {
            state: state.name().to_string(),
            table: table.to_string(),
            sum,
        });
    }
    Ok(())
}
