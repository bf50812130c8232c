//! Minute-level Markov engine
//!
//! 한 번의 호출 = 1분 = 6틱. 토큰에서 시작해 틱마다:
//! 1. 상태에서 매크로 존 도출 (SHOT/OUT/FOUL은 현재 존 유지)
//! 2. 공격/수비 선수 선택 → 계수 팩
//! 3. 종결 상태(SHOT/OUT/FOUL/GK)는 전용 테이블로 해석
//! 4. 그 외에는 전진 전이만 계수로 보정 후 재정규화, 가중 선택
//!
//! 엔진은 호출 사이에 상태를 갖지 않는다. 같은 (seed, minute, state,
//! possession, zone)이면 결과는 비트 단위로 동일하다.

use super::coefficients::{adjust_transitions, reweight_shot_outcomes, CoefficientPack};
use super::config::EngineConfig;
use super::deterministic::{minute_rng, sample};
use super::selection::select_matchup;
use super::spec::{MarkovSpec, ShotResult, Transition};
use super::state::{MacroState, PossessionDirective};
use super::token::SimulationToken;
use super::zone::MacroZone;
use crate::models::{
    ActorRef, EngineEvent, MinuteSummary, OutcomeCounts, Rosters, Score, Side, SideCounts,
};
use crate::player::personality::PersonalityLayer;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

/// Live per-tick position of play.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PlayState {
    state: MacroState,
    possession: Side,
    zone: MacroZone,
}

/// Result of resolving one tick.
#[derive(Debug, Clone, PartialEq)]
struct TickOutcome {
    to: MacroState,
    possession: Side,
    zone: MacroZone,
    label: Option<String>,
    goal: bool,
}

/// Borrowed view over everything one minute needs.
pub struct MacroEngine<'a> {
    spec: &'a MarkovSpec,
    config: &'a EngineConfig,
    personality: &'a dyn PersonalityLayer,
}

impl<'a> MacroEngine<'a> {
    pub fn new(
        spec: &'a MarkovSpec,
        config: &'a EngineConfig,
        personality: &'a dyn PersonalityLayer,
    ) -> Self {
        Self { spec, config, personality }
    }

    /// Advance one minute from `token`. Narrative is left empty; the API
    /// layer renders it.
    pub fn simulate_minute(
        &self,
        seed: i64,
        token: &SimulationToken,
        rosters: Option<&Rosters>,
    ) -> MinuteSummary {
        let mut play = PlayState {
            state: token.state,
            possession: token.possession,
            zone: token.zone,
        };
        let mut rng = minute_rng(seed, token.minute, play.state, play.possession, play.zone);
        let mut score = token.score;
        let mut counts = OutcomeCounts::default();
        let mut final_third_entries = SideCounts::default();
        let mut possession_seconds = SideCounts::default();
        let ticks = self.spec.ticks_per_minute();
        let mut events = Vec::with_capacity(ticks as usize);

        for tick in 0..ticks {
            if let Some(zone) = MacroZone::from_state(play.state) {
                play.zone = zone;
            }
            possession_seconds.add(play.possession, self.spec.tick_seconds());

            let matchup = select_matchup(rosters, play.possession, play.state, play.zone, &mut rng);
            let cc = &self.config.coefficients;
            let pack = CoefficientPack::derive(matchup.attacker, matchup.defender, cc)
                .apply_personality(self.personality, matchup.attacker, matchup.defender, cc)
                .apply_side_wide(
                    token.coefficients.get(play.possession),
                    token.coefficients.get(play.possession.flip()),
                    cc,
                );

            let outcome = self.resolve_tick(&play, &pack, &mut rng, &mut counts);
            let turnover = outcome.possession != play.possession;
            if turnover {
                counts.turnovers += 1;
            }
            if outcome.goal {
                score.add_goal(play.possession);
            }

            // first entry this tick, judged from the new possessor's view
            let prior_zone = if turnover { play.zone.mirror() } else { play.zone };
            if outcome.zone == MacroZone::Final && prior_zone != MacroZone::Final {
                final_third_entries.add(outcome.possession, 1);
            }

            trace!(
                minute = token.minute,
                tick,
                from = %play.state,
                to = %outcome.to,
                turnover,
                "tick"
            );

            events.push(EngineEvent {
                tick,
                from: play.state,
                to: outcome.to,
                possession: outcome.possession,
                zone: outcome.zone,
                turnover,
                outcome: outcome.label,
                actor: matchup.attacker.map(|p| ActorRef::from_player(p, play.possession)),
                narrative: None,
            });

            play = PlayState { state: outcome.to, possession: outcome.possession, zone: outcome.zone };
        }

        let next_token = SimulationToken {
            minute: token.minute.saturating_add(1),
            state: play.state,
            possession: play.possession,
            zone: play.zone,
            score,
            ..*token
        };

        debug!(
            seed,
            minute = token.minute,
            end_state = %play.state,
            home = score.home,
            away = score.away,
            "minute simulated"
        );

        MinuteSummary {
            minute: token.minute,
            end_state: play.state,
            end_possession: play.possession,
            end_zone: play.zone,
            score_delta: score.since(&token.score),
            score,
            counts,
            final_third_entries,
            possession_seconds,
            events,
            narrative: Vec::new(),
            full_time: token.minute >= self.spec.regulation_minutes(),
            next_token,
        }
    }

    fn resolve_tick(
        &self,
        play: &PlayState,
        pack: &CoefficientPack,
        rng: &mut ChaCha8Rng,
        counts: &mut OutcomeCounts,
    ) -> TickOutcome {
        let cc = &self.config.coefficients;
        match play.state {
            MacroState::Shot => {
                counts.shots += 1;
                let weighted = reweight_shot_outcomes(self.spec.shot_outcomes(), pack.shot, cc.epsilon);
                let Some(shot) = sample(&weighted, rng).copied() else {
                    return stay(play);
                };
                let goal = shot.result == ShotResult::Goal;
                if goal {
                    counts.goals += 1;
                }
                let mut outcome = follow(play, shot.to, shot.possession);
                outcome.label = Some(format!("SHOT:{}", shot.result.name()));
                outcome.goal = goal;
                outcome
            }
            MacroState::Foul => {
                counts.fouls += 1;
                let Some(row) = pick(self.spec.transitions(MacroState::Foul, play.zone), rng) else {
                    return stay(play);
                };
                // the table picks the restart; who takes it is a coefficient draw
                let retained = rng.gen::<f64>() < pack.foul_retention(cc);
                if retained {
                    let mut outcome = follow(play, row.to, PossessionDirective::Retain);
                    outcome.label = Some("FOUL:retain".to_string());
                    outcome
                } else {
                    let zone = play.zone.mirror();
                    let to = if row.to.is_open_play() || row.to == MacroState::Shot {
                        MacroState::open_play(zone)
                    } else {
                        row.to
                    };
                    TickOutcome {
                        to,
                        possession: play.possession.flip(),
                        zone: MacroZone::from_state(to).unwrap_or(zone),
                        label: Some("FOUL:flip".to_string()),
                        goal: false,
                    }
                }
            }
            MacroState::Out => {
                counts.outs += 1;
                let Some(row) = pick(self.spec.transitions(MacroState::Out, play.zone), rng) else {
                    return stay(play);
                };
                let mut outcome = follow(play, row.to, row.possession);
                outcome.label = Some(match row.possession {
                    PossessionDirective::Retain => "OUT:retain".to_string(),
                    PossessionDirective::Flip => "OUT:flip".to_string(),
                });
                outcome
            }
            MacroState::Gk => {
                counts.goalkeeper_restarts += 1;
                let Some(row) = pick(self.spec.transitions(MacroState::Gk, play.zone), rng) else {
                    return stay(play);
                };
                let mut outcome = follow(play, row.to, row.possession);
                outcome.label = Some("GK:restart".to_string());
                outcome
            }
            state => {
                let rows = self.spec.transitions(state, play.zone);
                let weighted = adjust_transitions(state, rows, pack, cc);
                match sample(&weighted, rng).copied() {
                    Some(row) => follow(play, row.to, row.possession),
                    None => stay(play),
                }
            }
        }
    }
}

/// Unadjusted weighted pick over a restart table.
fn pick(rows: &[Transition], rng: &mut ChaCha8Rng) -> Option<Transition> {
    let weighted: Vec<(Transition, f64)> = rows.iter().map(|t| (*t, t.p)).collect();
    sample(&weighted, rng).copied()
}

/// Apply a destination and directive. Phases with a fixed zone set it;
/// otherwise the current zone carries over, mirrored on a flip.
fn follow(play: &PlayState, to: MacroState, directive: PossessionDirective) -> TickOutcome {
    let possession = directive.apply(play.possession);
    let carried = match directive {
        PossessionDirective::Retain => play.zone,
        PossessionDirective::Flip => play.zone.mirror(),
    };
    TickOutcome {
        to,
        possession,
        zone: MacroZone::from_state(to).unwrap_or(carried),
        label: None,
        goal: false,
    }
}

fn stay(play: &PlayState) -> TickOutcome {
    TickOutcome {
        to: play.state,
        possession: play.possession,
        zone: play.zone,
        label: None,
        goal: false,
    }
}

/// Score after the last summary, or 0-0.
pub fn final_score(summaries: &[MinuteSummary]) -> Score {
    summaries.last().map(|s| s.score).unwrap_or_default()
}
