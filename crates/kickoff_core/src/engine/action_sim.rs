//! Action-level simulator
//!
//! 매크로 엔진보다 세밀한 두 번째 모드. 1분 동안 최대 `actions_per_minute`개의
//! 액션을 볼 소유자 단위로 진행한다:
//!
//! 1. 경합 전 파울 체크 (수비 쪽 파울 확률)
//! 2. 의사결정 라우팅으로 액션 타입 선택
//! 3. 패스는 대상 순위화 → 신뢰도 미달 시 드리블로 전환
//! 4. 확률 해석기로 성공/실패 판정, 모멘텀 갱신
//!
//! 존은 항상 공을 가진 팀 기준이며 소유권이 바뀌면 `mirror()` 한다.

use super::config::EngineConfig;
use super::deterministic::action_rng;
use super::momentum::{Momentum, MomentumEvent};
use super::probability::{
    dribble_success, foul_probability, interception_probability, long_shot_success, pass_success,
    shot_success, ResolveContext,
};
use super::selection::pick_player;
use super::zone::{Channel, PitchZone, ZoneLine};
use crate::models::{
    ActionEvent, ActionKind, ActionMinute, ActionState, ActorRef, Line, OutcomeCounts,
    PlayerSnapshot, Roster, Rosters, Score, Side,
};
use crate::player::decision::{
    attempt_risky, choose_action, select_pass_target, ActionChoice, PassKind, PassOption, Phase,
};
use crate::player::personality::{Behavior, PersonalityLayer};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Line a zone's ball carrier is drawn from.
pub fn line_for_zone(zone: PitchZone) -> Line {
    match zone.line() {
        ZoneLine::Goalkeeper => Line::GK,
        ZoneLine::Defense => Line::DEF,
        ZoneLine::DefensiveMid | ZoneLine::Mid => Line::MID,
        ZoneLine::AttackingMid | ZoneLine::Forward => Line::FWD,
    }
}

/// Where a team-mate on `line` would receive, at most two lines ahead and
/// one behind. Keepers are never offered as targets.
fn target_zone(from: PitchZone, line: Line, id: u32) -> Option<PitchZone> {
    let natural = match line {
        Line::GK => return None,
        Line::DEF => 1,
        Line::MID => 3,
        Line::FWD => 5,
    };
    let depth = from.line().depth();
    let lo = depth.saturating_sub(1).max(1);
    let hi = (depth + 2).min(5);
    let channel = match id % 3 {
        0 => Channel::Left,
        1 => Channel::Centre,
        _ => Channel::Right,
    };
    Some(PitchZone::from_parts(ZoneLine::from_depth(natural.clamp(lo, hi)), channel))
}

/// Mutable state threaded through one minute.
struct Play {
    minute: u32,
    possession: Side,
    zone: PitchZone,
    carrier: Option<u32>,
    score: Score,
    momentum: Momentum,
}

impl Play {
    fn turn_over(&mut self, zone: PitchZone, carrier: Option<u32>, counts: &mut OutcomeCounts) {
        self.possession = self.possession.flip();
        self.zone = zone.mirror();
        self.carrier = carrier;
        counts.turnovers += 1;
    }

    fn context(&self) -> ResolveContext {
        ResolveContext::new(self.zone)
            .with_momentum(self.momentum.for_side(self.possession))
            .at_minute(self.minute, self.score.diff_for(self.possession))
    }
}

pub struct ActionSimulator<'a> {
    config: &'a EngineConfig,
    personality: &'a dyn PersonalityLayer,
}

impl<'a> ActionSimulator<'a> {
    pub fn new(config: &'a EngineConfig, personality: &'a dyn PersonalityLayer) -> Self {
        Self { config, personality }
    }

    /// One minute of actions from `state`. Empty rosters produce no actions.
    pub fn simulate_minute(&self, seed: i64, state: &ActionState, rosters: &Rosters) -> ActionMinute {
        let mut rng = action_rng(seed, state.minute, state.possession, state.zone);
        let mut play = Play {
            minute: state.minute,
            possession: state.possession,
            zone: state.zone,
            carrier: state.carrier,
            score: state.score,
            momentum: state.momentum,
        };
        let mut counts = OutcomeCounts::default();
        let mut actions = Vec::new();

        for index in 0..self.config.action_sim.actions_per_minute {
            let attacking = rosters.side(play.possession);
            let defending = rosters.side(play.possession.flip());
            let carrier = match play.carrier.and_then(|id| attacking.find(id)) {
                Some(p) => p,
                None => match pick_player(attacking, line_for_zone(play.zone), &mut rng) {
                    Some(p) => p,
                    None => break,
                },
            };
            let defender = pick_player(defending, line_for_zone(play.zone.mirror()), &mut rng);

            if self.config.action_sim.foul_checks {
                if let Some(def) = defender {
                    if self.foul_committed(&play, carrier, def, &mut rng) {
                        counts.fouls += 1;
                        actions.push(event(index, play.possession.flip(), ActionKind::Foul, true, &play, def, None));
                        play.carrier = Some(carrier.id);
                        continue;
                    }
                }
            }

            let phase = Phase::from_zone(play.zone, true);
            let choice =
                choose_action(phase, carrier.traits.as_ref(), self.personality, &self.config.decision, &mut rng);
            let action = match choice {
                ActionChoice::Shoot => self.shoot(index, &mut play, carrier, defending, &mut counts, &mut rng),
                ActionChoice::Dribble => self.dribble(index, &mut play, carrier, defender, &mut counts, &mut rng),
                ActionChoice::Pass | ActionChoice::Tackle => {
                    match self.pass(index, &mut play, carrier, attacking, defender, &mut counts, &mut rng) {
                        Some(action) => action,
                        // no target worth it: take the player on instead
                        None => self.dribble(index, &mut play, carrier, defender, &mut counts, &mut rng),
                    }
                }
            };
            actions.push(action);
        }

        play.momentum.decay(&self.config.momentum);
        debug!(
            seed,
            minute = state.minute,
            actions = actions.len(),
            home = play.score.home,
            away = play.score.away,
            "action minute simulated"
        );

        ActionMinute {
            minute: state.minute,
            actions,
            score_delta: play.score.since(&state.score),
            score: play.score,
            counts,
            next_state: ActionState {
                minute: state.minute.saturating_add(1),
                possession: play.possession,
                zone: play.zone,
                carrier: play.carrier,
                score: play.score,
                momentum: play.momentum,
            },
        }
    }

    fn foul_committed(
        &self,
        play: &Play,
        carrier: &PlayerSnapshot,
        defender: &PlayerSnapshot,
        rng: &mut ChaCha8Rng,
    ) -> bool {
        let adj = self.personality.adjustment(defender.traits.as_ref(), Behavior::FoulTendency);
        let ctx = play.context().with_personality(adj);
        let p = foul_probability(&defender.attributes, Some(&carrier.attributes), &ctx, &self.config.resolver);
        rng.gen::<f32>() < p
    }

    fn shoot(
        &self,
        index: u32,
        play: &mut Play,
        shooter: &PlayerSnapshot,
        defending: &Roster,
        counts: &mut OutcomeCounts,
        rng: &mut ChaCha8Rng,
    ) -> ActionEvent {
        let keeper = defending.line(Line::GK).first();
        let adj = self.personality.adjustment(shooter.traits.as_ref(), Behavior::ShotAccuracy);
        let ctx = play.context().with_personality(adj);
        let long = play.zone.line() != ZoneLine::Forward;
        let keeper_attrs = keeper.map(|k| &k.attributes);
        let p = if long {
            long_shot_success(&shooter.attributes, keeper_attrs, &ctx, &self.config.resolver)
        } else {
            shot_success(&shooter.attributes, keeper_attrs, &ctx, &self.config.resolver)
        };
        let goal = rng.gen::<f32>() < p;
        let kind = if long { ActionKind::LongShot } else { ActionKind::Shot };
        let mut action = event(index, play.possession, kind, goal, play, shooter, None);
        action.goal = goal;

        counts.shots += 1;
        play.momentum.record(MomentumEvent::Shot, play.possession, &self.config.momentum);
        if goal {
            counts.goals += 1;
            play.score.add_goal(play.possession);
            play.momentum.record(MomentumEvent::Goal, play.possession, &self.config.momentum);
            play.possession = play.possession.flip();
            play.zone = PitchZone::MidCentre;
            play.carrier = None;
        } else {
            // keeper gathers or restarts
            play.turn_over(PitchZone::ForwardCentre, keeper.map(|k| k.id), counts);
        }
        action
    }

    fn dribble(
        &self,
        index: u32,
        play: &mut Play,
        carrier: &PlayerSnapshot,
        defender: Option<&PlayerSnapshot>,
        counts: &mut OutcomeCounts,
        rng: &mut ChaCha8Rng,
    ) -> ActionEvent {
        let adj = self.personality.adjustment(carrier.traits.as_ref(), Behavior::DribbleSuccess);
        let ctx = play.context().with_personality(adj);
        let p = dribble_success(
            &carrier.attributes,
            defender.map(|d| &d.attributes),
            &ctx,
            &self.config.resolver,
        );
        let success = rng.gen::<f32>() < p;
        let action = event(index, play.possession, ActionKind::Dribble, success, play, carrier, None);
        if success {
            play.momentum.record(MomentumEvent::Dribble, play.possession, &self.config.momentum);
            play.zone = play.zone.advance();
            play.carrier = Some(carrier.id);
        } else {
            let zone = play.zone;
            play.turn_over(zone, defender.map(|d| d.id), counts);
            play.momentum.record(MomentumEvent::Turnover, play.possession, &self.config.momentum);
        }
        action
    }

    /// `None` when no option clears the confidence bar.
    fn pass(
        &self,
        index: u32,
        play: &mut Play,
        passer: &PlayerSnapshot,
        attacking: &Roster,
        defender: Option<&PlayerSnapshot>,
        counts: &mut OutcomeCounts,
        rng: &mut ChaCha8Rng,
    ) -> Option<ActionEvent> {
        let cfg = &self.config.resolver;
        let traits = passer.traits.as_ref();
        let adj = self.personality.adjustment(traits, Behavior::PassAccuracy);
        let ctx = play.context().with_personality(adj);
        let def_attrs = defender.map(|d| &d.attributes);

        let risky = attempt_risky(
            &passer.attributes,
            traits,
            self.personality,
            play.minute,
            play.score.diff_for(play.possession),
            &self.config.decision,
        );
        let options: Vec<(PassOption, f32, f32)> = attacking
            .players()
            .filter(|p| p.id != passer.id)
            .filter_map(|p| target_zone(play.zone, p.line, p.id).map(|zone| (p.id, zone)))
            .map(|(id, zone)| {
                let complete = pass_success(&passer.attributes, def_attrs, zone, &ctx, cfg);
                let intercept = def_attrs.map_or(0.0, |d| {
                    interception_probability(
                        d,
                        Some(&passer.attributes),
                        play.zone.pass_distance(zone),
                        &ctx,
                        cfg,
                    )
                });
                let success = complete * (1.0 - intercept);
                let option = PassOption {
                    target_id: id,
                    zone,
                    kind: PassKind::classify(play.zone, zone),
                    success,
                    benefit: (0.3 + zone.goal_proximity() - play.zone.goal_proximity()).clamp(0.0, 1.0),
                    risk: (1.0 - success) * (1.0 - 0.5 * zone.goal_proximity()),
                };
                (option, complete, intercept)
            })
            .filter(|(o, _, _)| risky || o.kind == PassKind::Short)
            .collect();

        let candidates: Vec<PassOption> = options.iter().map(|(o, _, _)| *o).collect();
        let chosen = select_pass_target(&candidates, traits, self.personality, &self.config.decision)?;
        let (_, complete, intercept) = options.iter().find(|(o, _, _)| o.target_id == chosen.target_id)?;
        let target = attacking.find(chosen.target_id);
        let kind = if chosen.kind == PassKind::Short { ActionKind::Pass } else { ActionKind::LongPass };

        if let Some(def) = defender {
            if rng.gen::<f32>() < *intercept {
                let action = event(index, play.possession.flip(), ActionKind::Interception, true, play, def, None);
                play.turn_over(chosen.zone, Some(def.id), counts);
                play.momentum.record(MomentumEvent::Turnover, play.possession, &self.config.momentum);
                return Some(action);
            }
        }
        let success = rng.gen::<f32>() < *complete;
        let action = event(index, play.possession, kind, success, play, passer, target);
        if success {
            play.zone = chosen.zone;
            play.carrier = Some(chosen.target_id);
        } else {
            play.turn_over(chosen.zone, None, counts);
            play.momentum.record(MomentumEvent::Turnover, play.possession, &self.config.momentum);
        }
        Some(action)
    }
}

fn event(
    index: u32,
    side: Side,
    kind: ActionKind,
    success: bool,
    play: &Play,
    actor: &PlayerSnapshot,
    target: Option<&PlayerSnapshot>,
) -> ActionEvent {
    // zone is told from the acting side's view
    let zone = if side == play.possession { play.zone } else { play.zone.mirror() };
    ActionEvent {
        index,
        side,
        kind,
        success,
        zone,
        actor: Some(ActorRef::from_player(actor, side)),
        target: target.map(|t| ActorRef::from_player(t, side)),
        goal: false,
        commentary: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerAttributes;
    use crate::player::personality::{DisabledPersonality, PersonalityTraits};

    fn squad(base: u32, value: f32) -> Roster {
        let attrs = PlayerAttributes::uniform(value);
        let mut players = vec![PlayerSnapshot::new(base, "Keeper", Line::GK)];
        for (i, line) in [Line::DEF, Line::DEF, Line::MID, Line::MID, Line::MID, Line::FWD, Line::FWD]
            .into_iter()
            .enumerate()
        {
            players.push(
                PlayerSnapshot::new(base + 1 + i as u32, format!("P{}", base + 1 + i as u32), line)
                    .with_traits(PersonalityTraits::uniform(18)),
            );
        }
        Roster::from_players(players.into_iter().map(|p| p.with_attributes(attrs.clone())))
    }

    fn rosters() -> Rosters {
        Rosters::new(squad(1, 78.0), squad(100, 62.0))
    }

    #[test]
    fn test_replay_is_identical() {
        let cfg = EngineConfig::default();
        let sim = ActionSimulator::new(&cfg, &DisabledPersonality);
        let rosters = rosters();
        let mut state = ActionState::kickoff(Side::Home);
        for _ in 0..15 {
            let a = sim.simulate_minute(11, &state, &rosters);
            let b = sim.simulate_minute(11, &state, &rosters);
            assert_eq!(a, b);
            assert!(a.actions.len() <= cfg.action_sim.actions_per_minute as usize);
            state = a.next_state;
        }
        assert_eq!(state.minute, 16);
    }

    #[test]
    fn test_empty_rosters_produce_no_actions() {
        let cfg = EngineConfig::default();
        let sim = ActionSimulator::new(&cfg, &DisabledPersonality);
        let minute = sim.simulate_minute(1, &ActionState::kickoff(Side::Away), &Rosters::default());
        assert!(minute.actions.is_empty());
        assert_eq!(minute.score, Score::default());
    }

    #[test]
    fn test_goals_match_score() {
        let cfg = EngineConfig::default();
        let sim = ActionSimulator::new(&cfg, &DisabledPersonality);
        let rosters = rosters();
        let mut state = ActionState::kickoff(Side::Home);
        let mut goal_events = 0;
        for _ in 0..90 {
            let m = sim.simulate_minute(4, &state, &rosters);
            goal_events += m.actions.iter().filter(|a| a.goal).count() as u32;
            assert_eq!(m.counts.goals, m.score_delta.home as u32 + m.score_delta.away as u32);
            assert!(m.next_state.momentum.value().abs() <= 1.0);
            state = m.next_state;
        }
        assert_eq!(goal_events, state.score.home as u32 + state.score.away as u32);
    }

    #[test]
    fn test_disabled_personality_ignores_traits() {
        let cfg = EngineConfig::default();
        let sim = ActionSimulator::new(&cfg, &DisabledPersonality);
        let rosters = rosters();
        let stripped = rosters.without_traits();
        let mut state = ActionState::kickoff(Side::Home);
        for _ in 0..10 {
            let a = sim.simulate_minute(8, &state, &rosters);
            let b = sim.simulate_minute(8, &state, &stripped);
            assert_eq!(a.actions.len(), b.actions.len());
            assert_eq!(a.score, b.score);
            assert_eq!(a.next_state, b.next_state);
            state = a.next_state;
        }
    }

    #[test]
    fn test_target_zone_bounds() {
        assert_eq!(target_zone(PitchZone::MidCentre, Line::GK, 1), None);
        let z = target_zone(PitchZone::DefenseLeft, Line::FWD, 4).unwrap();
        assert_eq!(z.line(), ZoneLine::Mid);
        let z = target_zone(PitchZone::ForwardCentre, Line::DEF, 4).unwrap();
        assert_eq!(z.line(), ZoneLine::AttackingMid);
    }
}
