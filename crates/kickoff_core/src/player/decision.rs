//! Decision routing
//!
//! - 액션 타입 선택 (pass/shoot/dribble/tackle): 국면별 사전 가중치 + 성격 보정
//! - 위험 행동 여부: 성격 보정된 위험 성향 vs 기준값, 막판 열세 시 추가 의지
//! - 패스 대상 순위: 성공/이득/위험/선호의 가중 합, 최소 신뢰도 미만이면 패스 포기

use crate::engine::config::{ActionWeights, DecisionConfig};
use crate::engine::deterministic::sample;
use crate::engine::zone::{PassDistance, PitchZone, ZoneLine};
use crate::models::{Attr, PlayerAttributes};
use crate::player::personality::{Behavior, PersonalityLayer, PersonalityTraits};
use rand::Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// Action type choice
// ============================================================================

/// Possession phase driving the action priors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    BuildUp,
    Progression,
    FinalThird,
    Defending,
}

impl Phase {
    /// Phase of the side whose view `zone` is in.
    pub fn from_zone(zone: PitchZone, in_possession: bool) -> Phase {
        if !in_possession {
            return Phase::Defending;
        }
        match zone.line() {
            ZoneLine::Goalkeeper | ZoneLine::Defense => Phase::BuildUp,
            ZoneLine::DefensiveMid | ZoneLine::Mid => Phase::Progression,
            ZoneLine::AttackingMid | ZoneLine::Forward => Phase::FinalThird,
        }
    }

    pub fn priors(&self, cfg: &DecisionConfig) -> ActionWeights {
        match self {
            Phase::BuildUp => cfg.build_up,
            Phase::Progression => cfg.progression,
            Phase::FinalThird => cfg.final_third,
            Phase::Defending => cfg.defending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionChoice {
    Pass,
    Shoot,
    Dribble,
    Tackle,
}

/// Phase priors nudged by personality. A disabled layer returns the priors.
pub fn choice_weights(
    phase: Phase,
    traits: Option<&PersonalityTraits>,
    layer: &dyn PersonalityLayer,
    cfg: &DecisionConfig,
) -> [(ActionChoice, f64); 4] {
    let w = phase.priors(cfg);
    let adjust = |weight: f32, behavior: Behavior| layer.adjust_weight(weight, traits, behavior) as f64;
    [
        (ActionChoice::Pass, adjust(w.pass, Behavior::ShortPassPreference)),
        (ActionChoice::Shoot, adjust(w.shoot, Behavior::LongShotFrequency)),
        (ActionChoice::Dribble, adjust(w.dribble, Behavior::SoloDribbleFrequency)),
        (ActionChoice::Tackle, adjust(w.tackle, Behavior::Pressing)),
    ]
}

/// Weighted draw over [`choice_weights`]. An all-zero table passes (or
/// tackles when defending).
pub fn choose_action<R: Rng + ?Sized>(
    phase: Phase,
    traits: Option<&PersonalityTraits>,
    layer: &dyn PersonalityLayer,
    cfg: &DecisionConfig,
    rng: &mut R,
) -> ActionChoice {
    let weights = choice_weights(phase, traits, layer, cfg);
    if weights.iter().all(|(_, w)| *w <= 0.0) {
        return if phase == Phase::Defending { ActionChoice::Tackle } else { ActionChoice::Pass };
    }
    sample(&weights, rng).copied().unwrap_or(ActionChoice::Pass)
}

// ============================================================================
// Risk
// ============================================================================

/// 0-1 appetite for risky actions before the threshold check.
pub fn risk_tendency(
    attrs: &PlayerAttributes,
    traits: Option<&PersonalityTraits>,
    layer: &dyn PersonalityLayer,
    cfg: &DecisionConfig,
) -> f32 {
    let flair = attrs.normalized(Attr::Flair);
    let caution = attrs.normalized(Attr::Decisions);
    let base = cfg.risk_flair_weight * flair + (1.0 - cfg.risk_flair_weight) * (1.0 - caution);
    let personality = (layer.adjustment(traits, Behavior::SoloDribbleFrequency)
        + layer.adjustment(traits, Behavior::LongPassFrequency))
        * 0.5;
    (base + personality).clamp(0.0, 1.0)
}

/// Whether the player goes for the risky option (take-on, long ball, shot
/// from range).
pub fn attempt_risky(
    attrs: &PlayerAttributes,
    traits: Option<&PersonalityTraits>,
    layer: &dyn PersonalityLayer,
    minute: u32,
    score_diff: i32,
    cfg: &DecisionConfig,
) -> bool {
    let mut tendency = risk_tendency(attrs, traits, layer, cfg);
    if minute >= cfg.late_minute && score_diff < 0 {
        tendency += cfg.losing_late_bonus + layer.adjustment(traits, Behavior::LateGameRisk).max(0.0);
    }
    tendency > cfg.risk_threshold
}

// ============================================================================
// Pass target ranking
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    Short,
    Long,
    Through,
}

impl PassKind {
    /// Two or more lines forward through the centre is a through ball.
    pub fn classify(from: PitchZone, to: PitchZone) -> PassKind {
        let forward = to.line().depth() as i8 - from.line().depth() as i8;
        if forward >= 2 && to.is_central() {
            return PassKind::Through;
        }
        match from.pass_distance(to) {
            PassDistance::Short | PassDistance::Medium => PassKind::Short,
            PassDistance::Long => PassKind::Long,
        }
    }

    fn preference(&self) -> Behavior {
        match self {
            PassKind::Short => Behavior::ShortPassPreference,
            PassKind::Long => Behavior::LongPassFrequency,
            PassKind::Through => Behavior::ThroughBallFrequency,
        }
    }
}

/// One candidate receiver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassOption {
    pub target_id: u32,
    pub zone: PitchZone,
    pub kind: PassKind,
    /// Completion probability from the resolver.
    pub success: f32,
    /// Territorial gain, 0-1.
    pub benefit: f32,
    /// Cost of losing it there, 0-1.
    pub risk: f32,
}

pub fn score_pass(
    option: &PassOption,
    traits: Option<&PersonalityTraits>,
    layer: &dyn PersonalityLayer,
    cfg: &DecisionConfig,
) -> f32 {
    let preference = layer.adjustment(traits, option.kind.preference());
    cfg.success_weight * option.success + cfg.benefit_weight * option.benefit
        - cfg.risk_weight * option.risk
        + cfg.preference_weight * preference
}

/// Options with their scores, best first. Ties go to the lower id.
pub fn rank_pass_targets(
    options: &[PassOption],
    traits: Option<&PersonalityTraits>,
    layer: &dyn PersonalityLayer,
    cfg: &DecisionConfig,
) -> Vec<(PassOption, f32)> {
    let mut ranked: Vec<(PassOption, f32)> =
        options.iter().map(|o| (*o, score_pass(o, traits, layer, cfg))).collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.target_id.cmp(&b.0.target_id)));
    ranked
}

/// Best option, or `None` when even the best misses the confidence bar.
pub fn select_pass_target(
    options: &[PassOption],
    traits: Option<&PersonalityTraits>,
    layer: &dyn PersonalityLayer,
    cfg: &DecisionConfig,
) -> Option<PassOption> {
    rank_pass_targets(options, traits, layer, cfg)
        .into_iter()
        .next()
        .filter(|(_, score)| *score >= cfg.min_pass_confidence)
        .map(|(option, _)| option)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::personality::{DisabledPersonality, Trait, TraitPersonality};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn option(id: u32, kind: PassKind, success: f32, benefit: f32, risk: f32) -> PassOption {
        PassOption { target_id: id, zone: PitchZone::MidCentre, kind, success, benefit, risk }
    }

    #[test]
    fn test_phase_from_zone() {
        assert_eq!(Phase::from_zone(PitchZone::Goalkeeper, true), Phase::BuildUp);
        assert_eq!(Phase::from_zone(PitchZone::MidLeft, true), Phase::Progression);
        assert_eq!(Phase::from_zone(PitchZone::ForwardCentre, true), Phase::FinalThird);
        assert_eq!(Phase::from_zone(PitchZone::ForwardCentre, false), Phase::Defending);
    }

    #[test]
    fn test_defending_always_tackles() {
        let cfg = DecisionConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let a = choose_action(Phase::Defending, None, &DisabledPersonality, &cfg, &mut rng);
            assert_eq!(a, ActionChoice::Tackle);
        }
    }

    #[test]
    fn test_build_up_never_shoots() {
        let cfg = DecisionConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        for _ in 0..200 {
            let a = choose_action(Phase::BuildUp, None, &DisabledPersonality, &cfg, &mut rng);
            assert_ne!(a, ActionChoice::Shoot);
        }
    }

    #[test]
    fn test_risk_taker_shoots_more_often() {
        let cfg = DecisionConfig::default();
        let bold = PersonalityTraits::default().with(Trait::RiskTaking, 20);
        let base = choice_weights(Phase::FinalThird, None, &TraitPersonality, &cfg);
        let nudged = choice_weights(Phase::FinalThird, Some(&bold), &TraitPersonality, &cfg);
        assert!(nudged[1].1 > base[1].1);
        assert!(nudged[2].1 > base[2].1);

        let off = choice_weights(Phase::FinalThird, Some(&bold), &DisabledPersonality, &cfg);
        assert_eq!(off, base);
    }

    #[test]
    fn test_late_losing_raises_willingness() {
        let cfg = DecisionConfig::default();
        let mut attrs = PlayerAttributes::uniform(50.0);
        attrs.flair = 55.0;
        let early = attempt_risky(&attrs, None, &DisabledPersonality, 30, -1, &cfg);
        let late = attempt_risky(&attrs, None, &DisabledPersonality, 85, -1, &cfg);
        let late_winning = attempt_risky(&attrs, None, &DisabledPersonality, 85, 1, &cfg);
        assert!(!early);
        assert!(late);
        assert!(!late_winning);
    }

    #[test]
    fn test_rank_and_select() {
        let cfg = DecisionConfig::default();
        let options = [
            option(3, PassKind::Long, 0.55, 0.8, 0.5),
            option(1, PassKind::Short, 0.9, 0.3, 0.1),
            option(2, PassKind::Short, 0.9, 0.3, 0.1),
        ];
        let ranked = rank_pass_targets(&options, None, &DisabledPersonality, &cfg);
        assert_eq!(ranked[0].0.target_id, 1);
        assert_eq!(ranked[1].0.target_id, 2);
        let picked = select_pass_target(&options, None, &DisabledPersonality, &cfg).unwrap();
        assert_eq!(picked.target_id, 1);
    }

    #[test]
    fn test_declines_below_confidence() {
        let cfg = DecisionConfig::default();
        let options = [option(1, PassKind::Long, 0.3, 0.2, 0.8)];
        assert!(select_pass_target(&options, None, &DisabledPersonality, &cfg).is_none());
        assert!(select_pass_target(&[], None, &DisabledPersonality, &cfg).is_none());
    }

    #[test]
    fn test_pass_kind_classify() {
        assert_eq!(PassKind::classify(PitchZone::MidCentre, PitchZone::MidLeft), PassKind::Short);
        assert_eq!(
            PassKind::classify(PitchZone::MidCentre, PitchZone::ForwardCentre),
            PassKind::Through
        );
        assert_eq!(PassKind::classify(PitchZone::DefenseLeft, PitchZone::MidRight), PassKind::Long);
    }
}
