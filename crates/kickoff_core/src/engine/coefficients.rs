//! Coefficient engine
//!
//! 공격/수비 선수의 능력치 부분집합 평균 비율을 1.0 중심의 대칭 계수로 바꾼다.
//!
//! ```text
//! ratio   = max(att, eps) / max(def, eps)
//! delta   = (ratio - 1) * dampening
//! attack  = clamp(1 + delta)
//! defense = clamp(1 - delta)
//! ```
//!
//! 계수는 매 틱 재계산되며 저장되지 않는다. 사이드 전체 계수(토큰/override)는
//! 계산된 쌍에 곱해진 뒤 다시 클램프된다.

use super::config::CoefficientConfig;
use super::spec::{ShotOutcome, ShotResult, Transition};
use super::state::MacroState;
use crate::models::{Attr, PlayerSnapshot, Side};
use crate::player::personality::{Behavior, PersonalityLayer};
use serde::{Deserialize, Serialize};

// ============================================================================
// Named attribute subsets
// ============================================================================

pub const PROGRESS_ATTACK: &[Attr] = &[Attr::Passing, Attr::Vision, Attr::Dribbling, Attr::WorkRate];
pub const PROGRESS_DEFENSE: &[Attr] =
    &[Attr::Tackling, Attr::Marking, Attr::Positioning, Attr::Strength];

pub const FINAL_THIRD_ATTACK: &[Attr] =
    &[Attr::OffTheBall, Attr::Dribbling, Attr::Pace, Attr::Decisions];
pub const FINAL_THIRD_DEFENSE: &[Attr] =
    &[Attr::Positioning, Attr::Marking, Attr::Anticipation, Attr::Concentration];

pub const SHOT_ATTACK: &[Attr] =
    &[Attr::Finishing, Attr::LongRange, Attr::ShotAccuracy, Attr::Composure];
pub const KEEPER_SAVE: &[Attr] = &[
    Attr::Reflexes,
    Attr::Handling,
    Attr::Positioning,
    Attr::AerialReach,
    Attr::CommandOfArea,
];

pub const RETENTION: &[Attr] = &[Attr::BallControl, Attr::FirstTouch, Attr::Composure, Attr::Passing];
pub const PRESS: &[Attr] = &[Attr::WorkRate, Attr::Aggression, Attr::Anticipation, Attr::Pace];

pub const FOUL_DRAW: &[Attr] = &[Attr::Dribbling, Attr::Balance, Attr::BallControl];
pub const FOUL_COMMIT: &[Attr] = &[Attr::Aggression, Attr::Strength, Attr::Tackling];

// ============================================================================
// Types
// ============================================================================

/// Symmetric multiplier pair centered at 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoefficientPair {
    pub attack: f64,
    pub defense: f64,
}

impl CoefficientPair {
    pub const NEUTRAL: CoefficientPair = CoefficientPair { attack: 1.0, defense: 1.0 };

    /// attack / defense, never dividing by zero.
    pub fn ratio(&self, epsilon: f64) -> f64 {
        self.attack.max(epsilon) / self.defense.max(epsilon)
    }
}

impl Default for CoefficientPair {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

/// Foul-draw (attacker) against foul-commit (defender).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoulCoefficients {
    pub draw: f64,
    pub commit: f64,
}

impl Default for FoulCoefficients {
    fn default() -> Self {
        Self { draw: 1.0, commit: 1.0 }
    }
}

/// Per-tick multipliers. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoefficientPack {
    pub progress: CoefficientPair,
    pub final_third: CoefficientPair,
    /// attack = shot-attack, defense = goalkeeper-save
    pub shot: CoefficientPair,
    /// attack = retention, defense = press
    pub retention: CoefficientPair,
    pub foul: FoulCoefficients,
}

/// Live side-wide attack/defense pair for each team (carried in the token).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SideCoefficients {
    pub home: CoefficientPair,
    pub away: CoefficientPair,
}

impl SideCoefficients {
    pub fn get(&self, side: Side) -> CoefficientPair {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut CoefficientPair {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }
}

// ============================================================================
// Derivation
// ============================================================================

/// Symmetric pair from two subset averages.
pub fn derive_pair(attack_avg: f64, defense_avg: f64, cfg: &CoefficientConfig) -> CoefficientPair {
    let (attack, defense) = symmetric(attack_avg, defense_avg, cfg);
    CoefficientPair { attack: cfg.clamp(attack), defense: cfg.clamp(defense) }
}

fn symmetric(attack_avg: f64, defense_avg: f64, cfg: &CoefficientConfig) -> (f64, f64) {
    let sanitize = |v: f64| if v.is_finite() { v.max(cfg.epsilon) } else { cfg.epsilon };
    let ratio = sanitize(attack_avg) / sanitize(defense_avg);
    let delta = (ratio - 1.0) * cfg.dampening;
    (1.0 + delta, 1.0 - delta)
}

impl CoefficientPack {
    pub fn neutral() -> Self {
        Self::default()
    }

    /// Pack for one attacker/defender pair. A missing player on either side
    /// leaves the whole pack neutral.
    pub fn derive(
        attacker: Option<&PlayerSnapshot>,
        defender: Option<&PlayerSnapshot>,
        cfg: &CoefficientConfig,
    ) -> Self {
        let (Some(att), Some(def)) = (attacker, defender) else {
            return Self::neutral();
        };
        let a = &att.attributes;
        let d = &def.attributes;
        let pair = |att_set: &[Attr], def_set: &[Attr]| {
            derive_pair(a.average(att_set) as f64, d.average(def_set) as f64, cfg)
        };

        let (draw, commit) =
            symmetric(a.average(FOUL_DRAW) as f64, d.average(FOUL_COMMIT) as f64, cfg);

        Self {
            progress: pair(PROGRESS_ATTACK, PROGRESS_DEFENSE),
            final_third: pair(FINAL_THIRD_ATTACK, FINAL_THIRD_DEFENSE),
            shot: pair(SHOT_ATTACK, KEEPER_SAVE),
            retention: pair(RETENTION, PRESS),
            foul: FoulCoefficients { draw: cfg.clamp_foul(draw), commit: cfg.clamp_foul(commit) },
        }
    }

    /// Multiply in the side-wide pairs of the attacking and defending team.
    pub fn apply_side_wide(
        mut self,
        attacking: CoefficientPair,
        defending: CoefficientPair,
        cfg: &CoefficientConfig,
    ) -> Self {
        for pair in [&mut self.progress, &mut self.final_third, &mut self.shot, &mut self.retention] {
            pair.attack = cfg.clamp(pair.attack * attacking.attack);
            pair.defense = cfg.clamp(pair.defense * defending.defense);
        }
        self
    }

    /// Nudge the pack with the actors' traits. A disabled layer returns zero
    /// adjustments, leaving the pack bit-identical.
    pub fn apply_personality(
        mut self,
        layer: &dyn PersonalityLayer,
        attacker: Option<&PlayerSnapshot>,
        defender: Option<&PlayerSnapshot>,
        cfg: &CoefficientConfig,
    ) -> Self {
        if !layer.is_enabled() {
            return self;
        }
        let att = attacker.and_then(|p| p.traits.as_ref());
        let def = defender.and_then(|p| p.traits.as_ref());
        let scale = |value: f64, adj: f32| value * (1.0 + adj as f64);

        self.progress.attack = cfg.clamp(scale(self.progress.attack, layer.adjustment(att, Behavior::PassAccuracy)));
        self.progress.defense = cfg.clamp(scale(self.progress.defense, layer.adjustment(def, Behavior::Tackling)));
        self.final_third.attack =
            cfg.clamp(scale(self.final_third.attack, layer.adjustment(att, Behavior::DribbleSuccess)));
        self.final_third.defense =
            cfg.clamp(scale(self.final_third.defense, layer.adjustment(def, Behavior::Interception)));
        self.shot.attack = cfg.clamp(scale(self.shot.attack, layer.adjustment(att, Behavior::ShotAccuracy)));
        self.retention.attack =
            cfg.clamp(scale(self.retention.attack, layer.adjustment(att, Behavior::PressureHandling)));
        self.retention.defense = cfg.clamp(scale(self.retention.defense, layer.adjustment(def, Behavior::Pressing)));
        self.foul.commit = cfg.clamp_foul(scale(self.foul.commit, layer.adjustment(def, Behavior::FoulTendency)));
        self
    }

    /// Probability the fouled side keeps the ball.
    pub fn foul_retention(&self, cfg: &CoefficientConfig) -> f64 {
        let ratio = self.foul.draw.max(cfg.epsilon) / self.foul.commit.max(cfg.epsilon);
        (cfg.foul_retention_base * ratio).clamp(cfg.foul_retention_min, cfg.foul_retention_max)
    }

    /// Every multiplier, for range checks.
    pub fn values(&self) -> [f64; 10] {
        [
            self.progress.attack,
            self.progress.defense,
            self.final_third.attack,
            self.final_third.defense,
            self.shot.attack,
            self.shot.defense,
            self.retention.attack,
            self.retention.defense,
            self.foul.draw,
            self.foul.commit,
        ]
    }
}

// ============================================================================
// Table adjustment
// ============================================================================

/// Scale advancing transitions (MID→FINAL, FINAL→SHOT, both retaining) by
/// the matching ratio, then renormalize the whole table.
pub fn adjust_transitions(
    from: MacroState,
    rows: &[Transition],
    pack: &CoefficientPack,
    cfg: &CoefficientConfig,
) -> Vec<(Transition, f64)> {
    let mut weighted: Vec<(Transition, f64)> = rows
        .iter()
        .map(|t| {
            let factor = if t.is_advancing_from(from) {
                match from {
                    MacroState::OpenPlayMid => pack.progress.ratio(cfg.epsilon),
                    _ => pack.final_third.ratio(cfg.epsilon),
                }
            } else {
                1.0
            };
            (*t, t.p * factor)
        })
        .collect();
    super::deterministic::renormalize(&mut weighted);
    weighted
}

/// goal × (shot-attack / keeper-save); save and block × inverse; the rest
/// unchanged; renormalized.
pub fn reweight_shot_outcomes(
    outcomes: &[ShotOutcome],
    shot: CoefficientPair,
    epsilon: f64,
) -> Vec<(ShotOutcome, f64)> {
    let ratio = shot.ratio(epsilon);
    let mut weighted: Vec<(ShotOutcome, f64)> = outcomes
        .iter()
        .map(|o| {
            let factor = match o.result {
                ShotResult::Goal => ratio,
                ShotResult::Save | ShotResult::Block => 1.0 / ratio,
                ShotResult::Miss | ShotResult::Corner | ShotResult::Woodwork => 1.0,
            };
            (*o, o.p * factor)
        })
        .collect();
    super::deterministic::renormalize(&mut weighted);
    weighted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::PossessionDirective;
    use crate::models::{Line, PlayerAttributes};
    use crate::player::personality::{personality_layer, PersonalityTraits, Trait};

    fn player(line: Line, value: f32) -> PlayerSnapshot {
        PlayerSnapshot::new(1, "p", line).with_attributes(PlayerAttributes::uniform(value))
    }

    #[test]
    fn test_equal_averages_give_neutral() {
        let cfg = CoefficientConfig::default();
        let pack = CoefficientPack::derive(
            Some(&player(Line::MID, 64.0)),
            Some(&player(Line::MID, 64.0)),
            &cfg,
        );
        for v in pack.values() {
            assert!((v - 1.0).abs() < 1e-12);
        }
        assert!((pack.foul_retention(&cfg) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_missing_actor_is_neutral() {
        let cfg = CoefficientConfig::default();
        let pack = CoefficientPack::derive(Some(&player(Line::FWD, 90.0)), None, &cfg);
        assert_eq!(pack, CoefficientPack::neutral());
    }

    #[test]
    fn test_coefficients_clamped() {
        let cfg = CoefficientConfig::default();
        let pack = CoefficientPack::derive(
            Some(&player(Line::FWD, 100.0)),
            Some(&player(Line::DEF, 0.0)),
            &cfg,
        );
        assert_eq!(pack.progress.attack, cfg.max);
        assert_eq!(pack.progress.defense, cfg.min);
        assert_eq!(pack.foul.draw, cfg.foul_max);
        assert_eq!(pack.foul_retention(&cfg), cfg.foul_retention_max);
    }

    #[test]
    fn test_dampened_symmetric_delta() {
        let cfg = CoefficientConfig::default();
        let pair = derive_pair(75.0, 60.0, &cfg);
        // ratio 1.25, delta 0.125
        assert!((pair.attack - 1.125).abs() < 1e-12);
        assert!((pair.defense - 0.875).abs() < 1e-12);
    }

    #[test]
    fn test_side_wide_multiplies_and_reclamps() {
        let cfg = CoefficientConfig::default();
        let pack = CoefficientPack::neutral().apply_side_wide(
            CoefficientPair { attack: 1.2, defense: 1.0 },
            CoefficientPair { attack: 1.0, defense: 5.0 },
            &cfg,
        );
        assert!((pack.shot.attack - 1.2).abs() < 1e-12);
        assert_eq!(pack.shot.defense, cfg.max);
    }

    #[test]
    fn test_side_wide_nan_stays_in_range() {
        let cfg = CoefficientConfig::default();
        let pack = CoefficientPack::neutral().apply_side_wide(
            CoefficientPair { attack: f64::NAN, defense: 1.0 },
            CoefficientPair::NEUTRAL,
            &cfg,
        );
        for v in pack.values() {
            assert!(v >= cfg.min && v <= cfg.foul_max, "out of range: {}", v);
        }
        assert_eq!(pack.shot.attack, 1.0);
    }

    #[test]
    fn test_disabled_personality_leaves_pack_untouched() {
        let cfg = CoefficientConfig::default();
        let att = player(Line::FWD, 80.0).with_traits(PersonalityTraits::uniform(20));
        let def = player(Line::DEF, 70.0)
            .with_traits(PersonalityTraits::default().with(Trait::Aggression, 20));
        let base = CoefficientPack::derive(Some(&att), Some(&def), &cfg);

        let disabled = personality_layer(false);
        let same = base.apply_personality(disabled.as_ref(), Some(&att), Some(&def), &cfg);
        assert_eq!(same, base);

        let enabled = personality_layer(true);
        let nudged = base.apply_personality(enabled.as_ref(), Some(&att), Some(&def), &cfg);
        assert!(nudged.shot.attack >= base.shot.attack);
        assert!(nudged.foul.commit > base.foul.commit);
    }

    #[test]
    fn test_shot_reweighting_scenario() {
        let outcome = |result, p| ShotOutcome {
            result,
            to: MacroState::Gk,
            possession: PossessionDirective::Flip,
            p,
        };
        let table = [
            outcome(ShotResult::Goal, 0.3),
            outcome(ShotResult::Save, 0.4),
            outcome(ShotResult::Miss, 0.3),
        ];
        let reweighted =
            reweight_shot_outcomes(&table, CoefficientPair { attack: 1.3, defense: 0.8 }, 1e-6);
        let sum: f64 = reweighted.iter().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < 1e-9);
        assert!(reweighted[0].1 > 0.3);
        assert!(reweighted[1].1 < 0.4);
    }

    #[test]
    fn test_only_advancing_transitions_scaled() {
        let cfg = CoefficientConfig::default();
        let rows = [
            Transition { to: MacroState::OpenPlayFinal, possession: PossessionDirective::Retain, p: 0.5 },
            Transition { to: MacroState::OpenPlayFinal, possession: PossessionDirective::Flip, p: 0.5 },
        ];
        let mut pack = CoefficientPack::neutral();
        pack.progress = CoefficientPair { attack: 1.2, defense: 0.8 };
        let adjusted = adjust_transitions(MacroState::OpenPlayMid, &rows, &pack, &cfg);
        // 0.5 * 1.5 = 0.75 vs 0.5 → 0.6 / 0.4
        assert!((adjusted[0].1 - 0.6).abs() < 1e-9);
        assert!((adjusted[1].1 - 0.4).abs() < 1e-9);

        let untouched = adjust_transitions(MacroState::OpenPlayDef, &rows, &pack, &cfg);
        assert!((untouched[0].1 - 0.5).abs() < 1e-9);
    }

    // ========== Property-Based Tests ==========

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use crate::engine::spec::MarkovSpec;
        use proptest::prelude::*;

        proptest! {
            /// Property: derived pairs always land in the clamp band
            #[test]
            fn prop_derive_pair_clamped(a in -50.0f64..200.0, d in -50.0f64..200.0) {
                let cfg = CoefficientConfig::default();
                let pair = derive_pair(a, d, &cfg);
                prop_assert!(pair.attack >= cfg.min && pair.attack <= cfg.max);
                prop_assert!(pair.defense >= cfg.min && pair.defense <= cfg.max);
            }

            /// Property: reweighted shot outcomes stay a distribution
            #[test]
            fn prop_shot_reweight_sums_to_one(attack in 0.7f64..1.3, defense in 0.7f64..1.3) {
                let spec = MarkovSpec::embedded().unwrap();
                let weighted =
                    reweight_shot_outcomes(spec.shot_outcomes(), CoefficientPair { attack, defense }, 1e-6);
                let total: f64 = weighted.iter().map(|(_, p)| p).sum();
                prop_assert!((total - 1.0).abs() < 1e-9);
            }
        }
    }
}
