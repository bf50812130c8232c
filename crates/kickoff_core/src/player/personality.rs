//! Player personality traits and the modifier layer
//!
//! 성격 특성(1-20)은 능력치와 독립적인 값으로, 확률에 작은 대칭 보정
//! (최대 ±0.25)을 더하고 의사결정 가중치를 기울인다.
//!
//! The layer is a strategy object chosen once when the engine is built:
//! [`DisabledPersonality`] ignores every trait, [`TraitPersonality`] applies
//! the per-trait behavior tables below.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub const TRAIT_MIN: u8 = 1;
pub const TRAIT_MAX: u8 = 20;
/// Scale midpoint; a trait at this value contributes nothing.
pub const TRAIT_MIDPOINT: f32 = 10.5;
/// Largest absolute adjustment any behavior can receive.
pub const MAX_MODIFIER: f32 = 0.25;

/// Personality trait identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "snake_case")]
pub enum Trait {
    Aggression,
    Confidence,
    RiskTaking,
    Patience,
    Composure,
    Creativity,
    Discipline,
    Teamwork,
    Determination,
    Leadership,
}

impl Trait {
    pub const ALL: [Trait; 10] = [
        Trait::Aggression,
        Trait::Confidence,
        Trait::RiskTaking,
        Trait::Patience,
        Trait::Composure,
        Trait::Creativity,
        Trait::Discipline,
        Trait::Teamwork,
        Trait::Determination,
        Trait::Leadership,
    ];

    /// (behavior, weight) pairs this trait pushes on.
    pub fn weights(&self) -> &'static [(Behavior, f32)] {
        use Behavior::*;
        match self {
            Trait::Aggression => &[(FoulTendency, 1.0), (Pressing, 0.8), (Tackling, 0.6)],
            Trait::Confidence => {
                &[(ShotAccuracy, 0.6), (DribbleSuccess, 0.7), (PenaltyAccuracy, 0.8)]
            }
            Trait::RiskTaking => &[
                (LongShotFrequency, 1.0),
                (LongPassFrequency, 0.8),
                (SoloDribbleFrequency, 0.9),
                (PassAccuracy, -0.3),
            ],
            Trait::Patience => {
                &[(PassAccuracy, 0.7), (FoulTendency, -0.5), (LongShotFrequency, -0.4)]
            }
            Trait::Composure => {
                &[(ShotAccuracy, 0.5), (PenaltyAccuracy, 0.7), (PressureHandling, 0.6)]
            }
            Trait::Creativity => {
                &[(ThroughBallFrequency, 0.9), (SoloDribbleFrequency, 0.4), (DribbleSuccess, 0.3)]
            }
            Trait::Discipline => &[(FoulTendency, -0.8), (Interception, 0.4), (Pressing, -0.2)],
            Trait::Teamwork => &[
                (PassAccuracy, 0.4),
                (ShortPassPreference, 0.8),
                (SoloDribbleFrequency, -0.5),
            ],
            Trait::Determination => &[(Pressing, 0.5), (Tackling, 0.4), (LateGameRisk, 0.7)],
            Trait::Leadership => &[(PressureHandling, 0.7), (Interception, 0.2)],
        }
    }
}

/// Target behavior a trait modifier feeds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    FoulTendency,
    Pressing,
    Tackling,
    Interception,
    ShotAccuracy,
    DribbleSuccess,
    PenaltyAccuracy,
    PassAccuracy,
    LongShotFrequency,
    LongPassFrequency,
    SoloDribbleFrequency,
    ThroughBallFrequency,
    ShortPassPreference,
    LateGameRisk,
    PressureHandling,
}

/// Optional 1-20 trait record. Missing traits are neutral.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalityTraits {
    pub aggression: Option<u8>,
    pub confidence: Option<u8>,
    pub risk_taking: Option<u8>,
    pub patience: Option<u8>,
    pub composure: Option<u8>,
    pub creativity: Option<u8>,
    pub discipline: Option<u8>,
    pub teamwork: Option<u8>,
    pub determination: Option<u8>,
    pub leadership: Option<u8>,
}

impl PersonalityTraits {
    /// Every trait set to `value` (clamped to the scale).
    pub fn uniform(value: u8) -> Self {
        let v = Some(value.clamp(TRAIT_MIN, TRAIT_MAX));
        Self {
            aggression: v,
            confidence: v,
            risk_taking: v,
            patience: v,
            composure: v,
            creativity: v,
            discipline: v,
            teamwork: v,
            determination: v,
            leadership: v,
        }
    }

    pub fn get(&self, t: Trait) -> Option<u8> {
        match t {
            Trait::Aggression => self.aggression,
            Trait::Confidence => self.confidence,
            Trait::RiskTaking => self.risk_taking,
            Trait::Patience => self.patience,
            Trait::Composure => self.composure,
            Trait::Creativity => self.creativity,
            Trait::Discipline => self.discipline,
            Trait::Teamwork => self.teamwork,
            Trait::Determination => self.determination,
            Trait::Leadership => self.leadership,
        }
    }

    pub fn set(&mut self, t: Trait, value: u8) {
        let v = Some(value.clamp(TRAIT_MIN, TRAIT_MAX));
        match t {
            Trait::Aggression => self.aggression = v,
            Trait::Confidence => self.confidence = v,
            Trait::RiskTaking => self.risk_taking = v,
            Trait::Patience => self.patience = v,
            Trait::Composure => self.composure = v,
            Trait::Creativity => self.creativity = v,
            Trait::Discipline => self.discipline = v,
            Trait::Teamwork => self.teamwork = v,
            Trait::Determination => self.determination = v,
            Trait::Leadership => self.leadership = v,
        }
    }

    pub fn with(mut self, t: Trait, value: u8) -> Self {
        self.set(t, value);
        self
    }

    /// Normalized modifier in [-0.25, +0.25]; absent traits give 0.
    pub fn modifier(&self, t: Trait) -> f32 {
        match self.get(t) {
            Some(v) => normalize_trait(v),
            None => 0.0,
        }
    }

    /// Summed contribution of every trait to `behavior`, clamped to the band.
    pub fn behavior_modifier(&self, behavior: Behavior) -> f32 {
        let total: f32 = Trait::ALL
            .iter()
            .map(|t| {
                let m = self.modifier(*t);
                if m == 0.0 {
                    return 0.0;
                }
                t.weights()
                    .iter()
                    .filter(|(b, _)| *b == behavior)
                    .map(|(_, w)| m * w)
                    .sum::<f32>()
            })
            .sum();
        total.clamp(-MAX_MODIFIER, MAX_MODIFIER)
    }

    /// Preset profile with +/-3 deterministic variation.
    pub fn generate_archetype(archetype: PersonalityArchetype, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let base = archetype.base_profile();
        let mut traits = PersonalityTraits::default();
        for (t, v) in Trait::ALL.iter().zip(base.iter()) {
            traits.set(*t, apply_variation(*v, 3, &mut rng));
        }
        traits
    }
}

/// (v - 10.5) / 9.5 * 0.25, input clamped to 1..=20.
pub fn normalize_trait(value: u8) -> f32 {
    let v = value.clamp(TRAIT_MIN, TRAIT_MAX) as f32;
    let half_span = (TRAIT_MAX - TRAIT_MIN) as f32 / 2.0;
    ((v - TRAIT_MIDPOINT) / half_span * MAX_MODIFIER).clamp(-MAX_MODIFIER, MAX_MODIFIER)
}

fn apply_variation(base: u8, variation: u8, rng: &mut ChaCha8Rng) -> u8 {
    let min_val = base.saturating_sub(variation).max(TRAIT_MIN);
    let max_val = (base + variation).min(TRAIT_MAX);
    rng.gen_range(min_val..=max_val)
}

/// Personality archetypes for fixtures and generated squads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PersonalityArchetype {
    /// Takes players on, shoots from anywhere
    Maverick,
    /// Keeps the ball moving, rarely loses it
    Metronome,
    /// Wins the ball back at any cost
    Enforcer,
    /// Calm under pressure, organizes others
    Captain,
    #[default]
    Steady,
}

impl PersonalityArchetype {
    /// Values in [`Trait::ALL`] order.
    fn base_profile(&self) -> [u8; 10] {
        match self {
            PersonalityArchetype::Maverick => [11, 17, 18, 5, 12, 17, 7, 7, 13, 9],
            PersonalityArchetype::Metronome => [7, 12, 5, 17, 15, 12, 15, 17, 11, 12],
            PersonalityArchetype::Enforcer => [18, 11, 9, 8, 9, 6, 6, 12, 17, 13],
            PersonalityArchetype::Captain => [12, 15, 10, 13, 17, 11, 15, 15, 17, 19],
            PersonalityArchetype::Steady => [10, 10, 10, 11, 11, 10, 11, 11, 10, 10],
        }
    }
}

/// Strategy object applying (or ignoring) trait modifiers.
pub trait PersonalityLayer: Send + Sync + fmt::Debug {
    fn is_enabled(&self) -> bool;

    /// Additive adjustment for `behavior`, in [-0.25, +0.25].
    fn adjustment(&self, traits: Option<&PersonalityTraits>, behavior: Behavior) -> f32;

    /// Base probability plus the adjustment, clamped to [0, 1].
    fn adjust_probability(
        &self,
        base: f32,
        traits: Option<&PersonalityTraits>,
        behavior: Behavior,
    ) -> f32 {
        (base + self.adjustment(traits, behavior)).clamp(0.0, 1.0)
    }

    /// Scales a non-negative choice weight by (1 + adjustment).
    fn adjust_weight(
        &self,
        weight: f32,
        traits: Option<&PersonalityTraits>,
        behavior: Behavior,
    ) -> f32 {
        (weight * (1.0 + self.adjustment(traits, behavior))).max(0.0)
    }
}

/// Flag off: identical to a roster with no traits at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPersonality;

impl PersonalityLayer for DisabledPersonality {
    fn is_enabled(&self) -> bool {
        false
    }

    fn adjustment(&self, _traits: Option<&PersonalityTraits>, _behavior: Behavior) -> f32 {
        0.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TraitPersonality;

impl PersonalityLayer for TraitPersonality {
    fn is_enabled(&self) -> bool {
        true
    }

    fn adjustment(&self, traits: Option<&PersonalityTraits>, behavior: Behavior) -> f32 {
        traits.map_or(0.0, |t| t.behavior_modifier(behavior))
    }
}

/// Pick the layer once, at engine construction.
pub fn personality_layer(enabled: bool) -> Arc<dyn PersonalityLayer> {
    if enabled {
        Arc::new(TraitPersonality)
    } else {
        Arc::new(DisabledPersonality)
    }
}
