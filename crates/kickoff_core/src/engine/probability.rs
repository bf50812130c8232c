//! Action-level probability resolvers
//!
//! All functions are pure - they take attributes and context as input and
//! return a probability. Each one blends:
//! - an actor-skill term from a small attribute subset
//! - a momentum term (acting side's view, ±1)
//! - a late-match pressure term
//! - an optional personality adjustment (already resolved by the caller)
//!
//! 모든 해석기는 주요 능력치에 대해 단조 증가이며 결과는 항상 클램프된다.

use super::config::ResolverConfig;
use super::zone::{PassDistance, PitchZone, ZoneLine};
use crate::models::{Attr, PlayerAttributes, NEUTRAL_ATTRIBUTE};

/// Neutral 0-1 skill used when the opposing player is unknown.
const NEUTRAL_SKILL: f32 = NEUTRAL_ATTRIBUTE / 100.0;

// ============================================================================
// Attribute blends
// ============================================================================

const PASSER: &[(Attr, f32)] = &[
    (Attr::Passing, 0.45),
    (Attr::Vision, 0.25),
    (Attr::Technique, 0.15),
    (Attr::Decisions, 0.15),
];
const KEEPER_DISTRIBUTION: &[(Attr, f32)] =
    &[(Attr::Distribution, 0.6), (Attr::CommandOfArea, 0.2), (Attr::Passing, 0.2)];
const PASS_CONTEST: &[(Attr, f32)] = &[
    (Attr::Marking, 0.35),
    (Attr::Tackling, 0.25),
    (Attr::Anticipation, 0.25),
    (Attr::Positioning, 0.15),
];
const SHOOTER: &[(Attr, f32)] = &[
    (Attr::Finishing, 0.40),
    (Attr::ShotAccuracy, 0.25),
    (Attr::Composure, 0.20),
    (Attr::Technique, 0.15),
];
const SHOT_STOPPER: &[(Attr, f32)] = &[
    (Attr::Reflexes, 0.35),
    (Attr::Handling, 0.25),
    (Attr::OneOnOnes, 0.20),
    (Attr::Positioning, 0.20),
];
const DRIBBLER: &[(Attr, f32)] = &[
    (Attr::Dribbling, 0.40),
    (Attr::Agility, 0.20),
    (Attr::Balance, 0.15),
    (Attr::Pace, 0.15),
    (Attr::Flair, 0.10),
];
const DRIBBLE_STOPPER: &[(Attr, f32)] = &[
    (Attr::Tackling, 0.35),
    (Attr::Positioning, 0.20),
    (Attr::Anticipation, 0.20),
    (Attr::Pace, 0.15),
    (Attr::Strength, 0.10),
];
const FOUL_PRONE: &[(Attr, f32)] =
    &[(Attr::Aggression, 0.5), (Attr::Strength, 0.2), (Attr::Tackling, -0.1), (Attr::Decisions, -0.2)];
const INTERCEPTOR: &[(Attr, f32)] =
    &[(Attr::Anticipation, 0.45), (Attr::Positioning, 0.30), (Attr::Concentration, 0.25)];

/// Weighted 0-1 blend allowing negative weights (normalized by |w|).
fn signed_blend(attrs: &PlayerAttributes, weighted: &[(Attr, f32)]) -> f32 {
    let total: f32 = weighted.iter().map(|(_, w)| w.abs()).sum();
    if total <= 0.0 {
        return 0.0;
    }
    weighted.iter().map(|(a, w)| attrs.normalized(*a) * w).sum::<f32>() / total
}

// ============================================================================
// Context
// ============================================================================

/// Situation an action is resolved in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolveContext {
    /// Acting side's zone.
    pub zone: PitchZone,
    /// Acting side's momentum, [-1, 1].
    pub momentum: f32,
    pub minute: u32,
    /// Goal difference from the acting side's view.
    pub score_diff: i32,
    /// Personality adjustment, [-0.25, 0.25].
    pub personality: f32,
}

impl ResolveContext {
    pub fn new(zone: PitchZone) -> Self {
        Self { zone, momentum: 0.0, minute: 1, score_diff: 0, personality: 0.0 }
    }

    pub fn with_momentum(mut self, momentum: f32) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn at_minute(mut self, minute: u32, score_diff: i32) -> Self {
        self.minute = minute;
        self.score_diff = score_diff;
        self
    }

    pub fn with_personality(mut self, adjustment: f32) -> Self {
        self.personality = adjustment;
        self
    }
}

fn momentum_term(momentum: f32, cfg: &ResolverConfig) -> f32 {
    let m = if momentum.is_finite() { momentum.clamp(-1.0, 1.0) } else { 0.0 };
    m * cfg.momentum_weight
}

fn personality_term(adjustment: f32) -> f32 {
    if adjustment.is_finite() {
        adjustment.clamp(-0.25, 0.25)
    } else {
        0.0
    }
}

/// 0 before the late phase, rising to 1 at full time; halved when the game
/// is not close.
pub fn match_pressure(minute: u32, score_diff: i32, cfg: &ResolverConfig) -> f32 {
    let late = cfg.late_minute.min(89);
    if minute <= late {
        return 0.0;
    }
    let progress = ((minute - late) as f32 / (90 - late) as f32).min(1.0);
    let closeness = if score_diff.abs() <= 1 { 1.0 } else { 0.5 };
    progress * closeness
}

fn clamp_unit(p: f32) -> f32 {
    if p.is_finite() {
        p.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

// ============================================================================
// Resolvers
// ============================================================================

/// Pass completion.
///
/// Goalkeeper → defense distribution leans on distribution/command and is
/// near-certain; other passes lean on passing/vision against the nearest
/// defender's marking/tackling and lose value with distance.
pub fn pass_success(
    passer: &PlayerAttributes,
    defender: Option<&PlayerAttributes>,
    to: PitchZone,
    ctx: &ResolveContext,
    cfg: &ResolverConfig,
) -> f32 {
    if ctx.zone.line() == ZoneLine::Goalkeeper && to.line() == ZoneLine::Defense {
        let skill = passer.blend(KEEPER_DISTRIBUTION);
        return clamp_unit(cfg.keeper_pass_floor + (1.0 - cfg.keeper_pass_floor) * skill * 0.9);
    }

    let skill = passer.blend(PASSER);
    let contest = defender.map_or(NEUTRAL_SKILL, |d| d.blend(PASS_CONTEST));
    let distance_penalty = match ctx.zone.pass_distance(to) {
        PassDistance::Short => 0.0,
        PassDistance::Medium => cfg.medium_pass_penalty,
        PassDistance::Long => cfg.long_pass_penalty,
    };
    let pressure = match_pressure(ctx.minute, ctx.score_diff, cfg) * cfg.pressure_weight * 0.5;

    clamp_unit(
        cfg.pass_base
            + cfg.pass_skill_weight * (skill - 0.5)
            - cfg.pass_defender_weight * (contest - 0.5)
            - distance_penalty
            + momentum_term(ctx.momentum, cfg)
            - pressure
            + personality_term(ctx.personality),
    )
}

/// Shot on target beating the keeper.
pub fn shot_success(
    shooter: &PlayerAttributes,
    keeper: Option<&PlayerAttributes>,
    ctx: &ResolveContext,
    cfg: &ResolverConfig,
) -> f32 {
    let skill = shooter.blend(SHOOTER);
    let stopper = keeper.map_or(NEUTRAL_SKILL, |k| k.blend(SHOT_STOPPER));
    let proximity = 0.5 + 0.5 * ctx.zone.goal_proximity();
    // late, close games punish poor composure
    let nerves = match_pressure(ctx.minute, ctx.score_diff, cfg)
        * cfg.pressure_weight
        * (1.0 - shooter.normalized(Attr::Composure));

    let p = cfg.shot_base
        + cfg.shot_skill_weight * skill * proximity
        - cfg.shot_keeper_weight * (stopper - 0.5)
        + momentum_term(ctx.momentum, cfg)
        - nerves
        + personality_term(ctx.personality);
    if p.is_finite() {
        p.clamp(cfg.shot_floor, cfg.shot_ceiling)
    } else {
        cfg.shot_floor
    }
}

/// Always strictly below [`shot_success`] for the same inputs.
pub fn long_shot_success(
    shooter: &PlayerAttributes,
    keeper: Option<&PlayerAttributes>,
    ctx: &ResolveContext,
    cfg: &ResolverConfig,
) -> f32 {
    let range = shooter.normalized(Attr::LongRange);
    let factor = (cfg.long_shot_base_factor + cfg.long_shot_range_factor * range).min(0.99);
    shot_success(shooter, keeper, ctx, cfg) * factor
}

/// Take-on success, logistic in the skill gap, bounded away from 0 and 1.
pub fn dribble_success(
    dribbler: &PlayerAttributes,
    defender: Option<&PlayerAttributes>,
    ctx: &ResolveContext,
    cfg: &ResolverConfig,
) -> f32 {
    let attack = dribbler.blend(DRIBBLER);
    let defend = defender.map_or(NEUTRAL_SKILL, |d| d.blend(DRIBBLE_STOPPER));
    let edge = attack - defend
        + momentum_term(ctx.momentum, cfg)
        + personality_term(ctx.personality) * 0.5;
    let logistic = 1.0 / (1.0 + (-cfg.dribble_steepness * edge).exp());
    let p = cfg.dribble_floor + (cfg.dribble_ceiling - cfg.dribble_floor) * logistic;
    if p.is_finite() {
        p.clamp(cfg.dribble_floor, cfg.dribble_ceiling)
    } else {
        cfg.dribble_floor
    }
}

/// Chance the defender commits a foul. `ctx.zone` is the attacking side's
/// zone, so the deeper the attack the higher the chance.
pub fn foul_probability(
    defender: &PlayerAttributes,
    attacker: Option<&PlayerAttributes>,
    ctx: &ResolveContext,
    cfg: &ResolverConfig,
) -> f32 {
    let proneness = signed_blend(defender, FOUL_PRONE);
    let draw = attacker.map_or(NEUTRAL_SKILL, |a| a.normalized(Attr::Dribbling));
    let pressure = match_pressure(ctx.minute, -ctx.score_diff, cfg) * cfg.pressure_weight * 0.4;

    let p = cfg.foul_base
        + cfg.foul_zone_weight * ctx.zone.goal_proximity()
        + cfg.foul_aggression_weight * proneness
        + 0.03 * (draw - 0.5)
        + pressure
        + personality_term(ctx.personality) * 0.2;
    if p.is_finite() {
        p.clamp(0.0, cfg.foul_ceiling)
    } else {
        0.0
    }
}

/// Chance the defender reads and cuts out a pass.
pub fn interception_probability(
    defender: &PlayerAttributes,
    passer: Option<&PlayerAttributes>,
    distance: PassDistance,
    ctx: &ResolveContext,
    cfg: &ResolverConfig,
) -> f32 {
    let read = defender.blend(INTERCEPTOR);
    let vision = passer.map_or(NEUTRAL_SKILL, |p| p.normalized(Attr::Vision));
    let distance_bonus = match distance {
        PassDistance::Short => 0.0,
        PassDistance::Medium => 0.04,
        PassDistance::Long => 0.10,
    };
    clamp_unit(
        cfg.interception_base
            + cfg.interception_weight * (read - vision)
            + distance_bonus
            + momentum_term(ctx.momentum, cfg) * 0.5
            + personality_term(ctx.personality) * 0.3,
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(v: f32) -> PlayerAttributes {
        PlayerAttributes::uniform(v)
    }

    fn ctx(zone: PitchZone) -> ResolveContext {
        ResolveContext::new(zone)
    }

    #[test]
    fn test_keeper_distribution_near_certain() {
        let cfg = ResolverConfig::default();
        let keeper = attrs(40.0);
        let p = pass_success(&keeper, None, PitchZone::DefenseLeft, &ctx(PitchZone::Goalkeeper), &cfg);
        assert!(p >= cfg.keeper_pass_floor, "keeper pass: {}", p);
    }

    #[test]
    fn test_pass_monotonic_in_passing() {
        let cfg = ResolverConfig::default();
        let def = attrs(70.0);
        let c = ctx(PitchZone::MidCentre);
        let mut last = 0.0;
        for v in [0.0, 25.0, 50.0, 75.0, 100.0] {
            let mut a = attrs(60.0);
            a.passing = v;
            let p = pass_success(&a, Some(&def), PitchZone::AttackingMidCentre, &c, &cfg);
            assert!(p >= last, "pass not monotonic at {}: {} < {}", v, p, last);
            last = p;
        }
    }

    #[test]
    fn test_long_passes_harder() {
        let cfg = ResolverConfig::default();
        let a = attrs(70.0);
        let c = ctx(PitchZone::DefenseLeft);
        let short = pass_success(&a, None, PitchZone::DefenseCentre, &c, &cfg);
        let long = pass_success(&a, None, PitchZone::AttackingMidRight, &c, &cfg);
        assert!(short > long);
    }

    #[test]
    fn test_shot_monotonic_and_long_shot_lower() {
        let cfg = ResolverConfig::default();
        let keeper = attrs(70.0);
        let c = ctx(PitchZone::ForwardCentre);
        let mut last = 0.0;
        for v in [0.0, 20.0, 40.0, 60.0, 80.0, 100.0] {
            let mut s = attrs(65.0);
            s.finishing = v;
            let p = shot_success(&s, Some(&keeper), &c, &cfg);
            let lp = long_shot_success(&s, Some(&keeper), &c, &cfg);
            assert!(p >= last);
            assert!(lp < p, "long shot {} not below shot {}", lp, p);
            last = p;
        }
    }

    #[test]
    fn test_dribble_bounds_and_momentum() {
        let cfg = ResolverConfig::default();
        let weak = attrs(10.0);
        let strong = attrs(100.0);
        let c = ctx(PitchZone::MidLeft);

        let hopeless = dribble_success(&weak, Some(&strong), &c, &cfg);
        let easy = dribble_success(&strong, Some(&weak), &c, &cfg);
        assert!(hopeless >= 0.05 && hopeless < 0.15, "hopeless: {}", hopeless);
        assert!(easy <= 0.95 && easy > 0.85, "easy: {}", easy);

        let even = attrs(70.0);
        let flat = dribble_success(&even, Some(&even), &c, &cfg);
        let riding = dribble_success(&even, Some(&even), &c.with_momentum(0.8), &cfg);
        assert!(riding > flat);
    }

    #[test]
    fn test_dribble_monotonic_in_dribbling() {
        let cfg = ResolverConfig::default();
        let def = attrs(70.0);
        let c = ctx(PitchZone::AttackingMidCentre);
        let mut last = 0.0;
        for v in [0.0, 25.0, 50.0, 75.0, 100.0] {
            let mut a = attrs(70.0);
            a.dribbling = v;
            let p = dribble_success(&a, Some(&def), &c, &cfg);
            assert!(p >= last, "dribbling {} gave {} < {}", v, p, last);
            last = p;
        }
    }

    #[test]
    fn test_foul_rises_towards_own_goal() {
        let cfg = ResolverConfig::default();
        let def = attrs(70.0);
        let att = attrs(70.0);
        let deep = foul_probability(&def, Some(&att), &ctx(PitchZone::ForwardCentre), &cfg);
        let middle = foul_probability(&def, Some(&att), &ctx(PitchZone::MidCentre), &cfg);
        assert!(deep >= middle);
    }

    #[test]
    fn test_outputs_in_unit_range_at_extremes() {
        let cfg = ResolverConfig::default();
        for v in [0.0, 100.0] {
            let a = attrs(v);
            for (zone, m) in [(PitchZone::Goalkeeper, -1.0), (PitchZone::ForwardRight, 1.0)] {
                let c = ctx(zone).with_momentum(m).at_minute(90, 0).with_personality(0.25);
                for p in [
                    pass_success(&a, Some(&a), PitchZone::MidCentre, &c, &cfg),
                    shot_success(&a, Some(&a), &c, &cfg),
                    long_shot_success(&a, Some(&a), &c, &cfg),
                    dribble_success(&a, Some(&a), &c, &cfg),
                    foul_probability(&a, Some(&a), &c, &cfg),
                    interception_probability(&a, Some(&a), PassDistance::Long, &c, &cfg),
                ] {
                    assert!((0.0..=1.0).contains(&p), "out of range: {}", p);
                }
            }
        }
    }

    #[test]
    fn test_match_pressure_only_late() {
        let cfg = ResolverConfig::default();
        assert_eq!(match_pressure(30, 0, &cfg), 0.0);
        assert!(match_pressure(88, 0, &cfg) > match_pressure(80, 0, &cfg));
        assert!(match_pressure(88, 3, &cfg) < match_pressure(88, 0, &cfg));
    }

    #[test]
    fn test_interception_monotonic_in_anticipation() {
        let cfg = ResolverConfig::default();
        let c = ctx(PitchZone::MidCentre);
        let passer = attrs(70.0);
        let mut low = attrs(70.0);
        low.anticipation = 30.0;
        let mut high = attrs(70.0);
        high.anticipation = 95.0;
        assert!(
            interception_probability(&high, Some(&passer), PassDistance::Medium, &c, &cfg)
                > interception_probability(&low, Some(&passer), PassDistance::Medium, &c, &cfg)
        );
    }

    // ========== Property-Based Tests ==========

    #[cfg(all(test, feature = "proptest"))]
    mod proptests {
        use super::*;
        use crate::engine::zone::Channel;
        use proptest::prelude::*;

        fn zone(depth: u8, channel: u8) -> PitchZone {
            let channel = match channel {
                0 => Channel::Left,
                1 => Channel::Centre,
                _ => Channel::Right,
            };
            PitchZone::from_parts(ZoneLine::from_depth(depth), channel)
        }

        proptest! {
            /// Property: every resolver stays inside [0, 1] for any inputs
            #[test]
            fn prop_resolvers_bounded(
                a in 1.0f32..100.0,
                d in 1.0f32..100.0,
                momentum in -1.0f32..1.0,
                minute in 1u32..95,
                diff in -5i32..5,
                depth in 0u8..6,
                channel in 0u8..3,
            ) {
                let cfg = ResolverConfig::default();
                let (att, def) = (attrs(a), attrs(d));
                let c = ResolveContext::new(zone(depth, channel))
                    .with_momentum(momentum)
                    .at_minute(minute, diff);
                for p in [
                    pass_success(&att, Some(&def), PitchZone::MidCentre, &c, &cfg),
                    shot_success(&att, Some(&def), &c, &cfg),
                    long_shot_success(&att, Some(&def), &c, &cfg),
                    dribble_success(&att, Some(&def), &c, &cfg),
                    foul_probability(&def, Some(&att), &c, &cfg),
                    interception_probability(&def, Some(&att), PassDistance::Long, &c, &cfg),
                ] {
                    prop_assert!((0.0..=1.0).contains(&p), "out of range: {}", p);
                }
            }

            /// Property: long shots never beat the normal shot
            #[test]
            fn prop_long_shot_below_shot(a in 1.0f32..100.0, k in 1.0f32..100.0) {
                let cfg = ResolverConfig::default();
                let c = ResolveContext::new(PitchZone::ForwardCentre);
                let shot = shot_success(&attrs(a), Some(&attrs(k)), &c, &cfg);
                let long = long_shot_success(&attrs(a), Some(&attrs(k)), &c, &cfg);
                prop_assert!(long < shot);
            }
        }
    }
}
