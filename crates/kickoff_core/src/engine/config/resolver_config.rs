//! Action resolver configuration

use serde::{Deserialize, Serialize};

/// 액션 확률 해석기 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    // === Pass ===
    /// 평균 대 평균 패스 성공률 (기본: 0.75)
    pub pass_base: f32,
    /// 패서 스킬 가중치 (기본: 0.40)
    pub pass_skill_weight: f32,
    /// 수비수 방해 가중치 (기본: 0.25)
    pub pass_defender_weight: f32,
    /// 골키퍼 → 수비 짧은 배급 하한 (기본: 0.93)
    pub keeper_pass_floor: f32,
    pub medium_pass_penalty: f32,
    pub long_pass_penalty: f32,

    // === Shot ===
    pub shot_base: f32,
    pub shot_skill_weight: f32,
    pub shot_keeper_weight: f32,
    pub shot_floor: f32,
    pub shot_ceiling: f32,
    /// long shot = shot * (base_factor + range_factor * long_range)
    pub long_shot_base_factor: f32,
    pub long_shot_range_factor: f32,

    // === Dribble ===
    /// 로지스틱 기울기 (기본: 6.0)
    pub dribble_steepness: f32,
    pub dribble_floor: f32,
    pub dribble_ceiling: f32,

    // === Foul ===
    pub foul_base: f32,
    /// 자기 골문에 가까울수록 증가 (기본: 0.10)
    pub foul_zone_weight: f32,
    pub foul_aggression_weight: f32,
    pub foul_ceiling: f32,

    // === Interception ===
    pub interception_base: f32,
    pub interception_weight: f32,

    // === Context ===
    /// 모멘텀 ±1.0 이 주는 최대 보정 (기본: 0.06)
    pub momentum_weight: f32,
    /// 막판/접전 압박 보정 (기본: 0.05)
    pub pressure_weight: f32,
    /// 이 분 이후를 막판으로 본다 (기본: 75)
    pub late_minute: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            pass_base: 0.75,
            pass_skill_weight: 0.40,
            pass_defender_weight: 0.25,
            keeper_pass_floor: 0.93,
            medium_pass_penalty: 0.05,
            long_pass_penalty: 0.12,

            shot_base: 0.08,
            shot_skill_weight: 0.30,
            shot_keeper_weight: 0.18,
            shot_floor: 0.02,
            shot_ceiling: 0.75,
            long_shot_base_factor: 0.30,
            long_shot_range_factor: 0.25,

            dribble_steepness: 6.0,
            dribble_floor: 0.05,
            dribble_ceiling: 0.95,

            foul_base: 0.04,
            foul_zone_weight: 0.10,
            foul_aggression_weight: 0.08,
            foul_ceiling: 0.35,

            interception_base: 0.10,
            interception_weight: 0.25,

            momentum_weight: 0.06,
            pressure_weight: 0.05,
            late_minute: 75,
        }
    }
}

impl ResolverConfig {
    /// 적은 슛 성공, 더 많은 파울
    pub fn cagey() -> Self {
        Self {
            shot_base: 0.06,
            shot_skill_weight: 0.26,
            foul_base: 0.05,
            momentum_weight: 0.04,
            ..Self::default()
        }
    }

    /// 더 많은 골, 더 과감한 드리블
    pub fn open() -> Self {
        Self {
            shot_base: 0.10,
            shot_skill_weight: 0.34,
            dribble_steepness: 5.0,
            momentum_weight: 0.08,
            ..Self::default()
        }
    }
}
