//! Momentum and action simulator configuration

use serde::{Deserialize, Serialize};

/// 모멘텀 변화량 (홈 관점, ±1 범위)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    pub goal_swing: f32,
    pub shot_swing: f32,
    pub dribble_swing: f32,
    pub turnover_swing: f32,
    /// 분당 감쇠 (기본: 0.85)
    pub decay: f32,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            goal_swing: 0.35,
            shot_swing: 0.08,
            dribble_swing: 0.04,
            turnover_swing: 0.05,
            decay: 0.85,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionSimConfig {
    /// 분당 최대 액션 수 (기본: 8)
    pub actions_per_minute: u32,
    /// 경합 액션 전 파울 체크 (기본: true)
    pub foul_checks: bool,
}

impl Default for ActionSimConfig {
    fn default() -> Self {
        Self { actions_per_minute: 8, foul_checks: true }
    }
}
