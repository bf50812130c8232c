//! Decision routing configuration

use serde::{Deserialize, Serialize};

/// Relative weights over the four action types.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionWeights {
    pub pass: f32,
    pub shoot: f32,
    pub dribble: f32,
    pub tackle: f32,
}

impl ActionWeights {
    pub const fn new(pass: f32, shoot: f32, dribble: f32, tackle: f32) -> Self {
        Self { pass, shoot, dribble, tackle }
    }
}

/// 의사결정 라우팅 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionConfig {
    // === Phase priors ===
    pub build_up: ActionWeights,
    pub progression: ActionWeights,
    pub final_third: ActionWeights,
    pub defending: ActionWeights,

    // === Risky actions ===
    /// 위험 행동 기준값 (기본: 0.55)
    pub risk_threshold: f32,
    /// flair 기여 비중 (기본: 0.6)
    pub risk_flair_weight: f32,
    /// 이 분 이후 지고 있으면 추가 의지 (기본: 75)
    pub late_minute: u32,
    /// 막판 열세 보너스 (기본: 0.15)
    pub losing_late_bonus: f32,

    // === Pass target ranking ===
    /// 이 점수 미만이면 패스 포기 (기본: 0.45)
    pub min_pass_confidence: f32,
    pub success_weight: f32,
    pub benefit_weight: f32,
    pub risk_weight: f32,
    pub preference_weight: f32,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            build_up: ActionWeights::new(0.82, 0.0, 0.18, 0.0),
            progression: ActionWeights::new(0.70, 0.04, 0.26, 0.0),
            final_third: ActionWeights::new(0.48, 0.30, 0.22, 0.0),
            defending: ActionWeights::new(0.0, 0.0, 0.0, 1.0),

            risk_threshold: 0.55,
            risk_flair_weight: 0.6,
            late_minute: 75,
            losing_late_bonus: 0.15,

            min_pass_confidence: 0.45,
            success_weight: 0.5,
            benefit_weight: 0.3,
            risk_weight: 0.2,
            preference_weight: 0.1,
        }
    }
}

impl DecisionConfig {
    pub fn cagey() -> Self {
        Self {
            final_third: ActionWeights::new(0.60, 0.22, 0.18, 0.0),
            risk_threshold: 0.62,
            ..Self::default()
        }
    }

    pub fn open() -> Self {
        Self {
            progression: ActionWeights::new(0.62, 0.06, 0.32, 0.0),
            final_third: ActionWeights::new(0.40, 0.36, 0.24, 0.0),
            risk_threshold: 0.48,
            min_pass_confidence: 0.40,
            ..Self::default()
        }
    }
}
