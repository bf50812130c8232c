//! Coefficient engine configuration

use serde::{Deserialize, Serialize};

/// 계수 감쇠/클램프 파라미터
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoefficientConfig {
    /// delta = (ratio - 1) * dampening (기본: 0.5)
    pub dampening: f64,
    /// 일반 계수 하한 (기본: 0.7)
    pub min: f64,
    /// 일반 계수 상한 (기본: 1.3)
    pub max: f64,
    /// 파울 계수 하한 (기본: 0.7)
    pub foul_min: f64,
    /// 파울 계수 상한 (기본: 1.4)
    pub foul_max: f64,
    /// 평균 능력치 하한 (0 나누기 방지)
    pub epsilon: f64,

    // === Post-foul retention ===
    pub foul_retention_base: f64,
    pub foul_retention_min: f64,
    pub foul_retention_max: f64,

    // === Request overrides ===
    /// 허용 override 범위 [min, max] (기본: 0.01 ~ 10.0)
    pub override_min: f64,
    pub override_max: f64,
}

impl Default for CoefficientConfig {
    fn default() -> Self {
        Self {
            dampening: 0.5,
            min: 0.7,
            max: 1.3,
            foul_min: 0.7,
            foul_max: 1.4,
            epsilon: 1e-6,

            foul_retention_base: 0.5,
            foul_retention_min: 0.25,
            foul_retention_max: 0.75,

            override_min: 0.01,
            override_max: 10.0,
        }
    }
}

impl CoefficientConfig {
    /// NaN은 중립(1.0)으로 취급한다.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return 1.0;
        }
        value.clamp(self.min, self.max)
    }

    pub fn clamp_foul(&self, value: f64) -> f64 {
        if value.is_nan() {
            return 1.0;
        }
        value.clamp(self.foul_min, self.foul_max)
    }

    pub fn override_in_range(&self, value: f64) -> bool {
        value.is_finite() && (self.override_min..=self.override_max).contains(&value)
    }

    /// Tighter swings, stats matter less.
    pub fn cagey() -> Self {
        Self { dampening: 0.35, min: 0.8, max: 1.2, ..Self::default() }
    }

    /// Wider swings, mismatches get punished.
    pub fn open() -> Self {
        Self { dampening: 0.7, min: 0.6, max: 1.4, foul_max: 1.5, ..Self::default() }
    }
}
