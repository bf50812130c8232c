//! # Engine Configuration
//!
//! 모든 튜닝 상수를 중앙에서 관리하는 설정 시스템.
//!
//! ## 프리셋
//! - `balanced()` (기본)
//! - `cagey()`: 좁은 계수 범위, 적은 슛 성공
//! - `open()`: 넓은 계수 범위, 과감한 의사결정
//!
//! ```rust
//! use kickoff_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let open = EngineConfig::open();
//! assert!(open.coefficients.max > config.coefficients.max);
//! ```

mod coefficient_config;
mod decision_config;
mod momentum_config;
mod resolver_config;

pub use coefficient_config::CoefficientConfig;
pub use decision_config::{ActionWeights, DecisionConfig};
pub use momentum_config::{ActionSimConfig, MomentumConfig};
pub use resolver_config::ResolverConfig;

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};
use unic_langid::LanguageIdentifier;

/// Turns the personality layer on ("1", "true", "on").
pub const PERSONALITY_ENV: &str = "KICKOFF_PERSONALITY";
/// Path to a JSON/YAML config file.
pub const CONFIG_PATH_ENV: &str = "KICKOFF_ENGINE_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub coefficients: CoefficientConfig,
    pub resolver: ResolverConfig,
    pub decision: DecisionConfig,
    pub momentum: MomentumConfig,
    pub action_sim: ActionSimConfig,
    /// 성격 레이어 (기본: off)
    pub personality_enabled: bool,
    /// 해설 로케일 (기본: en-US)
    pub commentary_locale: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            coefficients: CoefficientConfig::default(),
            resolver: ResolverConfig::default(),
            decision: DecisionConfig::default(),
            momentum: MomentumConfig::default(),
            action_sim: ActionSimConfig::default(),
            personality_enabled: false,
            commentary_locale: "en-US".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn balanced() -> Self {
        Self::default()
    }

    /// 수비적인 경기 (적은 골)
    pub fn cagey() -> Self {
        Self {
            coefficients: CoefficientConfig::cagey(),
            resolver: ResolverConfig::cagey(),
            decision: DecisionConfig::cagey(),
            ..Self::default()
        }
    }

    /// 열린 경기 (더 많은 골, 큰 능력치 영향)
    pub fn open() -> Self {
        Self {
            coefficients: CoefficientConfig::open(),
            resolver: ResolverConfig::open(),
            decision: DecisionConfig::open(),
            ..Self::default()
        }
    }

    pub fn with_personality(mut self, enabled: bool) -> Self {
        self.personality_enabled = enabled;
        self
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(text).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let cfg: Self =
            serde_yaml::from_str(text).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| EngineError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&text),
            _ => Self::from_yaml(&text),
        }
    }

    /// Defaults, then the file named by `KICKOFF_ENGINE_CONFIG`, then
    /// `KICKOFF_PERSONALITY`.
    pub fn from_env() -> Result<Self> {
        let mut cfg = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                info!(path = %path, "loading engine config");
                Self::from_path(path.trim())?
            }
            _ => Self::default(),
        };
        if let Ok(flag) = std::env::var(PERSONALITY_ENV) {
            match parse_flag(&flag) {
                Some(enabled) => cfg.personality_enabled = enabled,
                None => warn!(value = %flag, "ignoring unrecognized {}", PERSONALITY_ENV),
            }
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let c = &self.coefficients;
        if !(c.min > 0.0 && c.min <= 1.0 && c.max >= 1.0) {
            return Err(invalid(format!("coefficient range [{}, {}] must contain 1.0", c.min, c.max)));
        }
        if !(c.foul_min > 0.0 && c.foul_min <= 1.0 && c.foul_max >= 1.0) {
            return Err(invalid(format!(
                "foul coefficient range [{}, {}] must contain 1.0",
                c.foul_min, c.foul_max
            )));
        }
        if !(c.dampening >= 0.0 && c.dampening.is_finite()) {
            return Err(invalid(format!("dampening {} must be >= 0", c.dampening)));
        }
        if c.epsilon <= 0.0 {
            return Err(invalid("epsilon must be positive".to_string()));
        }
        if !(0.0..=1.0).contains(&c.foul_retention_min)
            || !(0.0..=1.0).contains(&c.foul_retention_max)
            || c.foul_retention_min > c.foul_retention_max
        {
            return Err(invalid("foul retention bounds must be ordered within [0, 1]".to_string()));
        }
        if !(c.override_min > 0.0 && c.override_min < c.override_max) {
            return Err(invalid("override bounds must be positive and ordered".to_string()));
        }

        let r = &self.resolver;
        for (name, v) in [
            ("pass_base", r.pass_base),
            ("keeper_pass_floor", r.keeper_pass_floor),
            ("shot_floor", r.shot_floor),
            ("shot_ceiling", r.shot_ceiling),
            ("dribble_floor", r.dribble_floor),
            ("dribble_ceiling", r.dribble_ceiling),
            ("foul_ceiling", r.foul_ceiling),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(invalid(format!("resolver.{} = {} outside [0, 1]", name, v)));
            }
        }
        if r.shot_floor > r.shot_ceiling || r.dribble_floor > r.dribble_ceiling {
            return Err(invalid("resolver floors must not exceed ceilings".to_string()));
        }
        if r.long_shot_base_factor + r.long_shot_range_factor >= 1.0 {
            return Err(invalid("long shot factors must sum below 1.0".to_string()));
        }

        let d = &self.decision;
        if !(0.0..=1.0).contains(&d.risk_threshold) || !(0.0..=1.0).contains(&d.min_pass_confidence) {
            return Err(invalid("decision thresholds must lie in [0, 1]".to_string()));
        }
        if !(0.0..=1.0).contains(&self.momentum.decay) {
            return Err(invalid(format!("momentum.decay {} outside [0, 1]", self.momentum.decay)));
        }
        if self.action_sim.actions_per_minute == 0 || self.action_sim.actions_per_minute > 30 {
            return Err(invalid(format!(
                "action_sim.actions_per_minute {} outside 1..=30",
                self.action_sim.actions_per_minute
            )));
        }
        self.locale()?;
        Ok(())
    }

    pub fn locale(&self) -> Result<LanguageIdentifier> {
        self.commentary_locale
            .parse::<LanguageIdentifier>()
            .map_err(|e| invalid(format!("locale '{}': {}", self.commentary_locale, e)))
    }
}

fn invalid(msg: String) -> EngineError {
    EngineError::InvalidConfig(msg)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" | "" => Some(false),
        _ => None,
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = EngineConfig::default();
        assert!(!cfg.personality_enabled);
        assert!((cfg.coefficients.min - 0.7).abs() < 1e-9);
        assert!((cfg.coefficients.foul_max - 1.4).abs() < 1e-9);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_presets_validate_and_differ() {
        let balanced = EngineConfig::balanced();
        let cagey = EngineConfig::cagey();
        let open = EngineConfig::open();
        assert!(cagey.validate().is_ok());
        assert!(open.validate().is_ok());

        assert!(cagey.resolver.shot_base < balanced.resolver.shot_base);
        assert!(open.resolver.shot_base > balanced.resolver.shot_base);
        assert!(open.coefficients.dampening > cagey.coefficients.dampening);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let cfg = EngineConfig::from_yaml("personality_enabled: true\ncoefficients:\n  dampening: 0.4\n")
            .unwrap();
        assert!(cfg.personality_enabled);
        assert!((cfg.coefficients.dampening - 0.4).abs() < 1e-9);
        assert!((cfg.coefficients.max - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = EngineConfig::from_json(r#"{"coefficients": {"min": 1.2}}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));

        let mut cfg = EngineConfig::default();
        cfg.commentary_locale = "not a locale!!".into();
        assert!(cfg.validate().is_err());

        let mut cfg = EngineConfig::default();
        cfg.action_sim.actions_per_minute = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_config_serialization() {
        let cfg = EngineConfig::open();
        let json = serde_json::to_string(&cfg).unwrap();
        let parsed = EngineConfig::from_json(&json).unwrap();
        assert_eq!(parsed, cfg);
    }
}
