//! Resumable simulation token
//!
//! 분(minute) 사이에 전달되는 유일한 상태. 엔진 자체는 호출 간 상태가 없다.
//!
//! - JSON: API 응답/요청용
//! - MessagePack (`rmp-serde`): 저장소용 압축 표현
//!
//! 역직렬화는 엄격하다: 모르는 필드, 빠진 필드, 지원하지 않는 버전은 거부된다.

use super::coefficients::{CoefficientPair, SideCoefficients};
use super::config::CoefficientConfig;
use super::state::MacroState;
use super::zone::MacroZone;
use crate::error::TokenError;
use crate::models::{Score, Side};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const TOKEN_VERSION: u8 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationToken {
    pub version: u8,
    /// Minute the next invocation simulates (starts at 1).
    pub minute: u32,
    pub state: MacroState,
    pub possession: Side,
    pub zone: MacroZone,
    pub score: Score,
    pub coefficients: SideCoefficients,
}

impl SimulationToken {
    /// Minute 1 kickoff. Even seeds give the home side the ball.
    pub fn fresh(seed: i64) -> Self {
        let possession = if seed.rem_euclid(2) == 0 { Side::Home } else { Side::Away };
        Self {
            version: TOKEN_VERSION,
            minute: 1,
            state: MacroState::Kickoff,
            possession,
            zone: MacroZone::Mid,
            score: Score::default(),
            coefficients: SideCoefficients::default(),
        }
    }

    fn check(mut self) -> Result<Self, TokenError> {
        if self.version != TOKEN_VERSION {
            return Err(TokenError::UnsupportedVersion {
                found: self.version,
                expected: TOKEN_VERSION,
            });
        }
        if self.minute == 0 {
            return Err(TokenError::InvalidMinute { minute: self.minute });
        }
        self.coefficients = sanitize_coefficients(self.coefficients);
        Ok(self)
    }

    pub fn to_json(&self) -> Result<String, TokenError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, TokenError> {
        serde_json::from_str::<Self>(text)?.check()
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, TokenError> {
        serde_json::from_value::<Self>(value)?.check()
    }

    pub fn to_value(&self) -> Result<serde_json::Value, TokenError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Compact MessagePack form (named fields, so the strict decoder still
    /// sees field names).
    pub fn to_compact(&self) -> Result<Vec<u8>, TokenError> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    pub fn from_compact(bytes: &[u8]) -> Result<Self, TokenError> {
        rmp_serde::from_slice::<Self>(bytes)?.check()
    }

    /// Decode a request token, falling back to a fresh match on bad input.
    pub fn resume_or_fresh(value: Option<serde_json::Value>, seed: i64) -> Self {
        match value {
            None | Some(serde_json::Value::Null) => Self::fresh(seed),
            Some(v) => match Self::from_value(v) {
                Ok(token) => token,
                Err(err) => {
                    warn!(seed, error = %err, "discarding malformed token, starting fresh");
                    Self::fresh(seed)
                }
            },
        }
    }
}

/// 비정상(NaN/무한대/범위 밖) 팀 계수는 중립값으로 되돌린다.
fn sanitize_coefficients(mut coefficients: SideCoefficients) -> SideCoefficients {
    let bounds = CoefficientConfig::default();
    for side in [Side::Home, Side::Away] {
        let pair = coefficients.get_mut(side);
        if !(bounds.override_in_range(pair.attack) && bounds.override_in_range(pair.defense)) {
            warn!(
                side = side.as_str(),
                attack = pair.attack,
                defense = pair.defense,
                "token coefficients out of range, resetting to neutral"
            );
            *pair = CoefficientPair::NEUTRAL;
        }
    }
    coefficients
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_defaults() {
        let t = SimulationToken::fresh(10);
        assert_eq!(t.minute, 1);
        assert_eq!(t.state, MacroState::Kickoff);
        assert_eq!(t.possession, Side::Home);
        assert_eq!(t.score, Score::default());
        assert_eq!(SimulationToken::fresh(-3).possession, Side::Away);
    }

    #[test]
    fn test_json_and_compact_roundtrip() {
        let mut t = SimulationToken::fresh(4);
        t.minute = 37;
        t.state = MacroState::OpenPlayFinal;
        t.zone = MacroZone::Final;
        t.score = Score { home: 2, away: 1 };
        t.coefficients.away = CoefficientPair { attack: 1.1, defense: 0.9 };

        let json = t.to_json().unwrap();
        assert_eq!(SimulationToken::from_json(&json).unwrap(), t);

        let bytes = t.to_compact().unwrap();
        assert_eq!(SimulationToken::from_compact(&bytes).unwrap(), t);
    }

    #[test]
    fn test_strict_decoding() {
        let mut value = SimulationToken::fresh(1).to_value().unwrap();
        value["extra"] = serde_json::json!(true);
        assert!(matches!(SimulationToken::from_value(value), Err(TokenError::Malformed(_))));

        let mut value = SimulationToken::fresh(1).to_value().unwrap();
        value.as_object_mut().unwrap().remove("score");
        assert!(SimulationToken::from_value(value).is_err());

        let mut value = SimulationToken::fresh(1).to_value().unwrap();
        value["version"] = serde_json::json!(9);
        let err = SimulationToken::from_value(value).unwrap_err();
        assert!(matches!(err, TokenError::UnsupportedVersion { found: 9, .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_malformed_token_falls_back() {
        let t = SimulationToken::resume_or_fresh(Some(serde_json::json!({"minute": "x"})), 2);
        assert_eq!(t, SimulationToken::fresh(2));
        let t = SimulationToken::resume_or_fresh(Some(serde_json::Value::Null), 3);
        assert_eq!(t, SimulationToken::fresh(3));
    }

    #[test]
    fn test_non_finite_coefficients_reset_to_neutral() {
        let mut t = SimulationToken::fresh(6);
        t.coefficients.home = CoefficientPair { attack: f64::NAN, defense: 1.1 };
        t.coefficients.away = CoefficientPair { attack: 1.2, defense: 0.9 };

        let decoded = SimulationToken::from_compact(&t.to_compact().unwrap()).unwrap();
        assert_eq!(decoded.coefficients.home, CoefficientPair::NEUTRAL);
        assert_eq!(decoded.coefficients.away, t.coefficients.away);

        let mut value = SimulationToken::fresh(6).to_value().unwrap();
        value["coefficients"]["away"]["defense"] = serde_json::json!(50.0);
        let decoded = SimulationToken::from_value(value).unwrap();
        assert_eq!(decoded.coefficients.away, CoefficientPair::NEUTRAL);
    }
}
