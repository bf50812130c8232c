//! Per-minute engine entry points
//!
//! `MatchEngine`는 검증된 스펙(`Arc<MarkovSpec>`), 설정, 성격 레이어 전략,
//! 해설 리소스를 한 번 만들어 여러 경기에서 공유한다. 호출 사이에 가변
//! 상태가 없으므로 `Send + Sync`이며, 경기별 직렬화는 호출자의 책임이다.

use super::collaborators::FeatureFlags;
use crate::engine::coefficients::SideCoefficients;
use crate::engine::config::{CoefficientConfig, EngineConfig};
use crate::engine::narrative::{Commentary, TeamNames};
use crate::engine::{ActionSimulator, MacroEngine, MarkovSpec, SimulationToken};
use crate::error::Result;
use crate::models::{ActionMinute, ActionState, MinuteSummary, Rosters, Side};
use crate::player::personality::{personality_layer, PersonalityLayer};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

// ============================================================================
// Request types
// ============================================================================

/// Side-wide override values, one per team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SideOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub away: Option<f64>,
}

impl SideOverride {
    pub fn get(&self, side: Side) -> Option<f64> {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }
}

/// One minute of one match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinuteRequest {
    pub seed: i64,
    /// Token from the previous minute; absent starts a fresh match.
    #[serde(default)]
    pub token: Option<serde_json::Value>,
    #[serde(default = "default_home_name")]
    pub home_name: String,
    #[serde(default = "default_away_name")]
    pub away_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_override: Option<SideOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defense_override: Option<SideOverride>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rosters: Option<Rosters>,
}

fn default_home_name() -> String {
    "Home".to_string()
}

fn default_away_name() -> String {
    "Away".to_string()
}

impl MinuteRequest {
    pub fn new(seed: i64) -> Self {
        Self {
            seed,
            token: None,
            home_name: default_home_name(),
            away_name: default_away_name(),
            attack_override: None,
            defense_override: None,
            rosters: None,
        }
    }

    pub fn with_names(mut self, home: impl Into<String>, away: impl Into<String>) -> Self {
        self.home_name = home.into();
        self.away_name = away.into();
        self
    }

    pub fn with_token(mut self, token: &SimulationToken) -> Self {
        self.token = token.to_value().ok();
        self
    }

    pub fn with_rosters(mut self, rosters: Rosters) -> Self {
        self.rosters = Some(rosters);
        self
    }

    pub fn names(&self) -> TeamNames {
        TeamNames::new(self.home_name.clone(), self.away_name.clone())
    }
}

/// Apply validated side-wide overrides. Values outside the configured
/// override range are discarded and the prior value kept.
pub fn apply_overrides(
    mut coefficients: SideCoefficients,
    attack: Option<&SideOverride>,
    defense: Option<&SideOverride>,
    cfg: &CoefficientConfig,
) -> SideCoefficients {
    for side in [Side::Home, Side::Away] {
        let pair = coefficients.get_mut(side);
        if let Some(value) = attack.and_then(|o| o.get(side)) {
            if cfg.override_in_range(value) {
                pair.attack = cfg.clamp(value);
            } else {
                warn!(side = side.as_str(), value, "attack override out of range, keeping prior");
            }
        }
        if let Some(value) = defense.and_then(|o| o.get(side)) {
            if cfg.override_in_range(value) {
                pair.defense = cfg.clamp(value);
            } else {
                warn!(side = side.as_str(), value, "defense override out of range, keeping prior");
            }
        }
    }
    coefficients
}

// ============================================================================
// Engine handle
// ============================================================================

pub struct MatchEngine {
    spec: Arc<MarkovSpec>,
    config: EngineConfig,
    personality: Arc<dyn PersonalityLayer>,
    commentary: Commentary,
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("spec_version", &self.spec.version())
            .field("personality", &self.personality.is_enabled())
            .field("locale", &self.commentary.locale().to_string())
            .finish()
    }
}

impl MatchEngine {
    /// Validates `config` and loads commentary for its locale. The spec is
    /// already validated by construction.
    pub fn new(spec: Arc<MarkovSpec>, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let commentary = Commentary::embedded(&config.locale()?)?;
        let personality = personality_layer(config.personality_enabled);
        info!(
            spec_version = spec.version(),
            personality = config.personality_enabled,
            "match engine ready"
        );
        Ok(Self { spec, config, personality, commentary })
    }

    /// `config` with the personality switch taken from `flags`.
    pub fn with_flags(
        spec: Arc<MarkovSpec>,
        config: EngineConfig,
        flags: &dyn FeatureFlags,
    ) -> Result<Self> {
        Self::new(spec, config.with_personality(flags.personality_enabled()))
    }

    /// Embedded spec with `config`.
    pub fn embedded(config: EngineConfig) -> Result<Self> {
        Self::new(MarkovSpec::embedded()?.shared(), config)
    }

    /// Embedded spec, config from the environment.
    pub fn from_env() -> Result<Self> {
        Self::embedded(EngineConfig::from_env()?)
    }

    pub fn spec(&self) -> &MarkovSpec {
        &self.spec
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn personality_enabled(&self) -> bool {
        self.personality.is_enabled()
    }

    /// Never fails: malformed tokens and bad overrides fall back to
    /// validated defaults.
    pub fn simulate_minute(&self, request: &MinuteRequest) -> MinuteSummary {
        let mut token = SimulationToken::resume_or_fresh(request.token.clone(), request.seed);
        token.coefficients = apply_overrides(
            token.coefficients,
            request.attack_override.as_ref(),
            request.defense_override.as_ref(),
            &self.config.coefficients,
        );
        self.simulate_resumed(request.seed, &token, &request.names(), request.rosters.as_ref())
    }

    /// Minute from an already decoded token.
    pub fn simulate_resumed(
        &self,
        seed: i64,
        token: &SimulationToken,
        names: &TeamNames,
        rosters: Option<&Rosters>,
    ) -> MinuteSummary {
        let engine = MacroEngine::new(&self.spec, &self.config, self.personality.as_ref());
        let mut summary = engine.simulate_minute(seed, token, rosters);
        summary.narrative = self.commentary.narrate(&mut summary.events, names);
        summary
    }

    /// Independent matches in parallel. Output order follows `requests`.
    pub fn simulate_batch(&self, requests: &[MinuteRequest]) -> Vec<MinuteSummary> {
        requests.par_iter().map(|r| self.simulate_minute(r)).collect()
    }

    /// One minute of the action simulator. `None` kicks off with the side
    /// picked the same way as a fresh token.
    pub fn simulate_actions(
        &self,
        seed: i64,
        state: Option<ActionState>,
        rosters: &Rosters,
    ) -> ActionMinute {
        let state = state.unwrap_or_else(|| ActionState::kickoff(SimulationToken::fresh(seed).possession));
        let sim = ActionSimulator::new(&self.config, self.personality.as_ref());
        let mut minute = sim.simulate_minute(seed, &state, rosters);
        self.commentary.narrate_actions(&mut minute.actions);
        minute
    }
}

/// JSON in, JSON out. Only an unparseable request is an error.
pub fn simulate_minute_json(engine: &MatchEngine, request_json: &str) -> Result<String> {
    let request: MinuteRequest = serde_json::from_str(request_json)?;
    let summary = engine.simulate_minute(&request);
    Ok(serde_json::to_string(&summary)?)
}
