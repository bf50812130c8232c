//! External collaborator seams
//!
//! 로스터 조회, 토큰 저장, 기능 플래그는 엔진 밖에 있다. 여기서는
//! trait 경계와 테스트/CLI용 인메모리 구현만 제공한다.

use super::minute_api::{MatchEngine, MinuteRequest};
use crate::engine::narrative::TeamNames;
use crate::engine::SimulationToken;
use crate::error::{EngineError, Result};
use crate::models::{MinuteSummary, Rosters, Score};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Persisted state of one running match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub seed: i64,
    pub home_name: String,
    pub away_name: String,
    /// `None` until the first minute has been simulated.
    #[serde(default)]
    pub token: Option<SimulationToken>,
}

impl MatchRecord {
    pub fn new(seed: i64, home_name: impl Into<String>, away_name: impl Into<String>) -> Self {
        Self { seed, home_name: home_name.into(), away_name: away_name.into(), token: None }
    }

    /// Next minute to simulate.
    pub fn minute(&self) -> u32 {
        self.token.map(|t| t.minute).unwrap_or(1)
    }

    pub fn score(&self) -> Score {
        self.token.map(|t| t.score).unwrap_or_default()
    }

    pub fn names(&self) -> TeamNames {
        TeamNames::new(self.home_name.clone(), self.away_name.clone())
    }
}

pub trait RosterProvider: Send + Sync {
    fn rosters(&self, match_id: &str) -> Option<Rosters>;
}

/// Token persistence. `with_match` must hold the match exclusively for
/// the whole closure so a read-simulate-write cycle never interleaves.
pub trait TokenStore: Send + Sync {
    fn with_match(
        &self,
        match_id: &str,
        f: &mut dyn FnMut(&mut MatchRecord) -> Result<()>,
    ) -> Result<()>;
}

pub trait FeatureFlags: Send + Sync {
    fn personality_enabled(&self) -> bool;
}

// ============================================================================
// In-memory implementations
// ============================================================================

#[derive(Debug, Default)]
pub struct InMemoryRosters {
    rosters: HashMap<String, Rosters>,
}

impl InMemoryRosters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, match_id: impl Into<String>, rosters: Rosters) {
        self.rosters.insert(match_id.into(), rosters);
    }
}

impl RosterProvider for InMemoryRosters {
    fn rosters(&self, match_id: &str) -> Option<Rosters> {
        self.rosters.get(match_id).cloned()
    }
}

/// 경기별 Mutex. 서로 다른 경기는 병렬로 진행된다.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    matches: Mutex<HashMap<String, Arc<Mutex<MatchRecord>>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, match_id: impl Into<String>, record: MatchRecord) -> Result<()> {
        let mut matches = self.matches.lock().map_err(|_| poisoned("store"))?;
        matches.insert(match_id.into(), Arc::new(Mutex::new(record)));
        Ok(())
    }

    pub fn get(&self, match_id: &str) -> Result<Option<MatchRecord>> {
        let Some(entry) = self.entry(match_id)? else {
            return Ok(None);
        };
        let record = entry.lock().map_err(|_| poisoned(match_id))?;
        Ok(Some(record.clone()))
    }

    fn entry(&self, match_id: &str) -> Result<Option<Arc<Mutex<MatchRecord>>>> {
        let matches = self.matches.lock().map_err(|_| poisoned("store"))?;
        Ok(matches.get(match_id).cloned())
    }
}

impl TokenStore for InMemoryTokenStore {
    fn with_match(
        &self,
        match_id: &str,
        f: &mut dyn FnMut(&mut MatchRecord) -> Result<()>,
    ) -> Result<()> {
        let entry = self
            .entry(match_id)?
            .ok_or_else(|| EngineError::Collaborator(format!("unknown match '{}'", match_id)))?;
        let mut record = entry.lock().map_err(|_| poisoned(match_id))?;
        f(&mut record)
    }
}

fn poisoned(what: &str) -> EngineError {
    EngineError::Collaborator(format!("lock poisoned: {}", what))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFlags {
    pub personality: bool,
}

impl FeatureFlags for StaticFlags {
    fn personality_enabled(&self) -> bool {
        self.personality
    }
}

// ============================================================================
// Scheduler step
// ============================================================================

/// Simulate the next minute of `match_id` and store the new token.
/// The store holds the match for the whole step.
pub fn advance_match(
    engine: &MatchEngine,
    match_id: &str,
    rosters: &dyn RosterProvider,
    store: &dyn TokenStore,
) -> Result<MinuteSummary> {
    let mut out = None;
    store.with_match(match_id, &mut |record| {
        let squads = rosters.rosters(match_id);
        let summary = match record.token {
            Some(token) => {
                engine.simulate_resumed(record.seed, &token, &record.names(), squads.as_ref())
            }
            None => {
                let mut request = MinuteRequest::new(record.seed)
                    .with_names(record.home_name.clone(), record.away_name.clone());
                request.rosters = squads;
                engine.simulate_minute(&request)
            }
        };
        debug!(match_id, minute = summary.minute, score = ?summary.score, "match advanced");
        record.token = Some(summary.next_token);
        out = Some(summary);
        Ok(())
    })?;
    out.ok_or_else(|| EngineError::Collaborator(format!("store skipped match '{}'", match_id)))
}
