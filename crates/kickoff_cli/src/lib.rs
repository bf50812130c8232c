//! Kickoff CLI helpers
//!
//! 스펙 검증, 경기 실행, 토큰 저장/로드. `main.rs`는 인자 파싱과 출력만 한다.

use anyhow::{Context, Result};
use kickoff_core::api::StaticFlags;
use kickoff_core::engine::markov::final_score;
use kickoff_core::engine::narrative::TeamNames;
use kickoff_core::{
    EngineConfig, MacroState, MarkovSpec, MatchEngine, MinuteSummary, Rosters, SimulationToken,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// What `validate` prints for a document that passed.
#[derive(Debug, Clone, Serialize)]
pub struct SpecReport {
    pub version: u32,
    pub tick_seconds: u32,
    pub regulation_minutes: u32,
    /// (state, reachable successors)
    pub states: Vec<(String, Vec<String>)>,
}

pub fn validate_spec(path: &Path) -> Result<SpecReport> {
    let spec = MarkovSpec::from_path(path)
        .with_context(|| format!("spec document {} is invalid", path.display()))?;
    let states = MacroState::ALL
        .iter()
        .map(|s| {
            let next = spec.successors(*s).iter().map(|n| n.name().to_string()).collect();
            (s.name().to_string(), next)
        })
        .collect();
    Ok(SpecReport {
        version: spec.version(),
        tick_seconds: spec.tick_seconds(),
        regulation_minutes: spec.regulation_minutes(),
        states,
    })
}

/// Embedded spec and config unless paths are given; `personality` forces
/// the layer on.
pub fn load_engine(spec: Option<&Path>, config: Option<&Path>, personality: bool) -> Result<MatchEngine> {
    let spec = match spec {
        Some(path) => MarkovSpec::from_path(path)
            .with_context(|| format!("loading spec {}", path.display()))?,
        None => MarkovSpec::embedded()?,
    };
    let config = match config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::from_env()?,
    };
    let flags = StaticFlags { personality: personality || config.personality_enabled };
    Ok(MatchEngine::with_flags(Arc::new(spec), config, &flags)?)
}

pub fn load_rosters(path: &Path) -> Result<Rosters> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading rosters {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing rosters {}", path.display()))
}

/// `.msgpack` is written compact, anything else as JSON.
pub fn save_token(path: &Path, token: &SimulationToken) -> Result<()> {
    let bytes = match path.extension().and_then(|e| e.to_str()) {
        Some("msgpack") => token.to_compact()?,
        _ => token.to_json()?.into_bytes(),
    };
    std::fs::write(path, bytes).with_context(|| format!("writing token {}", path.display()))
}

pub fn load_token(path: &Path) -> Result<SimulationToken> {
    let bytes = std::fs::read(path).with_context(|| format!("reading token {}", path.display()))?;
    let token = match path.extension().and_then(|e| e.to_str()) {
        Some("msgpack") => SimulationToken::from_compact(&bytes)?,
        _ => SimulationToken::from_json(std::str::from_utf8(&bytes)?)?,
    };
    Ok(token)
}

pub struct MatchRun {
    pub seed: i64,
    pub names: TeamNames,
    /// Upper bound; the run also stops at full time.
    pub minutes: u32,
    pub rosters: Option<Rosters>,
    pub token: Option<SimulationToken>,
}

pub fn run_match(engine: &MatchEngine, run: &MatchRun) -> Vec<MinuteSummary> {
    let mut token = run.token.unwrap_or_else(|| SimulationToken::fresh(run.seed));
    let mut minutes = Vec::new();
    for _ in 0..run.minutes {
        let summary = engine.simulate_resumed(run.seed, &token, &run.names, run.rosters.as_ref());
        token = summary.next_token;
        let full_time = summary.full_time;
        minutes.push(summary);
        if full_time {
            break;
        }
    }
    let score = final_score(&minutes);
    info!(seed = run.seed, minutes = minutes.len(), home = score.home, away = score.away, "match run finished");
    minutes
}

#[cfg(test)]
mod tests {
    use super::*;
    use kickoff_core::data::MARKOV_SPEC_YAML;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn engine() -> MatchEngine {
        MatchEngine::embedded(EngineConfig::default()).unwrap()
    }

    #[test]
    fn test_validate_embedded_spec_file() -> Result<()> {
        let mut file = Builder::new().suffix(".yaml").tempfile()?;
        file.write_all(MARKOV_SPEC_YAML.as_bytes())?;
        let report = validate_spec(file.path())?;
        assert_eq!(report.tick_seconds, 10);
        assert_eq!(report.states.len(), 8);
        Ok(())
    }

    #[test]
    fn test_validate_rejects_bad_sum() -> Result<()> {
        let mut file = Builder::new().suffix(".yaml").tempfile()?;
        let broken = MARKOV_SPEC_YAML.replacen("p: 0.85", "p: 0.95", 1);
        file.write_all(broken.as_bytes())?;
        assert!(validate_spec(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_full_match_stops_at_full_time() {
        let run = MatchRun {
            seed: 4,
            names: TeamNames::new("Rovers", "United"),
            minutes: 200,
            rosters: None,
            token: None,
        };
        let minutes = run_match(&engine(), &run);
        assert_eq!(minutes.len(), 90);
        assert!(minutes.last().unwrap().full_time);
    }

    #[test]
    fn test_token_files_resume_identically() -> Result<()> {
        let engine = engine();
        let names = TeamNames::new("A", "B");
        let first = run_match(
            &engine,
            &MatchRun { seed: 9, names: names.clone(), minutes: 10, rosters: None, token: None },
        );
        let token = first.last().unwrap().next_token;

        let json = Builder::new().suffix(".json").tempfile()?;
        let compact = Builder::new().suffix(".msgpack").tempfile()?;
        save_token(json.path(), &token)?;
        save_token(compact.path(), &token)?;
        assert_eq!(load_token(json.path())?, token);
        assert_eq!(load_token(compact.path())?, token);

        let resumed = run_match(
            &engine,
            &MatchRun { seed: 9, names, minutes: 1, rosters: None, token: Some(load_token(compact.path())?) },
        );
        assert_eq!(resumed[0].minute, 11);
        Ok(())
    }

    #[test]
    fn test_load_rosters_rejects_garbage() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"[1, 2, 3]")?;
        assert!(load_rosters(file.path()).is_err());
        Ok(())
    }

    #[test]
    fn test_personality_switch_reaches_engine() -> Result<()> {
        assert!(load_engine(None, None, true)?.personality_enabled());
        Ok(())
    }
}
