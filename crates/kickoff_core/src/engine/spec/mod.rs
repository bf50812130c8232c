//! Markov spec document, typed tables and validation
//!
//! 외부 문서(JSON/YAML)는 반드시 [`validate`]를 거쳐야 [`MarkovSpec`]이 된다.
//! 엔진은 `Arc<MarkovSpec>`만 받으므로 검증되지 않은 스펙으로는 실행할 수 없다.

pub mod document;
pub mod tables;
pub mod validator;

pub use document::{OutcomeDocument, SpecDocument, StateDocument, TimeSection, TransitionDocument};
pub use tables::{
    MarkovSpec, ShotOutcome, ShotResult, StateTable, Transition, ZoneTables, TICKS_PER_MINUTE,
};
pub use validator::{validate, SUM_TOLERANCE};

use crate::error::SpecError;
use std::path::Path;
use std::sync::Arc;

impl MarkovSpec {
    pub fn from_json(text: &str) -> Result<Self, SpecError> {
        validate(&SpecDocument::from_json(text)?)
    }

    pub fn from_yaml(text: &str) -> Result<Self, SpecError> {
        validate(&SpecDocument::from_yaml(text)?)
    }

    /// Sniffs JSON vs YAML from the first non-blank character.
    pub fn parse(text: &str) -> Result<Self, SpecError> {
        validate(&SpecDocument::parse(text)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SpecError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SpecError::Parse(format!("{}: {}", path.display(), e)))?;
        Self::parse(&text)
    }

    /// Built-in spec shipped with the crate.
    pub fn embedded() -> Result<Self, SpecError> {
        Self::from_yaml(crate::data::MARKOV_SPEC_YAML)
    }

    pub fn shared(self) -> Arc<MarkovSpec> {
        Arc::new(self)
    }
}

#[cfg(test)]
pub(crate) mod test_fixtures {
    use super::SpecDocument;

    pub const MINIMAL_SPEC_YAML: &str = r#"
version: 1
time: { tick_seconds: 10, regulation_minutes: 90 }
states:
  - name: KICKOFF
    transitions:
      - { to: OPEN_PLAY_MID, possession: retain, p: 1.0 }
  - name: OPEN_PLAY_DEF
    transitions:
      - { to: OPEN_PLAY_MID, possession: retain, p: 0.7 }
      - { to: OUT, possession: retain, p: 0.1 }
      - { to: OPEN_PLAY_MID, possession: flip, p: 0.2 }
  - name: OPEN_PLAY_MID
    transitions:
      - { to: OPEN_PLAY_FINAL, possession: retain, p: 0.5 }
      - { to: OPEN_PLAY_MID, possession: flip, p: 0.3 }
      - { to: FOUL, possession: retain, p: 0.2 }
  - name: OPEN_PLAY_FINAL
    transitions:
      - { to: SHOT, possession: retain, p: 0.4 }
      - { to: OPEN_PLAY_DEF, possession: flip, p: 0.4 }
      - { to: OUT, possession: retain, p: 0.2 }
  - name: SHOT
    outcomes:
      - { result: goal, p: 0.3 }
      - { result: save, p: 0.4 }
      - { result: miss, p: 0.3 }
  - name: OUT
    by_zone:
      DEF:
        - { to: OPEN_PLAY_DEF, possession: flip, p: 1.0 }
      MID:
        - { to: OPEN_PLAY_MID, possession: flip, p: 1.0 }
      FINAL:
        - { to: GK, possession: flip, p: 1.0 }
  - name: FOUL
    transitions:
      - { to: OPEN_PLAY_MID, possession: retain, p: 1.0 }
  - name: GK
    transitions:
      - { to: OPEN_PLAY_DEF, possession: retain, p: 1.0 }
"#;

    pub fn minimal_document() -> SpecDocument {
        SpecDocument::from_yaml(MINIMAL_SPEC_YAML).expect("fixture parses")
    }
}
