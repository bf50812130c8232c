//! Raw spec document as it appears on disk (JSON or YAML).
//!
//! Names stay as strings here; [`super::validator`] turns them into typed
//! tables or reports exactly which state is wrong.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecDocument {
    pub version: u32,
    pub time: TimeSection,
    pub states: Vec<StateDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSection {
    pub tick_seconds: u32,
    pub regulation_minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDocument {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transitions: Option<Vec<TransitionDocument>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcomes: Option<Vec<OutcomeDocument>>,
    /// Zone name (DEF/MID/FINAL) to transition table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_zone: Option<BTreeMap<String, Vec<TransitionDocument>>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionDocument {
    pub to: String,
    #[serde(default = "default_directive")]
    pub possession: String,
    pub p: f64,
}

/// Shot outcome row. `to`/`possession` default per result label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeDocument {
    pub result: String,
    pub p: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub possession: Option<String>,
}

fn default_directive() -> String {
    "retain".to_string()
}

impl SpecDocument {
    pub fn from_json(text: &str) -> Result<Self, crate::error::SpecError> {
        serde_json::from_str(text).map_err(|e| crate::error::SpecError::Parse(e.to_string()))
    }

    pub fn from_yaml(text: &str) -> Result<Self, crate::error::SpecError> {
        serde_yaml::from_str(text).map_err(|e| crate::error::SpecError::Parse(e.to_string()))
    }

    /// JSON when the text starts with `{`, YAML otherwise.
    pub fn parse(text: &str) -> Result<Self, crate::error::SpecError> {
        if text.trim_start().starts_with('{') {
            Self::from_json(text)
        } else {
            Self::from_yaml(text)
        }
    }

    pub fn state(&self, name: &str) -> Option<&StateDocument> {
        self.states.iter().find(|s| s.name == name)
    }

    pub fn state_mut(&mut self, name: &str) -> Option<&mut StateDocument> {
        self.states.iter_mut().find(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml_and_json() {
        let yaml = r#"
version: 1
time: { tick_seconds: 10, regulation_minutes: 90 }
states:
  - name: KICKOFF
    transitions:
      - { to: OPEN_PLAY_MID, p: 1.0 }
"#;
        let doc = SpecDocument::parse(yaml).unwrap();
        assert_eq!(doc.time.tick_seconds, 10);
        let kickoff = doc.state("KICKOFF").unwrap();
        let transitions = kickoff.transitions.as_ref().unwrap();
        assert_eq!(transitions[0].possession, "retain");

        let json = serde_json::to_string(&doc).unwrap();
        assert_eq!(SpecDocument::parse(&json).unwrap(), doc);
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = SpecDocument::parse("{ not json").unwrap_err();
        assert!(matches!(err, crate::error::SpecError::Parse(_)));
    }
}
