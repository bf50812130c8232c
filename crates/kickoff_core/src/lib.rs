//! # kickoff_core - Deterministic Minute-by-Minute Football Engine
//!
//! 한 번 호출에 경기 1분(6틱)을 진행하는 Markov 매크로 엔진.
//! 분 사이의 상태는 작은 직렬화 토큰으로만 전달된다.
//!
//! ## Features
//! - 100% deterministic (same seed + token + rosters = same minute)
//! - Data-driven transition tables (YAML/JSON spec, validated at load)
//! - Matchup coefficients from player attributes, optional personality layer
//! - Localized commentary (Fluent)
//! - Player-level action simulator as a detailed second mode

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Resolver entry points take the full match context
#![allow(clippy::too_many_arguments)]

pub mod api;
pub mod data;
pub mod engine;
pub mod error;
pub mod models;
pub mod player;

// Re-export main API functions
pub use api::{
    advance_match, simulate_minute_json, MatchEngine, MinuteRequest, SideOverride,
};
pub use error::{EngineError, Result, SpecError, TokenError};

// Re-export engine types
pub use engine::{
    EngineConfig, MacroState, MacroZone, MarkovSpec, PitchZone, PossessionDirective,
    SimulationToken,
};

// Re-export match models
pub use models::{
    ActionEvent, ActionMinute, ActionState, EngineEvent, MinuteSummary, PlayerAttributes,
    PlayerSnapshot, Roster, Rosters, Score, Side,
};

// Re-export personality
pub use player::{PersonalityLayer, PersonalityTraits, Trait};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
