//! Public API: per-minute simulation and collaborator seams

pub mod collaborators;
pub mod minute_api;

pub use collaborators::{
    advance_match, FeatureFlags, InMemoryRosters, InMemoryTokenStore, MatchRecord, RosterProvider,
    StaticFlags, TokenStore,
};
pub use minute_api::{
    apply_overrides, simulate_minute_json, MatchEngine, MinuteRequest, SideOverride,
};
