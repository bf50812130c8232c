//! Data models shared by the engine and its callers.

pub mod events;
pub mod player;
pub mod roster;
pub mod side;
pub mod summary;

pub use events::{ActionEvent, ActionKind, ActorRef, EngineEvent};
pub use player::{
    Attr, Line, PlayerAttributes, PlayerSnapshot, ATTRIBUTE_MAX, ATTRIBUTE_MIN, NEUTRAL_ATTRIBUTE,
};
pub use roster::{Roster, Rosters};
pub use side::{Score, Side, SideCounts};
pub use summary::{ActionMinute, ActionState, MinuteSummary, OutcomeCounts};
