//! Player-level behaviour: personality traits and decision routing.

pub mod decision;
pub mod personality;

pub use decision::{
    attempt_risky, choose_action, rank_pass_targets, select_pass_target, ActionChoice, PassKind,
    PassOption, Phase,
};
pub use personality::{
    personality_layer, Behavior, DisabledPersonality, PersonalityArchetype, PersonalityLayer,
    PersonalityTraits, Trait, TraitPersonality,
};
