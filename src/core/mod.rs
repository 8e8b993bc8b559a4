//! Core engine types: identifiers, zones, configuration, turn state.
//!
//! Everything here is plain data. The rules and scoring modules read it;
//! the turn store owns and mutates it.

pub mod config;
pub mod ids;
pub mod state;

pub use config::{RulesConfig, Zone};
pub use ids::{BabeId, EffectId, PlayId};
pub use state::TurnState;
