//! # babes-engine
//!
//! A scoring and rules engine for the Babes card game.
//!
//! A turn is a set of played Babe cards and bound Effect cards. The engine
//! recomputes everything about the turn from scratch on every change:
//! per-Babe scores, the final score, play limits, the carry-over for the
//! next turn and a resolution log.
//!
//! ## Design Principles
//!
//! 1. **Effects Are Data**: Effect cards are declarative `EffectScript`s
//!    (score ops, requirements, limit modifiers, deferred clauses). No card
//!    name appears in engine code.
//!
//! 2. **Pure Recomputation**: Scoring, limits and carry-over are functions of
//!    the `TurnState`. Nothing accumulates between calls.
//!
//! 3. **Order Matters**: Effects score in play order, ops in declaration
//!    order.
//!
//! 4. **Never Abort a Turn**: Bad targets and unknown ops contribute zero
//!    and are logged. Play actions return typed errors instead of panicking.
//!
//! ## Modules
//!
//! - `core`: IDs, zones, rules configuration, turn state
//! - `cards`: Babe cards and the card catalog
//! - `effects`: Effect scripts, score ops, targeting, bound effects
//! - `rules`: Limit resolver and eligibility checker
//! - `scoring`: Score engine, carry-over collector, engine facade
//! - `zones`: Turn state store
//! - `error`: Catalog, play and snapshot errors

pub mod core;
pub mod cards;
pub mod effects;
pub mod rules;
pub mod scoring;
pub mod zones;
pub mod error;

// Re-export commonly used types
pub use crate::core::{BabeId, EffectId, PlayId, RulesConfig, TurnState, Zone};

pub use crate::cards::{BabeCard, BabeType, Catalog, PlayedBabe};

pub use crate::effects::{
    BabeSelector, BoundEffect, EffectScript, FutureClause, LimitMod, MoveRecord,
    OnRemoveClause, OpKind, OpScope, Requirement, ScoreOp, TargetBinding, TargetDecl,
    TargetError, TargetKind,
};

pub use crate::rules::{EligibilityChecker, Ineligible, LimitResolver, Limits};

pub use crate::scoring::{BabeScore, Engine, PendingNext, ScoreBreakdown, TurnReport};

pub use crate::zones::TurnStore;

pub use crate::error::{CatalogError, PlayError, StoreError};
