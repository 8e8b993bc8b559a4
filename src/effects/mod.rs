//! Effect scripts and their bindings.
//!
//! Effects are declarative data, interpreted by the rules and scoring
//! modules:
//! - `EffectScript`: Catalog form (target, score ops, requirements, limits,
//!   deferred clause, removal clause)
//! - `ScoreOp`: One scoring operation, tagged by scope and op
//! - `TargetDecl`: What an effect targets, with selection validation
//! - `BoundEffect`: A played effect with its resolved targets and the zone
//!   moves it caused

mod bound;
mod ops;
mod script;
mod targeting;

pub use bound::{BoundEffect, MoveRecord, TargetBinding, TargetIds};
pub use ops::{BabeSelector, OpKind, OpScope, ScoreOp};
pub use script::{EffectScript, FutureClause, LimitMod, OnRemoveClause, Requirement, ZoneMove};
pub use targeting::{TargetDecl, TargetError, TargetKind};
