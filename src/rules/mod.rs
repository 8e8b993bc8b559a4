//! Play rules.
//!
//! Everything that decides whether a card may be played:
//!
//! - `LimitResolver`: Folds limit modifiers into the turn's `Limits`
//! - `Limits`: Slot arithmetic for Babe and Effect plays
//! - `EligibilityChecker`: Requirements, caps and target availability
//!   for a candidate effect
//!
//! Target selection itself is validated by `effects::TargetDecl`.

pub mod eligibility;
pub mod limits;

pub use eligibility::{EligibilityChecker, Ineligible};
pub use limits::{LimitResolver, Limits, SlotUsage};
