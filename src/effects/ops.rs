//! Scoring operations.
//!
//! A `ScoreOp` is tagged by `scope` and `op`. The engine implements:
//!
//! | scope            | op                | meaning                                     |
//! |------------------|-------------------|---------------------------------------------|
//! | `final`          | `add`             | add `amount` to the running final           |
//! | `final`          | `mult`            | multiply the running final by `amount`      |
//! | `final`          | `add-target-base` | add bound targets' base × `multiplier`      |
//! | `final-per-babe` | `add`             | add `amount` per matching played Babe       |
//! | `babe`           | `add`             | add `amount` to each selected Babe's delta  |
//! | `babe`           | `mult`            | multiply each selected Babe's multiplier    |
//!
//! Any other combination is data the engine does not understand; it is
//! logged and skipped rather than rejected, so a bad catalog entry cannot
//! abort a whole turn.

use serde::{Deserialize, Serialize};

use crate::cards::BabeType;

/// What a score operation acts on.
///
/// Unrecognised tags read as `Unknown` instead of failing the catalog load.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum OpScope {
    Final,
    FinalPerBabe,
    Babe,
    Unknown,
}

impl OpScope {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OpScope::Final => "final",
            OpScope::FinalPerBabe => "final-per-babe",
            OpScope::Babe => "babe",
            OpScope::Unknown => "unknown",
        }
    }
}

impl From<String> for OpScope {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "final" => OpScope::Final,
            "final-per-babe" => OpScope::FinalPerBabe,
            "babe" => OpScope::Babe,
            _ => OpScope::Unknown,
        }
    }
}

impl From<OpScope> for &'static str {
    fn from(scope: OpScope) -> Self {
        scope.as_str()
    }
}

/// The arithmetic a score operation performs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum OpKind {
    Add,
    Mult,
    AddTargetBase,
    Unknown,
}

impl OpKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OpKind::Add => "add",
            OpKind::Mult => "mult",
            OpKind::AddTargetBase => "add-target-base",
            OpKind::Unknown => "unknown",
        }
    }
}

impl From<String> for OpKind {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "add" => OpKind::Add,
            "mult" => OpKind::Mult,
            "add-target-base" => OpKind::AddTargetBase,
            _ => OpKind::Unknown,
        }
    }
}

impl From<OpKind> for &'static str {
    fn from(kind: OpKind) -> Self {
        kind.as_str()
    }
}

/// Which played Babes a `babe`-scoped op applies to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BabeSelector {
    /// The bound target IDs.
    #[default]
    Targets,
    /// Every played Babe of the op's type, or of the bound type.
    AllOfType,
}

/// One scoring operation of an effect script.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreOp {
    pub scope: OpScope,
    pub op: OpKind,

    /// Amount added or multiplied.
    #[serde(default)]
    pub amount: f64,

    /// Type filter (`final-per-babe`) or selected type (`babe` all-of-type).
    #[serde(default)]
    pub of_type: Option<BabeType>,

    /// `final-per-babe` only applies if every played Babe has this type.
    #[serde(default)]
    pub only_if_all_type: Option<BabeType>,

    #[serde(default)]
    pub applies_to: BabeSelector,

    /// `add-target-base` multiplier. Defaults to 1.
    #[serde(default)]
    pub multiplier: Option<f64>,

    /// `add-target-base` multiplier used when this is the only effect played.
    #[serde(default)]
    pub when_only_effect_multiplier: Option<f64>,
}

impl ScoreOp {
    /// Create a bare op with the given tags.
    #[must_use]
    pub fn new(scope: OpScope, op: OpKind, amount: f64) -> Self {
        Self {
            scope,
            op,
            amount,
            of_type: None,
            only_if_all_type: None,
            applies_to: BabeSelector::Targets,
            multiplier: None,
            when_only_effect_multiplier: None,
        }
    }

    /// `final/add`.
    #[must_use]
    pub fn final_add(amount: f64) -> Self {
        Self::new(OpScope::Final, OpKind::Add, amount)
    }

    /// `final/mult`.
    #[must_use]
    pub fn final_mult(amount: f64) -> Self {
        Self::new(OpScope::Final, OpKind::Mult, amount)
    }

    /// `final/add-target-base`.
    #[must_use]
    pub fn final_add_target_base(multiplier: f64, when_only_effect: Option<f64>) -> Self {
        let mut op = Self::new(OpScope::Final, OpKind::AddTargetBase, 0.0);
        op.multiplier = Some(multiplier);
        op.when_only_effect_multiplier = when_only_effect;
        op
    }

    /// `final-per-babe`, optionally filtered by type.
    #[must_use]
    pub fn final_per_babe(amount: f64, of_type: Option<BabeType>) -> Self {
        let mut op = Self::new(OpScope::FinalPerBabe, OpKind::Add, amount);
        op.of_type = of_type;
        op
    }

    /// `babe/add` on the bound targets.
    #[must_use]
    pub fn babe_add(amount: f64) -> Self {
        Self::new(OpScope::Babe, OpKind::Add, amount)
    }

    /// `babe/mult` on the bound targets.
    #[must_use]
    pub fn babe_mult(amount: f64) -> Self {
        Self::new(OpScope::Babe, OpKind::Mult, amount)
    }

    /// Apply a `babe` op to every played Babe of `babe_type`.
    #[must_use]
    pub fn on_type(mut self, babe_type: BabeType) -> Self {
        self.applies_to = BabeSelector::AllOfType;
        self.of_type = Some(babe_type);
        self
    }

    /// Apply a `babe` op to every played Babe of the type bound at play time.
    #[must_use]
    pub fn on_bound_type(mut self) -> Self {
        self.applies_to = BabeSelector::AllOfType;
        self.of_type = None;
        self
    }

    /// Gate a `final-per-babe` op on every played Babe being `babe_type`.
    #[must_use]
    pub fn only_if_all(mut self, babe_type: BabeType) -> Self {
        self.only_if_all_type = Some(babe_type);
        self
    }

    /// `scope/op` label for logs.
    #[must_use]
    pub fn tag(&self) -> String {
        format!("{}/{}", self.scope.as_str(), self.op.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let op = ScoreOp::final_add(5.0);
        assert_eq!(op.scope, OpScope::Final);
        assert_eq!(op.op, OpKind::Add);
        assert_eq!(op.amount, 5.0);

        let op = ScoreOp::babe_mult(2.0).on_type(BabeType::Busty);
        assert_eq!(op.applies_to, BabeSelector::AllOfType);
        assert_eq!(op.of_type, Some(BabeType::Busty));

        let op = ScoreOp::final_add_target_base(1.0, Some(3.0));
        assert_eq!(op.multiplier, Some(1.0));
        assert_eq!(op.when_only_effect_multiplier, Some(3.0));
    }

    #[test]
    fn test_tag() {
        assert_eq!(ScoreOp::final_per_babe(2.0, None).tag(), "final-per-babe/add");
        assert_eq!(ScoreOp::final_add_target_base(1.0, None).tag(), "final/add-target-base");
    }

    #[test]
    fn test_catalog_json() {
        let json = r#"{
            "scope": "babe",
            "op": "mult",
            "amount": 2,
            "applies_to": "all-of-type",
            "of_type": "BUSTY"
        }"#;
        let op: ScoreOp = serde_json::from_str(json).unwrap();
        assert_eq!(op, ScoreOp::babe_mult(2.0).on_type(BabeType::Busty));
    }

    #[test]
    fn test_unknown_tags_deserialize() {
        let json = r#"{"scope":"deck","op":"shuffle"}"#;
        let op: ScoreOp = serde_json::from_str(json).unwrap();
        assert_eq!(op.scope, OpScope::Unknown);
        assert_eq!(op.op, OpKind::Unknown);
        assert_eq!(op.tag(), "unknown/unknown");
    }
}
