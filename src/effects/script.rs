//! Effect scripts.
//!
//! An `EffectScript` is the declarative catalog form of an Effect card:
//! what it targets, how it scores, what it needs, how it changes the turn's
//! play limits and what it leaves behind for next turn.

use serde::{Deserialize, Serialize};

use crate::cards::BabeType;
use crate::core::{EffectId, Zone};

use super::ops::ScoreOp;
use super::targeting::TargetDecl;

/// Precondition an effect needs before it can be played.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Requirement {
    /// The named Babe is the only Babe played this turn.
    OnlyBabePlayed { name: String },

    /// The named Babe is in the discard pile.
    DiscardHasBabe { name: String },

    /// At least `count` Babes of `babe_type` are in the discard pile.
    DiscardHasTypeAtLeast { babe_type: BabeType, count: usize },

    /// Some Babe whose name starts with `prefix` has been played this game.
    PlayedHistoryHasPrefix { prefix: String },

    /// The discard pile holds a Babe with exactly this base score.
    DiscardHasBaseScore { score: i64 },
}

/// Modifier to the turn's play limits while the effect is in play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LimitMod {
    IgnoreEffectLimit,

    /// Raise the Babe limit to at least `n`.
    SetBabeLimitTo { n: u32 },

    ExtraPlays {
        #[serde(default)]
        babes: u32,
        #[serde(default)]
        effects: u32,
    },

    /// Lower the Effect limit to at most `n`.
    CapEffectLimitTo { n: u32 },

    RestrictBabeTypeTo { babe_type: BabeType },

    /// The effect itself occupies a Babe slot.
    ConsumesBabeSlot,

    /// Extra Babe slots usable only by `babe_type`.
    ExtraTypePlays { babe_type: BabeType, n: u32 },
}

fn one() -> f64 {
    1.0
}

fn yes() -> bool {
    true
}

/// Deferred effects that apply next turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FutureClause {
    /// Flat bonus to next turn's final score.
    #[serde(default)]
    pub next_add: f64,

    /// Multiplier on next turn's final score.
    #[serde(default = "one")]
    pub next_mult: f64,

    /// The bound targets may be replayed for free next turn.
    #[serde(default)]
    pub replay_targets: bool,

    /// If a bound target is played next turn, it is worth this many times.
    #[serde(default)]
    pub targets_next_turn_mult: Option<f64>,

    #[serde(default)]
    pub ignore_babe_limit_next: bool,
}

impl Default for FutureClause {
    fn default() -> Self {
        Self {
            next_add: 0.0,
            next_mult: 1.0,
            replay_targets: false,
            targets_next_turn_mult: None,
            ignore_babe_limit_next: false,
        }
    }
}

/// What happens when a bound effect is taken back out of play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnRemoveClause {
    /// Reverse the zone moves the effect made when it was bound.
    #[serde(default = "yes")]
    pub restore_moves: bool,

    /// Give back the stroke cost.
    #[serde(default = "yes")]
    pub refund_strokes: bool,
}

impl Default for OnRemoveClause {
    fn default() -> Self {
        Self {
            restore_moves: true,
            refund_strokes: true,
        }
    }
}

/// Move the bound targets out of their declared zone when the effect binds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneMove {
    pub to: Zone,
}

/// Catalog entry for an Effect card.
///
/// ## Example
///
/// ```
/// use babes_engine::cards::BabeType;
/// use babes_engine::core::EffectId;
/// use babes_engine::effects::{EffectScript, ScoreOp};
///
/// let script = EffectScript::new(EffectId::new(1), "Double Trouble")
///     .with_op(ScoreOp::babe_mult(2.0).on_type(BabeType::Busty));
///
/// assert!(script.target.is_none());
/// assert_eq!(script.score.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EffectScript {
    pub id: EffectId,

    pub name: String,

    #[serde(default)]
    pub target: TargetDecl,

    #[serde(default)]
    pub score: Vec<ScoreOp>,

    #[serde(default)]
    pub requires: Vec<Requirement>,

    #[serde(default)]
    pub limits: Vec<LimitMod>,

    #[serde(default)]
    pub future: Option<FutureClause>,

    #[serde(default)]
    pub on_remove: Option<OnRemoveClause>,

    #[serde(default)]
    pub on_bind: Option<ZoneMove>,

    /// Strokes spent to play the effect.
    #[serde(default)]
    pub stroke_cost: u32,
}

impl EffectScript {
    /// Create a script with no target, ops or modifiers.
    #[must_use]
    pub fn new(id: EffectId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            target: TargetDecl::none(),
            score: Vec::new(),
            requires: Vec::new(),
            limits: Vec::new(),
            future: None,
            on_remove: None,
            on_bind: None,
            stroke_cost: 0,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: TargetDecl) -> Self {
        self.target = target;
        self
    }

    #[must_use]
    pub fn with_op(mut self, op: ScoreOp) -> Self {
        self.score.push(op);
        self
    }

    #[must_use]
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requires.push(requirement);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: LimitMod) -> Self {
        self.limits.push(limit);
        self
    }

    #[must_use]
    pub fn with_future(mut self, future: FutureClause) -> Self {
        self.future = Some(future);
        self
    }

    #[must_use]
    pub fn with_on_remove(mut self, on_remove: OnRemoveClause) -> Self {
        self.on_remove = Some(on_remove);
        self
    }

    #[must_use]
    pub fn with_on_bind(mut self, to: Zone) -> Self {
        self.on_bind = Some(ZoneMove { to });
        self
    }

    #[must_use]
    pub fn with_stroke_cost(mut self, cost: u32) -> Self {
        self.stroke_cost = cost;
        self
    }

    /// Smallest `cap-effect-limit-to` this script declares.
    #[must_use]
    pub fn effect_cap(&self) -> Option<u32> {
        self.limits
            .iter()
            .filter_map(|l| match l {
                LimitMod::CapEffectLimitTo { n } => Some(*n),
                _ => None,
            })
            .min()
    }

    /// Last `restrict-babe-type-to` this script declares.
    #[must_use]
    pub fn babe_type_restriction(&self) -> Option<BabeType> {
        self.limits.iter().rev().find_map(|l| match l {
            LimitMod::RestrictBabeTypeTo { babe_type } => Some(*babe_type),
            _ => None,
        })
    }

    #[must_use]
    pub fn consumes_babe_slot(&self) -> bool {
        self.limits.contains(&LimitMod::ConsumesBabeSlot)
    }

    /// The removal clause, or the default one when the script has none.
    #[must_use]
    pub fn removal(&self) -> OnRemoveClause {
        self.on_remove.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_helpers() {
        let script = EffectScript::new(EffectId::new(1), "Solo Act")
            .with_limit(LimitMod::CapEffectLimitTo { n: 3 })
            .with_limit(LimitMod::CapEffectLimitTo { n: 1 })
            .with_limit(LimitMod::RestrictBabeTypeTo { babe_type: BabeType::Goth })
            .with_limit(LimitMod::ConsumesBabeSlot);

        assert_eq!(script.effect_cap(), Some(1));
        assert_eq!(script.babe_type_restriction(), Some(BabeType::Goth));
        assert!(script.consumes_babe_slot());
    }

    #[test]
    fn test_plain_script_has_no_limits() {
        let script = EffectScript::new(EffectId::new(2), "Plain");
        assert_eq!(script.effect_cap(), None);
        assert_eq!(script.babe_type_restriction(), None);
        assert!(!script.consumes_babe_slot());
        assert_eq!(script.removal(), OnRemoveClause::default());
    }

    #[test]
    fn test_future_defaults() {
        let future: FutureClause = serde_json::from_str(r#"{"next_add":30}"#).unwrap();
        assert_eq!(future.next_add, 30.0);
        assert_eq!(future.next_mult, 1.0);
        assert!(!future.replay_targets);
    }

    #[test]
    fn test_catalog_json() {
        let json = r#"{
            "id": 7,
            "name": "Goth Night",
            "score": [{"scope":"final","op":"add","amount":10}],
            "requires": [{"discard-has-type-at-least": {"babe_type":"GOTH","count":2}}],
            "limits": [{"extra-plays": {"babes":1}}, "consumes-babe-slot"],
            "stroke_cost": 2
        }"#;
        let script: EffectScript = serde_json::from_str(json).unwrap();
        assert_eq!(script.id, EffectId::new(7));
        assert!(script.target.is_none());
        assert_eq!(
            script.requires[0],
            Requirement::DiscardHasTypeAtLeast { babe_type: BabeType::Goth, count: 2 }
        );
        assert_eq!(script.limits[0], LimitMod::ExtraPlays { babes: 1, effects: 0 });
        assert!(script.consumes_babe_slot());
        assert_eq!(script.stroke_cost, 2);
    }
}
