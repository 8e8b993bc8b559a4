//! Bound effects.
//!
//! A `BoundEffect` is an effect script that has been played: it carries its
//! play identity, the caller's resolved target binding and a record of every
//! zone move binding caused, so taking the effect back can undo them.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::BabeType;
use crate::core::{BabeId, PlayId, Zone};

use super::script::EffectScript;

/// Target IDs of a binding. Most effects take one or two.
pub type TargetIds = SmallVec<[BabeId; 4]>;

/// Caller-supplied target selection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetBinding {
    #[serde(default)]
    pub targets: TargetIds,

    /// Type chosen for type-scoped effects.
    #[serde(default)]
    pub resolved_type: Option<BabeType>,
}

impl TargetBinding {
    /// A binding with no targets.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A binding to the given targets.
    #[must_use]
    pub fn targets(ids: impl IntoIterator<Item = BabeId>) -> Self {
        Self {
            targets: ids.into_iter().collect(),
            resolved_type: None,
        }
    }

    /// A binding to a chosen type.
    #[must_use]
    pub fn of_type(babe_type: BabeType) -> Self {
        Self {
            targets: TargetIds::new(),
            resolved_type: Some(babe_type),
        }
    }

    /// Set the resolved type (builder pattern).
    #[must_use]
    pub fn with_type(mut self, babe_type: BabeType) -> Self {
        self.resolved_type = Some(babe_type);
        self
    }
}

/// A card moved between zones as a side effect of binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub card: BabeId,
    pub from: Zone,
    pub to: Zone,

    /// Play identity given to the card if it was moved into play.
    #[serde(default)]
    pub play_id: Option<PlayId>,
}

impl MoveRecord {
    /// The move that undoes this one.
    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            card: self.card,
            from: self.to,
            to: self.from,
            play_id: self.play_id,
        }
    }
}

/// An effect in play.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundEffect {
    pub play_id: PlayId,

    pub script: EffectScript,

    #[serde(default)]
    pub binding: TargetBinding,

    /// Zone moves made when the effect was bound, in order.
    #[serde(default)]
    pub moves: Vec<MoveRecord>,

    /// Strokes paid to play the effect.
    #[serde(default)]
    pub strokes_paid: u32,
}

impl BoundEffect {
    /// Bind a script.
    #[must_use]
    pub fn new(play_id: PlayId, script: EffectScript, binding: TargetBinding) -> Self {
        Self {
            play_id,
            strokes_paid: script.stroke_cost,
            script,
            binding,
            moves: Vec::new(),
        }
    }

    /// Bind a script that takes no targets.
    #[must_use]
    pub fn untargeted(play_id: PlayId, script: EffectScript) -> Self {
        Self::new(play_id, script, TargetBinding::empty())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.script.name
    }

    #[must_use]
    pub fn targets(&self) -> &[BabeId] {
        &self.binding.targets
    }

    #[must_use]
    pub fn resolved_type(&self) -> Option<BabeType> {
        self.binding.resolved_type
    }

    /// Record a zone move (builder pattern).
    #[must_use]
    pub fn with_move(mut self, record: MoveRecord) -> Self {
        self.moves.push(record);
        self
    }

    /// Moves that undo the binding, latest first.
    pub fn undo_moves(&self) -> impl Iterator<Item = MoveRecord> + '_ {
        self.moves.iter().rev().map(|m| m.inverse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EffectId;

    #[test]
    fn test_binding_builders() {
        let binding =
            TargetBinding::targets([BabeId::new(1), BabeId::new(2)]).with_type(BabeType::Goth);
        assert_eq!(binding.targets.as_slice(), &[BabeId::new(1), BabeId::new(2)]);
        assert_eq!(binding.resolved_type, Some(BabeType::Goth));

        assert!(TargetBinding::empty().targets.is_empty());
        assert_eq!(TargetBinding::of_type(BabeType::Alt).resolved_type, Some(BabeType::Alt));
    }

    #[test]
    fn test_bound_effect_pays_stroke_cost() {
        let script = EffectScript::new(EffectId::new(1), "Pricey").with_stroke_cost(3);
        let bound = BoundEffect::untargeted(PlayId::new(0), script);
        assert_eq!(bound.strokes_paid, 3);
        assert_eq!(bound.name(), "Pricey");
        assert!(bound.targets().is_empty());
    }

    #[test]
    fn test_undo_moves_reverse_order() {
        let script = EffectScript::new(EffectId::new(2), "Revive");
        let bound = BoundEffect::untargeted(PlayId::new(0), script)
            .with_move(MoveRecord {
                card: BabeId::new(1),
                from: Zone::Discard,
                to: Zone::Play,
                play_id: Some(PlayId::new(5)),
            })
            .with_move(MoveRecord {
                card: BabeId::new(2),
                from: Zone::Deck,
                to: Zone::Discard,
                play_id: None,
            });

        let undo: Vec<_> = bound.undo_moves().collect();
        assert_eq!(undo.len(), 2);
        assert_eq!(undo[0].card, BabeId::new(2));
        assert_eq!((undo[0].from, undo[0].to), (Zone::Discard, Zone::Deck));
        assert_eq!((undo[1].from, undo[1].to), (Zone::Play, Zone::Discard));
        assert_eq!(undo[1].play_id, Some(PlayId::new(5)));
    }
}
