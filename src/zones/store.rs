//! Turn state store.
//!
//! `TurnStore` owns the `TurnState` of a game in progress and is the only
//! thing that mutates it. Every play action is gated by the engine first,
//! and any zone moves an effect makes when it binds are applied to a copy of
//! the state that replaces the current one only once every move succeeded.
//!
//! ## Usage
//!
//! ```
//! use babes_engine::cards::{BabeCard, BabeType};
//! use babes_engine::core::{BabeId, EffectId};
//! use babes_engine::effects::{EffectScript, ScoreOp, TargetBinding};
//! use babes_engine::zones::TurnStore;
//!
//! let mut store = TurnStore::default();
//! store.play_babe(BabeCard::new(BabeId::new(1), "Roxy", BabeType::Baddie, 10)).unwrap();
//!
//! let bonus = EffectScript::new(EffectId::new(1), "Bonus").with_op(ScoreOp::final_add(5.0));
//! store.play_effect(bonus, TargetBinding::empty()).unwrap();
//!
//! assert_eq!(store.report().final_score(), 15);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cards::{BabeCard, PlayedBabe};
use crate::core::{BabeId, PlayId, RulesConfig, TurnState, Zone};
use crate::effects::{BoundEffect, EffectScript, MoveRecord, TargetBinding, TargetError};
use crate::error::{PlayError, StoreError};
use crate::scoring::{collect, Engine, PendingNext, TurnReport};

/// Owner of the turn state.
#[derive(Clone, Debug)]
pub struct TurnStore {
    engine: Engine,

    state: TurnState,

    /// Next play ID to hand out this turn.
    next_play: PlayId,

    /// Effects that ended a turn in play, oldest first.
    discarded_effects: Vec<BoundEffect>,

    /// Strokes spent this game, net of refunds.
    strokes_spent: u32,
}

impl Default for TurnStore {
    fn default() -> Self {
        Self::new(RulesConfig::default())
    }
}

/// Serialized form of a store.
#[derive(Serialize, Deserialize)]
struct Snapshot {
    config: RulesConfig,
    state: TurnState,
    next_play: PlayId,
    discarded_effects: Vec<BoundEffect>,
    strokes_spent: u32,
}

impl TurnStore {
    /// Create a store for a new game.
    #[must_use]
    pub fn new(config: RulesConfig) -> Self {
        Self {
            engine: Engine::new(config),
            state: TurnState::new(),
            next_play: PlayId::new(0),
            discarded_effects: Vec::new(),
            strokes_spent: 0,
        }
    }

    /// Start from an existing turn state.
    ///
    /// Play IDs continue after the highest one already in use.
    #[must_use]
    pub fn with_state(config: RulesConfig, state: TurnState) -> Self {
        let next_play = state
            .used_play_ids()
            .max()
            .map_or(PlayId::new(0), PlayId::next);
        Self {
            engine: Engine::new(config),
            state,
            next_play,
            discarded_effects: Vec::new(),
            strokes_spent: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &TurnState {
        &self.state
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    #[must_use]
    pub fn strokes_spent(&self) -> u32 {
        self.strokes_spent
    }

    #[must_use]
    pub fn discarded_effects(&self) -> &[BoundEffect] {
        &self.discarded_effects
    }

    /// Recompute score, limits, carry-over and log.
    #[must_use]
    pub fn report(&self) -> TurnReport {
        self.engine.evaluate(&self.state)
    }

    /// Add cards to the deck.
    pub fn stock_deck(&mut self, cards: impl IntoIterator<Item = BabeCard>) {
        self.state.deck.extend(cards);
    }

    fn allocate(&mut self) -> PlayId {
        let id = self.next_play;
        self.next_play = id.next();
        id
    }

    /// A carried-over replay not yet used this turn.
    fn is_free_replay(&self, id: BabeId) -> bool {
        let listed = self.state.pending.as_ref().is_some_and(|p| p.is_replayable(id));
        listed
            && !self
                .state
                .played_babes
                .iter()
                .any(|b| b.slot_free && b.card_id() == id)
    }

    /// Play a Babe.
    ///
    /// A Babe the carry-over lists for replay enters without using a slot.
    /// The card leaves the deck or the discard pile, whichever holds it.
    pub fn play_babe(&mut self, card: BabeCard) -> Result<PlayId, PlayError> {
        let limits = self.engine.limits(&self.state);
        let free = self.is_free_replay(card.id);
        if free {
            limits.check_babe_type(card.babe_type)?;
        } else {
            limits.check_babe(&self.state, card.babe_type)?;
        }

        if let Some(pos) = self.state.deck.iter().position(|c| c.id == card.id) {
            self.state.deck.remove(pos);
        } else if let Some(pos) = self.state.discard.iter().position(|c| c.id == card.id) {
            self.state.discard.remove(pos);
        }

        let play_id = self.allocate();
        debug!(babe = %card.name, %play_id, free, "babe played");
        self.state.play_history.push_back(card.name.clone());
        self.state.played_babes.push(if free {
            PlayedBabe::free(play_id, card)
        } else {
            PlayedBabe::new(play_id, card)
        });
        Ok(play_id)
    }

    /// Play a Babe from the deck by catalog ID.
    pub fn play_from_deck(&mut self, id: BabeId) -> Result<PlayId, PlayError> {
        let card = self
            .state
            .deck
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(PlayError::NotInDeck(id))?;
        self.play_babe(card)
    }

    /// Check whether an effect could be played now, without playing it.
    pub fn can_play_effect(&self, script: &EffectScript) -> Result<(), PlayError> {
        let limits = self.engine.resolver().resolve(
            self.state
                .played_effects
                .iter()
                .map(|e| &e.script)
                .chain(std::iter::once(script)),
            self.state.pending.as_ref(),
        );
        limits.check_effect(&self.state)?;
        self.engine.check_effect(script, &self.state)?;
        Ok(())
    }

    /// Play and bind an effect.
    ///
    /// Checks run in order: effect limit, eligibility, target selection.
    /// Zone moves from the script's `on_bind` clause are recorded on the
    /// bound effect.
    pub fn play_effect(
        &mut self,
        script: EffectScript,
        binding: TargetBinding,
    ) -> Result<PlayId, PlayError> {
        self.can_play_effect(&script)?;
        self.engine
            .validate_targets(&script.target, &self.state, &binding.targets)?;

        let play_id = self.allocate();
        let mut next = self.state.clone();
        let mut bound = BoundEffect::new(play_id, script, binding);

        if let Some(bind) = bound.script.on_bind {
            let from = bound.script.target.zone;
            let targets = bound.binding.targets.clone();
            for card in targets {
                let record = self.move_card(&mut next, card, from, bind.to, None)?;
                if record.to == Zone::Play {
                    if let Some(babe) = next.played_babes.last() {
                        next.play_history.push_back(babe.card.name.clone());
                    }
                }
                bound.moves.push(record);
            }
        }

        debug!(effect = bound.name(), %play_id, moves = bound.moves.len(), "effect bound");
        self.strokes_spent += bound.strokes_paid;
        next.played_effects.push(bound);
        self.state = next;
        Ok(play_id)
    }

    /// Take a Babe out of play, to the deck or the discard pile.
    pub fn remove_babe(&mut self, play_id: PlayId, to: Zone) -> Result<BabeCard, PlayError> {
        let pos = self
            .state
            .played_babes
            .iter()
            .position(|b| b.play_id == play_id)
            .ok_or(PlayError::UnknownPlay(play_id))?;

        if to == Zone::Play {
            return Err(PlayError::AlreadyInPlay(play_id));
        }

        let babe = self.state.played_babes.remove(pos);
        debug!(babe = %babe.card.name, %play_id, %to, "babe removed");
        if to == Zone::Deck {
            self.state.deck.push(babe.card.clone());
        } else {
            self.state.discard.push(babe.card.clone());
        }
        Ok(babe.card)
    }

    /// Take an effect back out of play.
    ///
    /// Its zone moves are reversed, latest first, and its stroke cost is
    /// refunded, unless its removal clause says otherwise. A move that can
    /// no longer be reversed is skipped.
    pub fn remove_effect(&mut self, play_id: PlayId) -> Result<BoundEffect, PlayError> {
        let pos = self
            .state
            .played_effects
            .iter()
            .position(|e| e.play_id == play_id)
            .ok_or(PlayError::UnknownPlay(play_id))?;

        let mut next = self.state.clone();
        let bound = next.played_effects.remove(pos);
        let removal = bound.script.removal();

        if removal.restore_moves {
            for undo in bound.undo_moves() {
                let moved = self.move_card(&mut next, undo.card, undo.from, undo.to, undo.play_id);
                if let Err(err) = moved {
                    warn!(effect = bound.name(), card = %undo.card, %err, "cannot reverse move");
                }
            }
        }
        if removal.refund_strokes {
            self.strokes_spent = self.strokes_spent.saturating_sub(bound.strokes_paid);
        }

        debug!(effect = bound.name(), %play_id, "effect removed");
        self.state = next;
        Ok(bound)
    }

    /// Move one card between zones of `state`.
    ///
    /// Leaving play, `play_id` picks the played Babe (else the first with
    /// the card ID) and is recorded. Entering play, the Babe gets `play_id`
    /// or a fresh one and takes no slot.
    fn move_card(
        &mut self,
        state: &mut TurnState,
        card: BabeId,
        from: Zone,
        to: Zone,
        play_id: Option<PlayId>,
    ) -> Result<MoveRecord, PlayError> {
        let missing = || PlayError::Target(TargetError::NotInZone { id: card, zone: from });

        let (moved, left_play) = match from {
            Zone::Play => {
                let pos = state
                    .played_babes
                    .iter()
                    .position(|b| match play_id {
                        Some(id) => b.play_id == id,
                        None => b.card_id() == card,
                    })
                    .ok_or_else(missing)?;
                let babe = state.played_babes.remove(pos);
                (babe.card, Some(babe.play_id))
            }
            Zone::Deck => {
                let pos = state.deck.iter().position(|c| c.id == card).ok_or_else(missing)?;
                (state.deck.remove(pos), None)
            }
            Zone::Discard => {
                let pos = state.discard.iter().position(|c| c.id == card).ok_or_else(missing)?;
                (state.discard.remove(pos), None)
            }
        };

        let record_id = match to {
            Zone::Play => {
                let id = match play_id {
                    Some(id) => id,
                    None => self.allocate(),
                };
                state.played_babes.push(PlayedBabe::free(id, moved));
                Some(id)
            }
            Zone::Deck => {
                state.deck.push(moved);
                left_play
            }
            Zone::Discard => {
                state.discard.push(moved);
                left_play
            }
        };

        debug!(%card, %from, %to, "card moved");
        Ok(MoveRecord {
            card,
            from,
            to,
            play_id: record_id,
        })
    }

    /// End the turn.
    ///
    /// Collects the carry-over, sends played Babes to the discard pile,
    /// retires played effects and starts the next turn with the carry-over
    /// installed. Returns the carry-over.
    pub fn end_turn(&mut self) -> Option<PendingNext> {
        let pending = collect(&self.state.played_effects);

        let babes = std::mem::take(&mut self.state.played_babes);
        self.state.discard.extend(babes.into_iter().map(|b| b.card));
        self.discarded_effects
            .append(&mut self.state.played_effects);

        self.state.turn_number += 1;
        self.state.pending = pending.clone();
        self.next_play = PlayId::new(0);

        debug!(turn = self.state.turn_number, carry_over = pending.is_some(), "turn ended");
        pending
    }

    /// Encode the store as an opaque blob.
    pub fn save(&self) -> Result<Vec<u8>, StoreError> {
        let snapshot = Snapshot {
            config: *self.engine.config(),
            state: self.state.clone(),
            next_play: self.next_play,
            discarded_effects: self.discarded_effects.clone(),
            strokes_spent: self.strokes_spent,
        };
        bincode::serialize(&snapshot).map_err(StoreError::Encode)
    }

    /// Restore a store from `save` output.
    pub fn load(bytes: &[u8]) -> Result<Self, StoreError> {
        let snapshot: Snapshot = bincode::deserialize(bytes).map_err(StoreError::Decode)?;
        Ok(Self {
            engine: Engine::new(snapshot.config),
            state: snapshot.state,
            next_play: snapshot.next_play,
            discarded_effects: snapshot.discarded_effects,
            strokes_spent: snapshot.strokes_spent,
        })
    }
}
