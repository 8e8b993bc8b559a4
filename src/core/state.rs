//! Turn state.
//!
//! `TurnState` is everything the engine reads to score, gate and validate a
//! turn:
//! - Babes and bound Effects in play, in play order
//! - Discard pile and deck (Babe cards)
//! - Names of every Babe played this game
//! - Carry-over from the previous turn
//!
//! The engine only reads it. Mutation belongs to whoever owns the turn
//! (see `zones::TurnStore`).

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::Zone;
use super::ids::{BabeId, PlayId};
use crate::cards::{BabeCard, BabeType, PlayedBabe};
use crate::effects::BoundEffect;
use crate::scoring::PendingNext;

/// Snapshot of a turn in progress.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TurnState {
    /// Turn number (starts at 1).
    pub turn_number: u32,

    /// Babes played this turn, in play order.
    pub played_babes: Vec<PlayedBabe>,

    /// Effects bound this turn, in play order. Order matters for scoring.
    pub played_effects: Vec<BoundEffect>,

    pub discard: Vec<BabeCard>,

    pub deck: Vec<BabeCard>,

    /// Names of every Babe played this game, oldest first.
    pub play_history: Vector<String>,

    /// Carry-over from the previous turn.
    #[serde(default)]
    pub pending: Option<PendingNext>,
}

impl TurnState {
    /// Create an empty first turn.
    #[must_use]
    pub fn new() -> Self {
        Self {
            turn_number: 1,
            ..Self::default()
        }
    }

    /// Set the discard pile (builder pattern).
    #[must_use]
    pub fn with_discard(mut self, discard: impl IntoIterator<Item = BabeCard>) -> Self {
        self.discard = discard.into_iter().collect();
        self
    }

    /// Set the deck (builder pattern).
    #[must_use]
    pub fn with_deck(mut self, deck: impl IntoIterator<Item = BabeCard>) -> Self {
        self.deck = deck.into_iter().collect();
        self
    }

    /// Set the carry-over (builder pattern).
    #[must_use]
    pub fn with_pending(mut self, pending: Option<PendingNext>) -> Self {
        self.pending = pending;
        self
    }

    /// Add a played Babe (builder pattern).
    #[must_use]
    pub fn with_babe(mut self, babe: PlayedBabe) -> Self {
        self.played_babes.push(babe);
        self
    }

    /// Add a bound Effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: BoundEffect) -> Self {
        self.played_effects.push(effect);
        self
    }

    /// Cards in a zone.
    #[must_use]
    pub fn cards_in(&self, zone: Zone) -> Vec<&BabeCard> {
        match zone {
            Zone::Play => self.played_babes.iter().map(|b| &b.card).collect(),
            Zone::Deck => self.deck.iter().collect(),
            Zone::Discard => self.discard.iter().collect(),
        }
    }

    /// Find a card by catalog ID in a zone.
    #[must_use]
    pub fn find_in_zone(&self, zone: Zone, id: BabeId) -> Option<&BabeCard> {
        match zone {
            Zone::Play => self.played_babes.iter().map(|b| &b.card).find(|c| c.id == id),
            Zone::Deck => self.deck.iter().find(|c| c.id == id),
            Zone::Discard => self.discard.iter().find(|c| c.id == id),
        }
    }

    /// Get a played Babe by play ID.
    #[must_use]
    pub fn played_babe(&self, play_id: PlayId) -> Option<&PlayedBabe> {
        self.played_babes.iter().find(|b| b.play_id == play_id)
    }

    /// Get a bound Effect by play ID.
    #[must_use]
    pub fn played_effect(&self, play_id: PlayId) -> Option<&BoundEffect> {
        self.played_effects.iter().find(|e| e.play_id == play_id)
    }

    /// Count discarded Babes of a type.
    #[must_use]
    pub fn discard_count_of_type(&self, babe_type: BabeType) -> usize {
        self.discard.iter().filter(|c| c.is_type(babe_type)).count()
    }

    /// Play IDs already used this turn, Babes and Effects together.
    pub fn used_play_ids(&self) -> impl Iterator<Item = PlayId> + '_ {
        self.played_babes
            .iter()
            .map(|b| b.play_id)
            .chain(self.played_effects.iter().map(|e| e.play_id))
    }
}
