//! Score breakdown types.

use serde::{Deserialize, Serialize};

use crate::cards::PlayedBabe;
use crate::core::{BabeId, PlayId};

/// Working score of one played Babe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BabeScore {
    pub play_id: PlayId,
    pub card_id: BabeId,
    pub name: String,

    /// Catalog base score.
    pub base: i64,

    /// Sum of `babe/add` amounts.
    pub delta: f64,

    /// Product of `babe/mult` amounts and carry-over multipliers.
    pub mult: f64,
}

impl BabeScore {
    /// Start from the catalog card: no delta, multiplier 1.
    #[must_use]
    pub fn from_played(babe: &PlayedBabe) -> Self {
        Self {
            play_id: babe.play_id,
            card_id: babe.card.id,
            name: babe.card.name.clone(),
            base: babe.card.base_score,
            delta: 0.0,
            mult: 1.0,
        }
    }

    /// `round((base + delta) * mult)`.
    #[must_use]
    pub fn total(&self) -> i64 {
        ((self.base as f64 + self.delta) * self.mult).round() as i64
    }
}

/// Per-Babe and final scores of a turn.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// One entry per played Babe, in play order.
    pub babes: Vec<BabeScore>,

    /// Sum of Babe totals once every `babe` op has applied.
    pub final_before: i64,

    /// Rounded final score after every op and the carry-over. May be negative.
    pub final_after: i64,
}

impl ScoreBreakdown {
    /// Score entry of a played Babe.
    #[must_use]
    pub fn babe(&self, play_id: PlayId) -> Option<&BabeScore> {
        self.babes.iter().find(|b| b.play_id == play_id)
    }

    /// Totals in play order.
    #[must_use]
    pub fn totals(&self) -> Vec<i64> {
        self.babes.iter().map(BabeScore::total).collect()
    }
}
