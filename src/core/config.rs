//! Rules configuration and zones.
//!
//! - `Zone`: The three places a card instance can reside
//! - `RulesConfig`: Base per-turn play limits the Limit Resolver folds from
//!
//! Defaults match the tabletop rules: two Babes and two Effects per turn.

use serde::{Deserialize, Serialize};

/// A place a card can be.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Zone {
    /// Cards played this turn.
    #[default]
    Play,
    /// The available pool.
    Deck,
    /// The discard pile.
    Discard,
}

impl Zone {
    /// Lowercase name used in log lines and error messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Zone::Play => "play area",
            Zone::Deck => "deck",
            Zone::Discard => "discard pile",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Base play limits before any effect modifies them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Babes a player may play per turn.
    pub base_babe_limit: u32,

    /// Effects a player may play per turn.
    pub base_effect_limit: u32,
}

impl RulesConfig {
    /// Default Babe limit.
    pub const DEFAULT_BABE_LIMIT: u32 = 2;

    /// Default Effect limit.
    pub const DEFAULT_EFFECT_LIMIT: u32 = 2;

    /// Create the standard configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the base Babe limit.
    #[must_use]
    pub fn with_babe_limit(mut self, limit: u32) -> Self {
        self.base_babe_limit = limit;
        self
    }

    /// Override the base Effect limit.
    #[must_use]
    pub fn with_effect_limit(mut self, limit: u32) -> Self {
        self.base_effect_limit = limit;
        self
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            base_babe_limit: Self::DEFAULT_BABE_LIMIT,
            base_effect_limit: Self::DEFAULT_EFFECT_LIMIT,
        }
    }
}
