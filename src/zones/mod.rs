//! Zone ownership.
//!
//! Cards live in one of three zones: the play area, the deck and the discard
//! pile (`core::Zone`). `TurnStore` owns those lists for a game in progress
//! and applies every move between them.

pub mod store;

pub use store::TurnStore;
