//! Card system: Babe definitions, played Babes, and the catalog.
//!
//! ## Key Types
//!
//! - `BabeType`: Fixed set of type tags
//! - `BabeCard`: Static catalog data (name, type, base score)
//! - `PlayedBabe`: A Babe on the table this turn, with its play identity
//! - `Catalog`: Lookup of Babe cards and Effect scripts

pub mod definition;
pub mod registry;

pub use definition::{BabeCard, BabeType, PlayedBabe};
pub use registry::Catalog;
