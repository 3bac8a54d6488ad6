//! Card system: designs, physical cards, registry and decklists.
//!
//! ## Key Types
//!
//! - `RulesText`: immutable card design, shared by every copy via `Arc`
//! - `Cardboard`: one physical card (tap state, counters, zone)
//! - `CardRegistry`: design lookup by name
//! - `Decklist`: a player's starting cards, by name
//!
//! Designs are never mutated once built. An effect that changes what a card
//! is swaps in a new `RulesText` with [`Cardboard::set_rules`].

pub mod cardboard;
pub mod catalog;
pub mod decklist;
pub mod registry;
pub mod rules_text;

pub use cardboard::{Cardboard, ACTIVATED_MARKER, INVISIBLE_PREFIX};
pub use decklist::{build_game, Decklist};
pub use registry::CardRegistry;
pub use rules_text::{CardType, Keyword, RulesText};
