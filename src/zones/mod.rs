//! Zones: where cards are.
//!
//! ## Key Types
//!
//! - `ZoneKind`: deck, hand, field, graveyard, stack
//! - `Zone`: one concrete zone (a player's hand, the shared stack)
//! - `ZoneRef`: a zone as written on a card, possibly relative to the asker

pub mod kind;
pub mod zone;

pub use kind::ZoneKind;
pub use zone::{Zone, ZoneOwner, ZoneRef};
