//! Arena handles for physical cards.
//!
//! Every `Cardboard` lives in its `GameState`'s card arena and is addressed by
//! a `CardRef`. Handles are state-relative: the same handle read through a
//! copied state yields the copy's card, never the original's. That is what
//! keeps stack objects, chosen targets and zone lists pointing into the right
//! graph after a branch.
//!
//! ```
//! use goldfish::core::CardRef;
//!
//! let wall = CardRef::new(3);
//! assert_eq!(wall.index(), 3);
//! assert_eq!(format!("{}", wall), "#3");
//! ```

use serde::{Deserialize, Serialize};

/// Handle of one physical card within a `GameState` arena.
///
/// Identity of a card is its handle. Two handles to cards with identical
/// contents are still different cards; use the canonical id to compare values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardRef(pub u32);

impl CardRef {
    /// Create a handle from a raw arena slot.
    #[must_use]
    pub const fn new(slot: u32) -> Self {
        Self(slot)
    }

    /// Arena slot as an index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for CardRef {
    fn from(slot: u32) -> Self {
        Self(slot)
    }
}

impl std::fmt::Display for CardRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
