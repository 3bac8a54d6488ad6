//! Zone kinds.

use serde::{Deserialize, Serialize};

/// Where a card is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    /// Not in any zone yet.
    #[default]
    New,
    /// Library (ordered, hidden).
    Deck,
    /// Hand.
    Hand,
    /// Battlefield.
    Field,
    /// Graveyard.
    Grave,
    /// On the stack as a spell.
    Stack,
}

impl ZoneKind {
    /// Single-letter code used in canonical ids.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            ZoneKind::New => 'N',
            ZoneKind::Deck => 'D',
            ZoneKind::Hand => 'H',
            ZoneKind::Field => 'F',
            ZoneKind::Grave => 'G',
            ZoneKind::Stack => 'K',
        }
    }

    /// Zones whose cards can have triggered abilities that watch the game.
    pub const TRIGGER_SOURCES: [ZoneKind; 3] = [ZoneKind::Hand, ZoneKind::Field, ZoneKind::Grave];
}

impl std::fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ZoneKind::New => "new",
            ZoneKind::Deck => "deck",
            ZoneKind::Hand => "hand",
            ZoneKind::Field => "field",
            ZoneKind::Grave => "graveyard",
            ZoneKind::Stack => "stack",
        };
        f.write_str(name)
    }
}
