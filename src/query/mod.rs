//! Query layer: choices, decision strategies, getters and patterns.
//!
//! Everything here is a pure function of a state snapshot plus a
//! [`Subject`]: the player asking and the card they are asking for.

pub mod choice;
pub mod chooser;
pub mod getter;
pub mod pattern;

pub use choice::{Choice, ChoiceList};
pub use chooser::{choose_exactly_n, choose_exactly_one, choose_n_or_fewer, Chooser, EnumerateAll, FirstOption};
pub use getter::{Getter, IntGetter};
pub use pattern::{CardPattern, Comparison, PlayerPattern, VerbPattern};

use crate::core::{CardRef, GameState, PlayerId};

/// Who is asking, and about what.
///
/// `source` is the card whose ability is running; `card` is the card the
/// current verb acts on. They start out equal and differ once a verb is
/// redirected onto a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subject {
    pub player: PlayerId,
    pub source: Option<CardRef>,
    pub card: Option<CardRef>,
}

impl Subject {
    /// A player acting without a card.
    #[must_use]
    pub const fn player(player: PlayerId) -> Self {
        Self {
            player,
            source: None,
            card: None,
        }
    }

    /// A player acting through one of their cards.
    #[must_use]
    pub const fn card(player: PlayerId, card: CardRef) -> Self {
        Self {
            player,
            source: Some(card),
            card: Some(card),
        }
    }

    /// A card's owner acting through it.
    #[must_use]
    pub fn of(state: &GameState, card: CardRef) -> Self {
        Self::card(state.card(card).owner, card)
    }

    /// The same asker, acting on another card.
    #[must_use]
    pub const fn with_card(self, card: CardRef) -> Self {
        Self {
            card: Some(card),
            ..self
        }
    }
}
