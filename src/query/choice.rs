//! Positional choices.
//!
//! Verbs take their decisions as a flat list of `Choice`s, each verb reading
//! its own prefix. A choice is a plain value: a card handle, a player, a
//! number, some mana, a mode index, or a nested list for composite getters.

use smallvec::SmallVec;

use crate::core::{CardRef, GameState, PlayerId};
use crate::mana::ManaPool;

/// One decision.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Choice {
    /// A single card.
    Card(CardRef),
    /// A selection of cards.
    Cards(Vec<CardRef>),
    /// A player.
    Player(PlayerId),
    /// A number.
    Int(i64),
    /// Mana.
    Mana(ManaPool),
    /// Which of several sub-verbs to run.
    Index(usize),
    /// Several decisions made together (pair and repeat getters).
    List(Vec<Choice>),
}

/// A flat list of choices. Most verbs need at most a handful.
pub type ChoiceList = SmallVec<[Choice; 4]>;

impl Choice {
    /// The card, if this is a card choice.
    #[must_use]
    pub fn as_card(&self) -> Option<CardRef> {
        match self {
            Choice::Card(card) => Some(*card),
            _ => None,
        }
    }

    /// The cards of a selection (a single card counts as a selection of one).
    #[must_use]
    pub fn as_cards(&self) -> Option<Vec<CardRef>> {
        match self {
            Choice::Cards(cards) => Some(cards.clone()),
            Choice::Card(card) => Some(vec![*card]),
            _ => None,
        }
    }

    /// The player, if this is a player choice.
    #[must_use]
    pub fn as_player(&self) -> Option<PlayerId> {
        match self {
            Choice::Player(player) => Some(*player),
            _ => None,
        }
    }

    /// The number, if this is a number choice.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Choice::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The mode index, if this is an index choice.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Choice::Index(i) => Some(*i),
            _ => None,
        }
    }

    /// Mana, summing over a list of mana choices.
    #[must_use]
    pub fn as_mana(&self) -> Option<ManaPool> {
        match self {
            Choice::Mana(pool) => Some(*pool),
            Choice::List(items) => items.iter().try_fold(ManaPool::new(), |mut total, item| {
                total.add(&item.as_mana()?);
                Some(total)
            }),
            _ => None,
        }
    }

    /// Canonical description. Cards are described by their ids, not their
    /// handles, so equivalent states describe equivalent choices the same.
    #[must_use]
    pub fn describe(&self, state: &GameState) -> String {
        match self {
            Choice::Card(card) => state.card(*card).id(),
            Choice::Cards(cards) => {
                let mut ids: Vec<String> = cards.iter().map(|&c| state.card(c).id()).collect();
                ids.sort_unstable();
                format!("{{{}}}", ids.join(","))
            }
            Choice::Player(player) => player.to_string(),
            Choice::Int(n) => n.to_string(),
            Choice::Mana(pool) => format!("({pool})"),
            Choice::Index(i) => format!("#{i}"),
            Choice::List(items) => {
                let parts: Vec<String> = items.iter().map(|c| c.describe(state)).collect();
                format!("[{}]", parts.join(","))
            }
        }
    }
}
