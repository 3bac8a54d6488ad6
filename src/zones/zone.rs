//! Fixed zones and relative zone references.
//!
//! A [`Zone`] names one concrete container: a player's hand, the shared
//! stack. A [`ZoneRef`] is what card definitions store; it may be fixed or
//! relative to whoever is asking ("your graveyard", "every player's field"),
//! and is resolved to fixed zones against a state before it is read.

use crate::core::{CardRef, GameState, PlayerId};
use crate::query::{PlayerPattern, Subject};

use super::kind::ZoneKind;

/// Who a zone belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ZoneOwner {
    /// One player's zone.
    Player(PlayerId),
    /// Shared by the table (the stack).
    Shared,
}

/// One concrete zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Zone {
    pub owner: ZoneOwner,
    pub kind: ZoneKind,
}

impl Zone {
    /// A player's zone.
    #[must_use]
    pub const fn of(player: PlayerId, kind: ZoneKind) -> Self {
        Self {
            owner: ZoneOwner::Player(player),
            kind,
        }
    }

    /// The shared stack.
    #[must_use]
    pub const fn stack() -> Self {
        Self {
            owner: ZoneOwner::Shared,
            kind: ZoneKind::Stack,
        }
    }

    /// Cards currently in this zone. For the stack, the cards of spells on it
    /// from bottom to top (filtered by controller for a player's stack zone).
    #[must_use]
    pub fn get(&self, state: &GameState) -> Vec<CardRef> {
        match (self.owner, self.kind) {
            (owner, ZoneKind::Stack) => state
                .stack
                .iter()
                .filter(|obj| match owner {
                    ZoneOwner::Shared => true,
                    ZoneOwner::Player(p) => obj.controller == p,
                })
                .filter_map(|obj| obj.card)
                .collect(),
            (ZoneOwner::Player(p), kind) => state.zone(p, kind).collect(),
            (ZoneOwner::Shared, _) => Vec::new(),
        }
    }

    /// Check if `card` is in this zone.
    #[must_use]
    pub fn contains(&self, state: &GameState, card: CardRef) -> bool {
        let cardboard = state.card(card);
        cardboard.zone == self.kind
            && match self.owner {
                ZoneOwner::Shared => true,
                ZoneOwner::Player(p) => cardboard.owner == p,
            }
    }

    /// Put `card` into this zone.
    ///
    /// Cards only ever enter their owner's zones; asking otherwise is a bug in
    /// a card definition.
    pub fn add(&self, state: &mut GameState, card: CardRef) {
        if let ZoneOwner::Player(p) = self.owner {
            assert_eq!(
                state.card(card).owner,
                p,
                "{card} cannot enter another player's {}",
                self.kind
            );
        }
        state.move_card(card, self.kind);
    }

    /// Take `card` out of this zone, leaving it in limbo.
    ///
    /// Returns false if the card was not here.
    pub fn remove(&self, state: &mut GameState, card: CardRef) -> bool {
        if !self.contains(state, card) {
            return false;
        }
        state.move_card(card, ZoneKind::New);
        true
    }
}

/// A zone as written on a card: fixed, or relative to the asking player.
#[derive(Clone, Debug, PartialEq)]
pub enum ZoneRef {
    /// A concrete zone.
    Fixed(Zone),
    /// The `kind` zone of every player matching `players`.
    Relative { players: PlayerPattern, kind: ZoneKind },
}

impl ZoneRef {
    /// The asking player's zone of this kind.
    #[must_use]
    pub fn yours(kind: ZoneKind) -> Self {
        ZoneRef::Relative {
            players: PlayerPattern::You,
            kind,
        }
    }

    /// Every player's zone of this kind.
    #[must_use]
    pub fn all(kind: ZoneKind) -> Self {
        ZoneRef::Relative {
            players: PlayerPattern::Any,
            kind,
        }
    }

    /// Resolve to fixed zones for `subject`.
    #[must_use]
    pub fn resolve(&self, state: &GameState, subject: &Subject) -> Vec<Zone> {
        match self {
            ZoneRef::Fixed(zone) => vec![*zone],
            ZoneRef::Relative { players, kind } => state
                .player_ids()
                .filter(|&p| players.matches(p, state, subject))
                .map(|p| Zone::of(p, *kind))
                .collect(),
        }
    }

    /// All cards in the resolved zones.
    #[must_use]
    pub fn cards(&self, state: &GameState, subject: &Subject) -> Vec<CardRef> {
        self.resolve(state, subject)
            .iter()
            .flat_map(|zone| zone.get(state))
            .collect()
    }

    /// Check if `card` is in one of the resolved zones.
    #[must_use]
    pub fn contains(&self, state: &GameState, subject: &Subject, card: CardRef) -> bool {
        self.resolve(state, subject)
            .iter()
            .any(|zone| zone.contains(state, card))
    }
}
