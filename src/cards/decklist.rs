//! Decklists and starting-state setup.
//!
//! A [`Decklist`] names the cards one player starts with, zone by zone.
//! [`build_game`] turns a configuration plus one decklist per seat into a
//! starting [`GameState`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{EngineError, GameConfig, GameRng, GameState, PlayerId};
use crate::zones::ZoneKind;

use super::registry::CardRegistry;

/// Cards one player starts with, by name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Decklist {
    /// Library, top first.
    pub deck: Vec<String>,
    /// Starting hand.
    pub hand: Vec<String>,
    /// Permanents already in play.
    pub field: Vec<String>,
    /// Shuffle the library before dealing.
    pub shuffle: bool,
    /// Draw the configured opening hand from the library, after `hand`.
    pub deal_opening_hand: bool,
}

impl Decklist {
    /// A library, top first.
    #[must_use]
    pub fn new(deck: &[&str]) -> Self {
        Self {
            deck: deck.iter().map(|s| (*s).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Set the starting hand.
    #[must_use]
    pub fn with_hand(mut self, hand: &[&str]) -> Self {
        self.hand = hand.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Set the starting permanents.
    #[must_use]
    pub fn with_field(mut self, field: &[&str]) -> Self {
        self.field = field.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Shuffle before dealing.
    #[must_use]
    pub fn shuffled(mut self) -> Self {
        self.shuffle = true;
        self
    }

    /// Draw the opening hand from the library.
    #[must_use]
    pub fn dealing_opening_hand(mut self) -> Self {
        self.deal_opening_hand = true;
        self
    }
}

/// Build a starting state: one decklist per seat, shuffles seeded by `seed`.
///
/// Starting permanents are not summoning sick.
pub fn build_game(
    config: &GameConfig,
    registry: &CardRegistry,
    decklists: &[Decklist],
    seed: u64,
) -> Result<GameState, EngineError> {
    let mut state = GameState::from_config(config)?;
    if decklists.len() != config.player_count {
        return Err(EngineError::InvalidConfig(format!(
            "{} decklists for {} players",
            decklists.len(),
            config.player_count
        )));
    }
    let rng = GameRng::new(seed);

    for (player, list) in PlayerId::all(config.player_count).zip(decklists) {
        let mut deck = list.deck.clone();
        if list.shuffle {
            rng.for_context(&format!("deck:{player}")).shuffle(&mut deck);
        }
        if list.deal_opening_hand && deck.len() < config.opening_hand_size {
            return Err(EngineError::DeckTooSmall {
                needed: config.opening_hand_size,
                available: deck.len(),
            });
        }

        // Cards created into a deck go on top, so deal bottom first.
        for name in deck.iter().rev() {
            state.create_card(registry.lookup(name)?, player, ZoneKind::Deck);
        }
        for name in &list.hand {
            state.create_card(registry.lookup(name)?, player, ZoneKind::Hand);
        }
        for name in &list.field {
            let card = state.create_card(registry.lookup(name)?, player, ZoneKind::Field);
            state.card_mut(card).summon_sick = false;
        }
        if list.deal_opening_hand {
            for _ in 0..config.opening_hand_size {
                if let Some(card) = state.top_of_deck(player) {
                    state.move_card(card, ZoneKind::Hand);
                }
            }
        }
        debug!(
            player = %player,
            deck = state.zone_size(player, ZoneKind::Deck),
            hand = state.zone_size(player, ZoneKind::Hand),
            "dealt"
        );
    }
    Ok(state)
}
