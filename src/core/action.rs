//! Player actions and the history log.
//!
//! An `Action` is one thing the active player can do from a stable state:
//! play a land, cast a spell, activate an ability, or let the top of the
//! stack resolve. Actions carry the choices already made for them (payment,
//! targets, modes) so applying one never needs to ask anything again.
//!
//! Actions only hold handles and indices, so they compare and hash cheaply
//! and describe themselves against a state.

use serde::{Deserialize, Serialize};

use super::entity::CardRef;
use super::player::PlayerId;
use super::state::GameState;
use crate::query::{Choice, ChoiceList};

/// A complete, fully-decided action.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Put a land from hand onto the field.
    PlayLand {
        /// The land.
        card: CardRef,
    },

    /// Cast a spell from hand.
    Cast {
        /// The spell.
        card: CardRef,
        /// Choices paying the cost.
        cost: ChoiceList,
        /// Choices for the effect (targets, modes).
        effect: ChoiceList,
    },

    /// Activate an ability of a permanent.
    Activate {
        /// The permanent.
        source: CardRef,
        /// Index into the permanent's activated abilities.
        ability: usize,
        /// Choices paying the cost.
        cost: ChoiceList,
        /// Choices for the effect.
        effect: ChoiceList,
    },

    /// Resolve the top object of the stack.
    ResolveTop,
}

impl Action {
    /// The card this action uses, if any.
    #[must_use]
    pub fn card(&self) -> Option<CardRef> {
        match self {
            Action::PlayLand { card } | Action::Cast { card, .. } => Some(*card),
            Action::Activate { source, .. } => Some(*source),
            Action::ResolveTop => None,
        }
    }

    /// Human-readable description against `state`.
    #[must_use]
    pub fn describe(&self, state: &GameState) -> String {
        let describe_choices = |choices: &[Choice]| {
            choices
                .iter()
                .map(|c| c.describe(state))
                .collect::<Vec<_>>()
                .join(",")
        };

        match self {
            Action::PlayLand { card } => format!("play {}", state.card(*card).name()),
            Action::Cast { card, cost, effect } => format!(
                "cast {} [{}] ({})",
                state.card(*card).name(),
                describe_choices(cost),
                describe_choices(effect)
            ),
            Action::Activate {
                source,
                ability,
                effect,
                ..
            } => {
                let cardboard = state.card(*source);
                let name = cardboard
                    .rules
                    .activated
                    .get(*ability)
                    .map_or("?", |a| a.name.as_str());
                format!("activate {}: {} ({})", cardboard.name(), name, describe_choices(effect))
            }
            Action::ResolveTop => "resolve top of stack".to_string(),
        }
    }
}

/// One entry of the history log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who acted.
    pub player: PlayerId,

    /// Turn number when it happened.
    pub turn: u32,

    /// What happened.
    pub description: String,
}

impl ActionRecord {
    /// Create a new record.
    #[must_use]
    pub fn new(player: PlayerId, turn: u32, description: impl Into<String>) -> Self {
        Self {
            player,
            turn,
            description: description.into(),
        }
    }
}
