//! Error and terminal-outcome types.
//!
//! Three classes of failure exist in the engine:
//!
//! 1. **Illegal actions** are not errors at all: `can_be_done` answers
//!    `false` and `do_it` returns no branches.
//! 2. **Terminal game conditions** (a player wins or loses) end a branch.
//!    They travel as the `Err` side of a branch result ([`GameOver`]) so the
//!    search can file the final state instead of unwinding.
//! 3. **Setup errors** ([`EngineError`]) come from building a game out of
//!    bad data: unknown card names, malformed costs, invalid configuration.
//!
//! Broken internal invariants (a handle that does not resolve, a choice of
//! the wrong shape) are bugs in card definitions and panic.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::state::GameState;

/// How a finished game ended for the player it names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// The player won.
    Win,
    /// The player lost.
    Loss,
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => write!(f, "won"),
            Outcome::Loss => write!(f, "lost"),
        }
    }
}

/// A branch that reached a terminal state.
///
/// Carries the state at the moment the game ended so the play tree can keep
/// it in its win or loss set.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{player} {outcome} on turn {turn}")]
pub struct GameOver {
    /// Win or loss.
    pub outcome: Outcome,
    /// The player the outcome applies to.
    pub player: PlayerId,
    /// Turn number when the game ended.
    pub turn: u32,
    /// Final state of the branch.
    pub state: Box<GameState>,
}

impl GameOver {
    /// `player` lost the game in `state`.
    #[must_use]
    pub fn loss(state: GameState, player: PlayerId) -> Self {
        Self {
            outcome: Outcome::Loss,
            player,
            turn: state.turn,
            state: Box::new(state),
        }
    }

    /// `player` won the game in `state`.
    #[must_use]
    pub fn win(state: GameState, player: PlayerId) -> Self {
        Self {
            outcome: Outcome::Win,
            player,
            turn: state.turn,
            state: Box::new(state),
        }
    }
}

/// Errors raised while assembling games from external data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// A decklist named a card the registry does not know.
    #[error("unknown card: {0}")]
    UnknownCard(String),

    /// A mana cost string could not be parsed.
    #[error("invalid mana cost {text:?}: {reason}")]
    InvalidManaCost {
        /// The offending text.
        text: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The configuration cannot describe a playable game.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Not enough cards to deal the requested hand.
    #[error("deck too small: needed {needed} cards, have {available}")]
    DeckTooSmall {
        /// Cards required.
        needed: usize,
        /// Cards supplied.
        available: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_over_display() {
        let state = GameState::new(1, 20);
        let over = GameOver::loss(state, PlayerId::new(0));
        assert_eq!(over.to_string(), "P0 lost on turn 1");
        assert_eq!(over.outcome, Outcome::Loss);
    }

    #[test]
    fn test_engine_error_display() {
        let err = EngineError::UnknownCard("Black Lotus".into());
        assert_eq!(err.to_string(), "unknown card: Black Lotus");

        let err = EngineError::DeckTooSmall { needed: 7, available: 3 };
        assert_eq!(err.to_string(), "deck too small: needed 7 cards, have 3");
    }
}
