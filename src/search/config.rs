//! Search budget.

use serde::{Deserialize, Serialize};

/// Limits for a play-tree search.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Last turn to explore. Turns are numbered from the start state's turn,
    /// so a game starting on turn 1 with a limit of 3 explores turns 1 to 3.
    pub turn_limit: u32,

    /// Maximum distinct states tracked per turn. Once reached, new states
    /// for that turn are dropped and the turn is marked truncated.
    pub max_states_per_turn: usize,

    /// Maximum insertions (duplicates included) per turn before the main
    /// phase stops expanding.
    pub max_traversals_per_turn: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            turn_limit: 3,
            max_states_per_turn: 100_000,
            max_traversals_per_turn: 1_000_000,
        }
    }
}

impl SearchConfig {
    /// Set the last turn to explore.
    #[must_use]
    pub fn with_turn_limit(mut self, turn: u32) -> Self {
        self.turn_limit = turn;
        self
    }

    /// Set the per-turn state cap.
    #[must_use]
    pub fn with_max_states(mut self, states: usize) -> Self {
        self.max_states_per_turn = states;
        self
    }

    /// Set the per-turn traversal cap.
    #[must_use]
    pub fn with_max_traversals(mut self, traversals: usize) -> Self {
        self.max_traversals_per_turn = traversals;
        self
    }
}
