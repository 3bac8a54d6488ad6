//! Search statistics for diagnostics and tuning.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What the search saw on one turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnStats {
    /// Turn number.
    pub turn: u32,

    /// Distinct states reached.
    pub intermediate: usize,

    /// States that had at least one action to explore.
    pub active: usize,

    /// Distinct winning end states.
    pub wins: usize,

    /// Distinct losing end states.
    pub losses: usize,

    /// Insertions attempted, duplicates included.
    pub traversed: usize,

    /// Whether a budget cut the turn short.
    pub truncated: bool,
}

impl fmt::Display for TurnStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "turn {}: {} states ({} active), {} wins, {} losses, {} traversed",
            self.turn, self.intermediate, self.active, self.wins, self.losses, self.traversed
        )?;
        if self.truncated {
            write!(f, " [truncated]")?;
        }
        Ok(())
    }
}

/// Statistics for a whole search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// One entry per explored turn, in order.
    pub turns: Vec<TurnStats>,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Distinct states across all turns.
    #[must_use]
    pub fn total_states(&self) -> usize {
        self.turns.iter().map(|t| t.intermediate).sum()
    }

    /// Insertions across all turns.
    #[must_use]
    pub fn total_traversed(&self) -> usize {
        self.turns.iter().map(|t| t.traversed).sum()
    }

    /// Check if any turn was truncated.
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.turns.iter().any(|t| t.truncated)
    }

    /// Distinct states per second.
    #[must_use]
    pub fn states_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.total_states() as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

impl fmt::Display for SearchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for turn in &self.turns {
            writeln!(f, "{turn}")?;
        }
        write!(
            f,
            "{} states in {:.3}s",
            self.total_states(),
            self.time_us as f64 / 1_000_000.0
        )
    }
}
