//! Breadth-first play tree.

use std::time::Instant;

use tracing::{debug, warn};

use crate::core::GameState;
use crate::query::{Chooser, EnumerateAll};
use crate::rules;

use super::config::SearchConfig;
use super::stats::SearchStats;
use super::tracker::StateTracker;

/// Every state reachable from a start state, turn by turn.
///
/// Turn `t` is explored by expanding its active states until none are left
/// (the main phase), then running the beginning phase on each of its stable
/// states to seed turn `t + 1`. Trackers dedup by canonical id, so a state
/// reached along several lines of play is expanded once.
pub struct PlayTree {
    config: SearchConfig,
    chooser: Box<dyn Chooser>,
    first_turn: u32,
    trackers: Vec<StateTracker>,
    explored: bool,
    stats: SearchStats,
}

impl PlayTree {
    /// A tree rooted at `start`, branching on every choice.
    #[must_use]
    pub fn new(start: GameState, config: SearchConfig) -> Self {
        let mut tree = Self {
            first_turn: start.turn,
            trackers: vec![StateTracker::new(config.max_states_per_turn)],
            config,
            chooser: Box::new(EnumerateAll),
            explored: false,
            stats: SearchStats::default(),
        };
        let chooser = tree.chooser.as_ref();
        tree.trackers[0].add_state(start, |s| rules::legal_actions(s, chooser));
        tree
    }

    /// Use another decision strategy. Must be set before [`run`](Self::run).
    #[must_use]
    pub fn with_chooser(mut self, chooser: Box<dyn Chooser>) -> Self {
        self.chooser = chooser;
        let start: Vec<GameState> = self.trackers[0].states().cloned().collect();
        self.trackers = vec![StateTracker::new(self.config.max_states_per_turn)];
        let chooser = self.chooser.as_ref();
        for state in start {
            self.trackers[0].add_state(state, |s| rules::legal_actions(s, chooser));
        }
        self
    }

    /// Explore every turn up to the turn limit. Calling it again is a no-op.
    pub fn run(&mut self) -> &SearchStats {
        if self.explored {
            return &self.stats;
        }
        let started = Instant::now();
        let last = self.config.turn_limit.max(self.first_turn);

        for turn in self.first_turn..=last {
            self.main_phase(turn);
            if turn < last {
                self.beginning_phase(turn);
            }
        }

        self.explored = true;
        self.stats = SearchStats {
            turns: (self.first_turn..=last)
                .filter_map(|turn| self.tracker(turn).map(|t| t.stats(turn)))
                .collect(),
            time_us: started.elapsed().as_micros() as u64,
        };
        debug!(
            states = self.stats.total_states(),
            time_us = self.stats.time_us,
            "search finished"
        );
        &self.stats
    }

    /// Expand every active state of `turn` until none are left.
    pub fn main_phase(&mut self, turn: u32) {
        let index = self.index(turn);
        let budget = self.config.max_traversals_per_turn;
        let chooser = self.chooser.as_ref();
        let tracker = &mut self.trackers[index];

        while let Some((state, actions)) = tracker.pop_active() {
            for action in &actions {
                for result in rules::apply_action(&state, action, chooser) {
                    match result {
                        Ok(next) => {
                            tracker.add_state(next, |s| rules::legal_actions(s, chooser));
                        }
                        Err(over) => {
                            tracker.add_terminal(over);
                        }
                    }
                }
            }
            if tracker.traverse_counter() >= budget && tracker.has_active() {
                tracker.mark_truncated();
                break;
            }
        }

        if tracker.is_truncated() {
            warn!(turn, states = tracker.len(), "search budget reached, turn truncated");
        }
        debug!(turn, states = tracker.len(), traversed = tracker.traverse_counter(), "main phase");
    }

    /// Start turn `turn + 1` from every stable state of `turn`.
    pub fn beginning_phase(&mut self, turn: u32) {
        let from = self.index(turn);
        let to = self.index(turn + 1);
        let chooser = self.chooser.as_ref();

        let stable: Vec<GameState> = self.trackers[from].stable_states().into_iter().cloned().collect();
        let tracker = &mut self.trackers[to];
        for state in &stable {
            for result in rules::beginning_phase(state, chooser) {
                match result {
                    Ok(next) => {
                        tracker.add_state(next, |s| rules::legal_actions(s, chooser));
                    }
                    Err(over) => {
                        tracker.add_terminal(over);
                    }
                }
            }
        }
        debug!(turn = turn + 1, seeds = stable.len(), states = tracker.len(), "beginning phase");
    }

    /// Tracker index for `turn`, allocating trackers up to it.
    fn index(&mut self, turn: u32) -> usize {
        assert!(turn >= self.first_turn, "turn {turn} is before the start of the search");
        let index = (turn - self.first_turn) as usize;
        while self.trackers.len() <= index {
            self.trackers.push(StateTracker::new(self.config.max_states_per_turn));
        }
        index
    }

    // === Queries ===

    /// The tracker for `turn`, if the search got there.
    #[must_use]
    pub fn tracker(&self, turn: u32) -> Option<&StateTracker> {
        let index = turn.checked_sub(self.first_turn)? as usize;
        self.trackers.get(index)
    }

    /// Every distinct state reached on `turn`.
    pub fn states_at(&self, turn: u32) -> impl Iterator<Item = &GameState> {
        self.tracker(turn).into_iter().flat_map(|t| t.states())
    }

    /// Most mana the active player had floating in any state of `turn`.
    #[must_use]
    pub fn max_mana(&self, turn: u32) -> Option<u32> {
        self.states_at(turn)
            .map(|s| s.player(s.active_player).pool.total())
            .max()
    }

    /// Check if some line of play floats at least `amount` mana on or
    /// before `turn`.
    #[must_use]
    pub fn can_reach_mana(&self, amount: u32, turn: u32) -> bool {
        (self.first_turn..=turn).any(|t| self.max_mana(t).is_some_and(|m| m >= amount))
    }

    /// Check if some line of play wins on or before `turn`.
    #[must_use]
    pub fn can_win_by(&self, turn: u32) -> bool {
        (self.first_turn..=turn).any(|t| self.tracker(t).is_some_and(|tr| tr.wins().next().is_some()))
    }

    /// Statistics from the last [`run`](Self::run).
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// The search budget.
    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl std::fmt::Debug for PlayTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayTree")
            .field("config", &self.config)
            .field("first_turn", &self.first_turn)
            .field("turns", &self.trackers.len())
            .field("explored", &self.explored)
            .finish_non_exhaustive()
    }
}
