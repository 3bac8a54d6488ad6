//! Per-turn state sets with dedup by canonical id.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::core::{Action, GameOver, GameState, Outcome};

use super::stats::TurnStats;

/// Every state one turn of the search has reached.
///
/// `intermediate` holds each distinct state once, keyed by [`GameState::id`].
/// States that still have actions to try also wait in the active queue,
/// together with those actions. Finished games go to the win or loss set.
#[derive(Clone, Debug)]
pub struct StateTracker {
    intermediate: FxHashMap<String, GameState>,
    active: VecDeque<(GameState, Vec<Action>)>,
    wins: FxHashMap<String, GameState>,
    losses: FxHashMap<String, GameState>,
    activated: usize,
    traverse_counter: usize,
    limit: usize,
    truncated: bool,
}

impl StateTracker {
    /// An empty tracker holding at most `limit` distinct states.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            intermediate: FxHashMap::default(),
            active: VecDeque::new(),
            wins: FxHashMap::default(),
            losses: FxHashMap::default(),
            activated: 0,
            traverse_counter: 0,
            limit,
            truncated: false,
        }
    }

    /// Track `state` unless an equivalent one is already tracked.
    ///
    /// `actions` is only asked for new states; if it returns anything the
    /// state is queued as active. Returns whether the state was new.
    pub fn add_state(&mut self, state: GameState, actions: impl FnOnce(&GameState) -> Vec<Action>) -> bool {
        self.traverse_counter += 1;
        let id = state.id();
        if self.intermediate.contains_key(&id) {
            return false;
        }
        if self.intermediate.len() >= self.limit {
            self.truncated = true;
            return false;
        }

        let actions = actions(&state);
        if !actions.is_empty() {
            self.activated += 1;
            self.active.push_back((state.clone(), actions));
        }
        self.intermediate.insert(id, state);
        true
    }

    /// File a finished game under its outcome. Returns whether it was new.
    pub fn add_terminal(&mut self, over: GameOver) -> bool {
        self.traverse_counter += 1;
        let state = *over.state;
        let set = match over.outcome {
            Outcome::Win => &mut self.wins,
            Outcome::Loss => &mut self.losses,
        };
        let id = state.id();
        if set.contains_key(&id) {
            return false;
        }
        set.insert(id, state);
        true
    }

    /// Next active state to expand, oldest first.
    pub fn pop_active(&mut self) -> Option<(GameState, Vec<Action>)> {
        self.active.pop_front()
    }

    /// Check if any active state is still waiting.
    #[must_use]
    pub fn has_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Number of distinct states tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.intermediate.len()
    }

    /// Check if no state is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intermediate.is_empty()
    }

    /// Check if a state with this id is tracked.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.intermediate.contains_key(id)
    }

    /// Insertions so far, duplicates included.
    #[must_use]
    pub fn traverse_counter(&self) -> usize {
        self.traverse_counter
    }

    /// Mark the turn as cut short by a budget.
    pub fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    /// Check if a budget cut the turn short.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Every distinct state reached.
    pub fn states(&self) -> impl Iterator<Item = &GameState> {
        self.intermediate.values()
    }

    /// Reached states with nothing on the stack or the super-stack, in id
    /// order so the next turn is filled deterministically.
    #[must_use]
    pub fn stable_states(&self) -> Vec<&GameState> {
        let mut stable: Vec<(&String, &GameState)> =
            self.intermediate.iter().filter(|(_, s)| s.is_stable()).collect();
        stable.sort_unstable_by(|a, b| a.0.cmp(b.0));
        stable.into_iter().map(|(_, s)| s).collect()
    }

    /// Distinct winning end states.
    pub fn wins(&self) -> impl Iterator<Item = &GameState> {
        self.wins.values()
    }

    /// Distinct losing end states.
    pub fn losses(&self) -> impl Iterator<Item = &GameState> {
        self.losses.values()
    }

    /// Summary for `turn`.
    #[must_use]
    pub fn stats(&self, turn: u32) -> TurnStats {
        TurnStats {
            turn,
            intermediate: self.intermediate.len(),
            active: self.activated,
            wins: self.wins.len(),
            losses: self.losses.len(),
            traversed: self.traverse_counter,
            truncated: self.truncated,
        }
    }
}
