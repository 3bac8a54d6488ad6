//! The resolution protocol.
//!
//! ```text
//! super-stack items -> clear_super_stack -> stack items -> resolve_top_of_stack -> ... -> stable
//! ```
//!
//! Both entry points take a state by value or reference and return every
//! outcome as a [`Resolved`]: the next state, or the end of the game.
//! Nothing resolves while the super-stack holds anything.

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::cards::CardType;
use crate::core::{CardRef, GameOver, GameState};
use crate::query::getter::toughness;
use crate::query::{choose_exactly_one, Chooser, Subject};
use crate::verbs::{Branch, Step, Verb};
use crate::zones::ZoneKind;

/// One outcome of resolving: a state, or a finished game.
pub type Resolved = Result<GameState, GameOver>;

// =============================================================================
// State-based actions
// =============================================================================

/// Put creatures with toughness 0 or less into the graveyard and end the game
/// for a player at 0 life or less. Repeats until nothing changes.
pub fn state_based_actions(mut state: GameState) -> Resolved {
    loop {
        if let Some(loser) = state.player_ids().find(|&p| state.player(p).life <= 0) {
            debug!(player = %loser, "life total reached zero");
            return Err(GameOver::loss(state, loser));
        }

        let dying: Vec<CardRef> = state
            .player_ids()
            .flat_map(|p| state.zone(p, ZoneKind::Field).collect::<Vec<_>>())
            .filter(|&c| state.card(c).rules.is_type(CardType::Creature) && toughness(&state, c) <= 0)
            .collect();
        if dying.is_empty() {
            return Ok(state);
        }

        for card in dying {
            trace!(card = %state.card(card).name(), "dies");
            let subject = Subject::of(&state, card);
            Verb::sacrifice().execute(&mut state, &subject, &[])?;
        }
    }
}

// =============================================================================
// Super-stack
// =============================================================================

/// Empty the super-stack, branching over the order items are taken in.
///
/// State-based actions run before each pick. An as-enters item runs on the
/// spot; any other item moves to the stack with its effect choices filled in,
/// one branch per option. Items with no legal options are dropped. Outcomes
/// are deduplicated by canonical id.
#[must_use]
pub fn clear_super_stack(state: GameState, chooser: &dyn Chooser) -> Vec<Resolved> {
    let mut out = Vec::new();
    let mut seen = FxHashSet::default();
    clear_into(state, chooser, &mut out, &mut seen);
    out
}

fn clear_into(state: GameState, chooser: &dyn Chooser, out: &mut Vec<Resolved>, seen: &mut FxHashSet<String>) {
    let state = match state_based_actions(state) {
        Ok(state) => state,
        Err(over) => {
            push_unique(Err(over), out, seen);
            return;
        }
    };

    if state.super_stack.is_empty() {
        push_unique(Ok(state), out, seen);
        return;
    }

    let indices: Vec<usize> = (0..state.super_stack.len()).collect();
    for index in choose_exactly_one(chooser, &indices) {
        let mut next = state.clone();
        let object = next.super_stack.remove(index);
        let subject = object.subject();
        let effect = object.effect(&next).clone();
        let options = effect.populate_options(&next, &subject, chooser);

        if object.is_as_enters() {
            trace!(item = %object.name(&next), "as-enters item runs");
            let branches: Vec<Branch> = options
                .iter()
                .flat_map(|choices| effect.do_it(&next, &subject, choices))
                .collect();
            if branches.is_empty() {
                clear_into(next, chooser, out, seen);
            }
            for branch in branches {
                match branch {
                    Ok(Step { state, .. }) => clear_into(state, chooser, out, seen),
                    Err(over) => push_unique(Err(over), out, seen),
                }
            }
            continue;
        }

        if options.is_empty() {
            trace!(item = %object.name(&next), "no legal options, removed");
            clear_into(next, chooser, out, seen);
            continue;
        }
        for choices in options {
            let mut placed = next.clone();
            placed.stack.push_back(object.with_effect_choices(&choices));
            clear_into(placed, chooser, out, seen);
        }
    }
}

fn push_unique(result: Resolved, out: &mut Vec<Resolved>, seen: &mut FxHashSet<String>) {
    let key = match &result {
        Ok(state) => state.id(),
        Err(over) => format!("{}:{}", over.outcome, over.state.id()),
    };
    if seen.insert(key) {
        out.push(result);
    }
}

// =============================================================================
// Stack
// =============================================================================

/// Resolve the top of the stack.
///
/// Runs the object's effect with its stored choices. A spell then moves to
/// its card's destination, even when its effect could not be done. Every
/// outcome goes through [`clear_super_stack`]. An empty stack gives no
/// outcomes.
///
/// Panics if the super-stack is not empty.
#[must_use]
pub fn resolve_top_of_stack(state: &GameState, chooser: &dyn Chooser) -> Vec<Resolved> {
    assert!(
        state.super_stack.is_empty(),
        "cannot resolve while the super-stack holds items"
    );
    let mut next = state.clone();
    let Some(object) = next.stack.pop_back() else {
        return Vec::new();
    };
    next.record(object.controller, |s| format!("resolve {}", object.name(s)));
    debug!(item = %object.name(&next), "resolving");

    let subject = object.subject();
    let effect = object.effect(&next).clone();
    let mut branches = effect.do_it(&next, &subject, object.effect_choices());
    if branches.is_empty() {
        debug!(item = %object.name(&next), "fizzled");
        branches.push(Ok(Step {
            state: next,
            subject,
            rest: Default::default(),
        }));
    }

    let mut out = Vec::new();
    for branch in branches {
        let mut resolved = match branch {
            Ok(step) => step.state,
            Err(over) => {
                out.push(Err(over));
                continue;
            }
        };
        if let (true, Some(card)) = (object.is_spell(), object.card) {
            let destination = resolved.card(card).rules.destination;
            let leave = Verb::MoveTo {
                from: Some(ZoneKind::Stack),
                to: destination,
            };
            let owner = Subject::of(&resolved, card);
            if let Err(over) = leave.execute(&mut resolved, &owner, &[]) {
                out.push(Err(over));
                continue;
            }
        }
        out.extend(clear_super_stack(resolved, chooser));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::cards::catalog;
    use crate::core::{Outcome, PlayerId};
    use crate::query::{ChoiceList, EnumerateAll};
    use crate::stack::StackObject;

    fn p0() -> PlayerId {
        PlayerId::new(0)
    }

    #[test]
    fn test_empty_stack_is_noop() {
        let state = GameState::new(1, 20);
        assert!(resolve_top_of_stack(&state, &EnumerateAll).is_empty());
    }

    #[test]
    fn test_clear_empty_super_stack() {
        let state = GameState::new(1, 20);
        let out = clear_super_stack(state.clone(), &EnumerateAll);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].as_ref().unwrap(), &state);
    }

    #[test]
    fn test_zero_toughness_dies() {
        let mut state = GameState::new(1, 20);
        let wall = state.create_card(Arc::new(catalog::wall_of_roots()), p0(), ZoneKind::Field);
        for _ in 0..5 {
            state.card_mut(wall).add_counter("-0/-1");
        }

        let state = state_based_actions(state).unwrap();
        assert_eq!(state.card(wall).zone, ZoneKind::Grave);
        assert_eq!(state.card(wall).counters().len(), 0);
    }

    #[test]
    fn test_zero_life_loses() {
        let mut state = GameState::new(1, 20);
        state.player_mut(p0()).life = 0;

        let out = clear_super_stack(state, &EnumerateAll);
        assert_eq!(out.len(), 1);
        let over = out.into_iter().next().unwrap().unwrap_err();
        assert_eq!(over.outcome, Outcome::Loss);
    }

    #[test]
    fn test_spell_resolves_to_destination() {
        let mut state = GameState::new(1, 20);
        let ritual = state.create_card(Arc::new(catalog::dark_ritual()), p0(), ZoneKind::Stack);
        state.stack.push_back(StackObject::spell(p0(), ritual, ChoiceList::new()));

        let out = resolve_top_of_stack(&state, &EnumerateAll);
        assert_eq!(out.len(), 1);
        let after = out[0].as_ref().unwrap();
        assert_eq!(after.player(p0()).pool.to_string(), "BBB");
        assert_eq!(after.card(ritual).zone, ZoneKind::Grave);
        assert!(after.is_stable());
    }

    #[test]
    #[should_panic(expected = "super-stack")]
    fn test_resolve_requires_empty_super_stack() {
        let mut state = GameState::new(1, 20);
        let visionary = state.create_card(Arc::new(catalog::elvish_visionary()), p0(), ZoneKind::Hand);
        Verb::move_to(ZoneKind::Field)
            .execute(&mut state, &Subject::card(p0(), visionary), &[])
            .unwrap();
        let _ = resolve_top_of_stack(&state, &EnumerateAll);
    }
}
