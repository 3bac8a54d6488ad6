//! Legal actions and how they change the state.
//!
//! The active player may, from a state with an empty super-stack:
//! - play a land (empty stack, one per turn);
//! - cast a spell (sorcery speed needs an empty stack, instants do not);
//! - activate an ability of a permanent (any time);
//! - let the top of the stack resolve.
//!
//! Enumeration asks the [`Chooser`] for payment plans and effect options, so
//! every returned [`Action`] is fully decided. Applying an action returns
//! every outcome, with the super-stack already cleared.

use tracing::{debug, trace};

use crate::cards::CardType;
use crate::core::{Action, CardRef, GameState};
use crate::query::{Choice, ChoiceList, Chooser, Subject};
use crate::stack::{clear_super_stack, resolve_top_of_stack, Resolved, StackObject};
use crate::verbs::{Branch, Verb};
use crate::zones::ZoneKind;

// =============================================================================
// Enumeration
// =============================================================================

/// Lands and spells the active player can put into play from hand.
#[must_use]
pub fn get_valid_castables(state: &GameState, chooser: &dyn Chooser) -> Vec<Action> {
    if !state.super_stack.is_empty() {
        return Vec::new();
    }
    let player = state.active_player;
    let mut actions = Vec::new();

    for card in state.zone(player, ZoneKind::Hand) {
        let rules = &state.card(card).rules;

        if rules.is_type(CardType::Land) {
            if !state.player(player).land_played && state.stack.is_empty() {
                actions.push(Action::PlayLand { card });
            }
            continue;
        }
        if !rules.is_instant_speed() && !state.stack.is_empty() {
            continue;
        }

        let subject = Subject::card(player, card);
        let plans = rules.cost.get_payment_plans(state, &subject, chooser);
        if plans.is_empty() {
            continue;
        }
        let effects = rules.effect.populate_options(state, &subject, chooser);
        for cost in &plans {
            for effect in &effects {
                actions.push(Action::Cast {
                    card,
                    cost: cost.clone(),
                    effect: effect.clone(),
                });
            }
        }
    }
    actions
}

/// Abilities of the active player's permanents that can be activated now.
#[must_use]
pub fn get_valid_activations(state: &GameState, chooser: &dyn Chooser) -> Vec<Action> {
    if !state.super_stack.is_empty() {
        return Vec::new();
    }
    let player = state.active_player;
    let mut actions = Vec::new();

    for source in state.zone(player, ZoneKind::Field) {
        for (index, ability) in state.card(source).rules.activated.iter().enumerate() {
            for (cost, effect) in ability.activation_options(state, source, chooser) {
                actions.push(Action::Activate {
                    source,
                    ability: index,
                    cost,
                    effect,
                });
            }
        }
    }
    actions
}

/// Everything the active player can do: castables, activations, and
/// resolving the top of a non-empty stack.
#[must_use]
pub fn legal_actions(state: &GameState, chooser: &dyn Chooser) -> Vec<Action> {
    let mut actions = get_valid_castables(state, chooser);
    actions.extend(get_valid_activations(state, chooser));
    if !state.stack.is_empty() && state.super_stack.is_empty() {
        actions.push(Action::ResolveTop);
    }
    actions
}

// =============================================================================
// Application
// =============================================================================

/// Take an action. One result per outcome; none if it turned out illegal.
#[must_use]
pub fn apply_action(state: &GameState, action: &Action, chooser: &dyn Chooser) -> Vec<Resolved> {
    trace!(action = %action.describe(state), "applying");
    match action {
        Action::PlayLand { card } => play_land(state, *card, chooser),
        Action::Cast { card, cost, effect } => cast(state, *card, cost, effect, chooser),
        Action::Activate {
            source,
            ability,
            cost,
            effect,
        } => activate(state, *source, *ability, cost, effect, chooser),
        Action::ResolveTop => resolve_top_of_stack(state, chooser),
    }
}

fn play_land(state: &GameState, card: CardRef, chooser: &dyn Chooser) -> Vec<Resolved> {
    let player = state.active_player;
    let mut next = state.clone();
    next.record(player, |s| format!("play {}", s.card(card).name()));

    let enter = Verb::MoveTo {
        from: Some(ZoneKind::Hand),
        to: ZoneKind::Field,
    };
    match enter.execute(&mut next, &Subject::card(player, card), &[]) {
        Ok(Some(_)) => {}
        Ok(None) => return Vec::new(),
        Err(over) => return vec![Err(over)],
    }
    next.player_mut(player).land_played = true;
    clear_super_stack(next, chooser)
}

fn cast(state: &GameState, card: CardRef, cost: &[Choice], effect: &ChoiceList, chooser: &dyn Chooser) -> Vec<Resolved> {
    let player = state.active_player;
    let subject = Subject::card(player, card);
    let rules = state.card(card).rules.clone();

    let mut out = Vec::new();
    for paid in rules.cost.pay_cost(state, &subject, cost) {
        let mut next = match paid {
            Ok(step) => step.state,
            Err(over) => {
                out.push(Err(over));
                continue;
            }
        };
        next.record(player, |s| format!("cast {}", s.card(card).name()));

        let to_stack = Verb::MoveTo {
            from: Some(ZoneKind::Hand),
            to: ZoneKind::Stack,
        };
        match to_stack.execute(&mut next, &subject, &[]) {
            Ok(Some(_)) => {}
            Ok(None) => continue,
            Err(over) => {
                out.push(Err(over));
                continue;
            }
        }
        next.player_mut(player).spells_cast += 1;
        next.stack.push_back(StackObject::spell(player, card, effect.clone()));
        out.extend(clear_super_stack(next, chooser));
    }
    out
}

fn activate(
    state: &GameState,
    source: CardRef,
    index: usize,
    cost: &[Choice],
    effect: &ChoiceList,
    chooser: &dyn Chooser,
) -> Vec<Resolved> {
    let player = state.active_player;
    let subject = Subject::card(player, source);
    let ability = state
        .card(source)
        .rules
        .activated
        .get(index)
        .cloned()
        .unwrap_or_else(|| panic!("no activated ability #{index} on {}", state.card(source).name()));

    let mut out = Vec::new();
    for paid in ability.cost.pay_cost(state, &subject, cost) {
        let mut next = match paid {
            Ok(step) => step.state,
            Err(over) => {
                out.push(Err(over));
                continue;
            }
        };
        next.record(player, |_| format!("activate {}", ability.name));

        if ability.is_mana_ability() {
            let branches: Vec<Branch> = ability.effect.do_it(&next, &subject, effect);
            for branch in branches {
                match branch {
                    Ok(step) => out.extend(clear_super_stack(step.state, chooser)),
                    Err(over) => out.push(Err(over)),
                }
            }
        } else {
            next.stack
                .push_back(StackObject::ability(player, source, ability.clone(), effect.clone()));
            out.extend(clear_super_stack(next, chooser));
        }
    }
    debug!(ability = %ability.name, outcomes = out.len(), "activated");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::cards::catalog;
    use crate::core::PlayerId;
    use crate::mana::{Color, ManaPool};
    use crate::query::EnumerateAll;

    fn p0() -> PlayerId {
        PlayerId::new(0)
    }

    fn only(results: Vec<Resolved>) -> GameState {
        assert_eq!(results.len(), 1);
        results.into_iter().next().unwrap().unwrap()
    }

    #[test]
    fn test_one_land_per_turn() {
        let mut state = GameState::new(1, 20);
        let forest = state.create_card(Arc::new(catalog::forest()), p0(), ZoneKind::Hand);
        state.create_card(Arc::new(catalog::swamp()), p0(), ZoneKind::Hand);

        let actions = get_valid_castables(&state, &EnumerateAll);
        assert_eq!(actions.len(), 2);

        let after = only(apply_action(&state, &Action::PlayLand { card: forest }, &EnumerateAll));
        assert!(after.player(p0()).land_played);
        assert_eq!(after.card(forest).zone, ZoneKind::Field);
        assert!(get_valid_castables(&after, &EnumerateAll).is_empty());
    }

    #[test]
    fn test_sorcery_speed_needs_empty_stack() {
        let mut state = GameState::new(1, 20);
        state.create_card(Arc::new(catalog::llanowar_elves()), p0(), ZoneKind::Hand);
        state.create_card(Arc::new(catalog::dark_ritual()), p0(), ZoneKind::Hand);
        state.player_mut(p0()).pool = "BG".parse().unwrap();

        assert_eq!(get_valid_castables(&state, &EnumerateAll).len(), 2);

        let on_stack = state.create_card(Arc::new(catalog::healing_salve()), p0(), ZoneKind::Stack);
        state.stack.push_back(StackObject::spell(p0(), on_stack, ChoiceList::new()));
        let actions = get_valid_castables(&state, &EnumerateAll);
        assert_eq!(actions.len(), 1);
        assert!(actions[0].describe(&state).starts_with("cast Dark Ritual"));
    }

    #[test]
    fn test_cast_counts_storm() {
        let mut state = GameState::new(1, 20);
        let ritual = state.create_card(Arc::new(catalog::dark_ritual()), p0(), ZoneKind::Hand);
        state.player_mut(p0()).pool = ManaPool::of(Color::B, 1);

        let action = get_valid_castables(&state, &EnumerateAll).remove(0);
        let after = only(apply_action(&state, &action, &EnumerateAll));
        assert_eq!(after.player(p0()).spells_cast, 1);
        assert_eq!(after.card(ritual).zone, ZoneKind::Stack);
        assert!(after.player(p0()).pool.is_empty());

        let resolved = only(apply_action(&after, &Action::ResolveTop, &EnumerateAll));
        assert_eq!(resolved.player(p0()).pool.to_string(), "BBB");
    }

    #[test]
    fn test_mana_ability_skips_stack() {
        let mut state = GameState::new(1, 20);
        let forest = state.create_card(Arc::new(catalog::forest()), p0(), ZoneKind::Field);

        let actions = get_valid_activations(&state, &EnumerateAll);
        assert_eq!(actions.len(), 1);
        let after = only(apply_action(&state, &actions[0], &EnumerateAll));

        assert!(after.stack.is_empty());
        assert!(after.card(forest).tapped);
        assert_eq!(after.player(p0()).pool.to_string(), "G");
    }

    #[test]
    fn test_any_color_branches() {
        let mut state = GameState::new(1, 20);
        state.create_card(Arc::new(catalog::lotus_petal()), p0(), ZoneKind::Field);

        let actions = get_valid_activations(&state, &EnumerateAll);
        assert_eq!(actions.len(), 5);

        let after = only(apply_action(&state, &actions[0], &EnumerateAll));
        assert_eq!(after.zone_size(p0(), ZoneKind::Field), 0);
        assert_eq!(after.zone_size(p0(), ZoneKind::Grave), 1);
        assert_eq!(after.player(p0()).pool.total(), 1);
    }

    #[test]
    fn test_history_records_actions() {
        let mut state = GameState::new(1, 20);
        state.set_track_history(true);
        let forest = state.create_card(Arc::new(catalog::forest()), p0(), ZoneKind::Hand);

        let after = only(apply_action(&state, &Action::PlayLand { card: forest }, &EnumerateAll));
        assert_eq!(after.history().len(), 1);
        assert_eq!(after.history()[0].description, "play Forest");
        // Not part of the identity.
        let mut quiet = after.clone();
        quiet.set_track_history(false);
        assert_eq!(quiet.id(), after.id());
    }

    #[test]
    fn test_resolve_top_is_offered() {
        let mut state = GameState::new(1, 20);
        let ritual = state.create_card(Arc::new(catalog::dark_ritual()), p0(), ZoneKind::Stack);
        assert!(!legal_actions(&state, &EnumerateAll).contains(&Action::ResolveTop));

        state.stack.push_back(StackObject::spell(p0(), ritual, ChoiceList::new()));
        assert!(legal_actions(&state, &EnumerateAll).contains(&Action::ResolveTop));
    }
}
