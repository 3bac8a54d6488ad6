//! Turn-boundary steps: untap, upkeep, draw.
//!
//! Each step mutates a state in place and has one outcome. Triggers it sets
//! off wait on the super-stack; [`beginning_phase`] drains them after every
//! step, so its results are stable states of the next turn.

use tracing::debug;

use crate::abilities::timed::queue_upkeep_abilities;
use crate::cards::INVISIBLE_PREFIX;
use crate::core::{GameOver, GameState};
use crate::query::{Chooser, Subject};
use crate::stack::{clear_super_stack, Resolved};
use crate::verbs::Verb;
use crate::zones::ZoneKind;

/// Start the next turn: advance the turn counter and active player, reset
/// per-turn flags and pools, strip bookkeeping counters, and untap the new
/// active player's permanents.
pub fn untap(state: &mut GameState) -> Result<(), GameOver> {
    state.turn += 1;
    state.active_player = state.active_player.next(state.player_count());
    let active = state.active_player;
    debug!(turn = state.turn, player = %active, "untap");

    for player in state.player_ids().collect::<Vec<_>>() {
        let data = state.player_mut(player);
        data.pool.clear();
        data.land_played = false;
        data.spells_cast = 0;
    }

    let marked: Vec<_> = state
        .card_refs()
        .filter(|&c| state.card(c).counters().iter().any(|k| k.starts_with(INVISIBLE_PREFIX)))
        .collect();
    for card in marked {
        state.card_mut(card).strip_invisible();
    }

    let permanents: Vec<_> = state.zone(active, ZoneKind::Field).collect();
    for card in permanents {
        if state.card(card).summon_sick {
            state.card_mut(card).summon_sick = false;
        }
        if state.card(card).tapped {
            Verb::Untap.execute(state, &Subject::card(active, card), &[])?;
        }
    }
    state.record(active, |s| format!("turn {}", s.turn));
    Ok(())
}

/// Queue the active player's upkeep abilities.
pub fn upkeep(state: &mut GameState) {
    queue_upkeep_abilities(state);
}

/// The active player draws a card.
pub fn draw(state: &mut GameState) -> Result<(), GameOver> {
    let active = state.active_player;
    Verb::DrawCard.execute(state, &Subject::player(active), &[])?;
    Ok(())
}

/// Untap, upkeep and draw, clearing the super-stack after each step.
#[must_use]
pub fn beginning_phase(state: &GameState, chooser: &dyn Chooser) -> Vec<Resolved> {
    let mut next = state.clone();
    if let Err(over) = untap(&mut next) {
        return vec![Err(over)];
    }

    let untapped = clear_super_stack(next, chooser);
    let upkept = then_step(untapped, chooser, |s| {
        upkeep(s);
        Ok(())
    });
    then_step(upkept, chooser, draw)
}

/// Run `step` on every ongoing result, then clear the super-stack.
fn then_step(
    results: Vec<Resolved>,
    chooser: &dyn Chooser,
    step: impl Fn(&mut GameState) -> Result<(), GameOver>,
) -> Vec<Resolved> {
    results
        .into_iter()
        .flat_map(|result| match result {
            Ok(mut state) => match step(&mut state) {
                Ok(()) => clear_super_stack(state, chooser),
                Err(over) => vec![Err(over)],
            },
            Err(over) => vec![Err(over)],
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::cards::{catalog, ACTIVATED_MARKER};
    use crate::core::{Outcome, PlayerId};
    use crate::query::EnumerateAll;

    fn p0() -> PlayerId {
        PlayerId::new(0)
    }

    #[test]
    fn test_untap_resets_turn() {
        let mut state = GameState::new(1, 20);
        let wall = state.create_card(Arc::new(catalog::wall_of_roots()), p0(), ZoneKind::Field);
        state.card_mut(wall).add_counter("-0/-1");
        state.card_mut(wall).add_counter(ACTIVATED_MARKER);
        state.card_mut(wall).tapped = true;
        state.player_mut(p0()).land_played = true;
        state.player_mut(p0()).spells_cast = 2;
        state.player_mut(p0()).pool = "GG".parse().unwrap();

        untap(&mut state).unwrap();

        assert_eq!(state.turn, 2);
        let cardboard = state.card(wall);
        assert!(!cardboard.tapped);
        assert!(!cardboard.summon_sick);
        assert_eq!(cardboard.counters(), &["-0/-1".to_string()]);
        let player = state.player(p0());
        assert!(!player.land_played);
        assert_eq!(player.spells_cast, 0);
        assert!(player.pool.is_empty());
    }

    #[test]
    fn test_untap_passes_turn() {
        let mut state = GameState::new(2, 20);
        untap(&mut state).unwrap();
        assert_eq!(state.active_player, PlayerId::new(1));
        untap(&mut state).unwrap();
        assert_eq!(state.active_player, p0());
    }

    #[test]
    fn test_beginning_phase_draws() {
        let mut state = GameState::new(1, 20);
        state.create_card(Arc::new(catalog::forest()), p0(), ZoneKind::Deck);

        let out = beginning_phase(&state, &EnumerateAll);
        assert_eq!(out.len(), 1);
        let next = out[0].as_ref().unwrap();
        assert_eq!(next.turn, 2);
        assert_eq!(next.zone_size(p0(), ZoneKind::Hand), 1);
        assert!(next.is_stable());
    }

    #[test]
    fn test_empty_deck_loses() {
        let state = GameState::new(1, 20);
        let out = beginning_phase(&state, &EnumerateAll);

        assert_eq!(out.len(), 1);
        let over = out.into_iter().next().unwrap().unwrap_err();
        assert_eq!(over.outcome, Outcome::Loss);
        assert_eq!(over.turn, 2);
    }

    #[test]
    fn test_upkeep_ability_goes_on_stack() {
        let mut state = GameState::new(1, 20);
        state.create_card(Arc::new(catalog::phyrexian_arena()), p0(), ZoneKind::Field);
        for _ in 0..3 {
            state.create_card(Arc::new(catalog::forest()), p0(), ZoneKind::Deck);
        }

        let out = beginning_phase(&state, &EnumerateAll);
        assert_eq!(out.len(), 1);
        let next = out[0].as_ref().unwrap();
        // The arena trigger waits on the stack; the draw step already happened.
        assert_eq!(next.stack.len(), 1);
        assert_eq!(next.zone_size(p0(), ZoneKind::Hand), 1);
    }
}
