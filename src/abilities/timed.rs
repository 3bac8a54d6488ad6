//! Timed abilities: "at the beginning of your upkeep".

use tracing::trace;

use crate::core::{CardRef, GameState};
use crate::query::{CardPattern, Subject};
use crate::stack::StackObject;
use crate::verbs::Verb;
use crate::zones::ZoneKind;

/// An effect queued at its controller's upkeep while `condition` holds for
/// the source card.
#[derive(Clone, Debug, PartialEq)]
pub struct TimedAbility {
    pub name: String,
    pub condition: CardPattern,
    pub effect: Verb,
}

impl TimedAbility {
    /// Fires every upkeep.
    #[must_use]
    pub fn new(name: impl Into<String>, effect: Verb) -> Self {
        Self {
            name: name.into(),
            condition: CardPattern::Any,
            effect,
        }
    }

    /// Only fire while `condition` holds for the source.
    #[must_use]
    pub fn with_condition(mut self, condition: CardPattern) -> Self {
        self.condition = condition;
        self
    }

    /// Check the condition for `source`.
    #[must_use]
    pub fn holds(&self, state: &GameState, source: CardRef) -> bool {
        self.condition.matches(source, state, &Subject::of(state, source))
    }
}

/// Queue the upkeep abilities of the active player's permanents.
pub fn queue_upkeep_abilities(state: &mut GameState) {
    let active = state.active_player;
    let mut due = Vec::new();
    for card in state.zone(active, ZoneKind::Field) {
        for ability in &state.card(card).rules.timed {
            if ability.holds(state, card) {
                due.push(StackObject::timed(active, card, ability.clone()));
            }
        }
    }

    for object in due {
        trace!(ability = %object.name(state), "upkeep ability queued");
        state.super_stack.push_back(object);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::cards::catalog;
    use crate::core::PlayerId;

    #[test]
    fn test_upkeep_queues_active_player_only() {
        let mut state = GameState::new(2, 20);
        state.create_card(Arc::new(catalog::phyrexian_arena()), PlayerId::new(0), ZoneKind::Field);
        state.create_card(Arc::new(catalog::phyrexian_arena()), PlayerId::new(1), ZoneKind::Field);

        queue_upkeep_abilities(&mut state);
        assert_eq!(state.super_stack.len(), 1);
        assert_eq!(state.super_stack[0].controller, PlayerId::new(0));
    }

    #[test]
    fn test_condition_gates() {
        let mut state = GameState::new(1, 20);
        let arena = state.create_card(Arc::new(catalog::phyrexian_arena()), PlayerId::new(0), ZoneKind::Field);

        let tapped_only = TimedAbility::new("x", Verb::Null).with_condition(CardPattern::Tapped);
        assert!(!tapped_only.holds(&state, arena));
        state.card_mut(arena).tapped = true;
        assert!(tapped_only.holds(&state, arena));
    }
}
