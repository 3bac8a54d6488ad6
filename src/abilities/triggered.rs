//! Triggered abilities and trigger collection.
//!
//! After every atomic verb, [`queue_triggers`] asks each card in hand, on
//! the field and in the graveyard whether one of its triggered abilities
//! watches for what just happened. Matches go onto the super-stack; the
//! resolution layer later decides their order.

use tracing::trace;

use crate::core::GameState;
use crate::query::{Choice, Subject, VerbPattern};
use crate::stack::StackObject;
use crate::verbs::Verb;
use crate::zones::ZoneKind;

/// "When/whenever [pattern], [effect]."
#[derive(Clone, Debug, PartialEq)]
pub struct TriggeredAbility {
    pub name: String,
    /// Zone the card must be in for the ability to watch.
    pub zone: ZoneKind,
    pub pattern: VerbPattern,
    pub effect: Verb,
    /// Resolve straight out of the super-stack, never using the stack.
    pub as_enters: bool,
}

impl TriggeredAbility {
    /// A trigger that watches from the field.
    #[must_use]
    pub fn new(name: impl Into<String>, pattern: VerbPattern, effect: Verb) -> Self {
        Self {
            name: name.into(),
            zone: ZoneKind::Field,
            pattern,
            effect,
            as_enters: false,
        }
    }

    /// Watch from another zone.
    #[must_use]
    pub fn with_zone(mut self, zone: ZoneKind) -> Self {
        self.zone = zone;
        self
    }

    /// Resolve immediately when the super-stack is cleared.
    #[must_use]
    pub fn as_enters(mut self) -> Self {
        self.as_enters = true;
        self
    }

    /// Check if the ability fires for `verb` having acted on `acted`, as seen
    /// by `watcher`.
    #[must_use]
    pub fn fires(&self, state: &GameState, verb: &Verb, acted: &Subject, watcher: &Subject) -> bool {
        self.pattern.matches(verb, acted, state, watcher)
    }
}

/// Queue every trigger that `verb`, having acted on `acted`, sets off.
///
/// The cause goes first in the queued object's choices: the card acted on,
/// or the player when the verb had no card.
pub fn queue_triggers(state: &mut GameState, verb: &Verb, acted: &Subject) {
    let mut fired = Vec::new();
    for player in state.player_ids() {
        for zone in ZoneKind::TRIGGER_SOURCES {
            for card in state.zone(player, zone) {
                let cardboard = state.card(card);
                let watcher = Subject::card(cardboard.owner, card);
                for ability in &cardboard.rules.triggered {
                    if ability.zone == cardboard.zone && ability.fires(state, verb, acted, &watcher) {
                        let cause = acted.card.map_or(Choice::Player(acted.player), Choice::Card);
                        fired.push(StackObject::trigger(cardboard.owner, card, ability.clone(), cause));
                    }
                }
            }
        }
    }

    for object in fired {
        trace!(trigger = %object.name(state), "trigger queued");
        state.super_stack.push_back(object);
    }
}
