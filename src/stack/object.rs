//! Objects waiting on the stack or super-stack.

use std::sync::Arc;

use crate::abilities::{ActivatedAbility, TimedAbility, TriggeredAbility};
use crate::core::{CardRef, GameState, PlayerId};
use crate::query::{Choice, ChoiceList, Subject};
use crate::verbs::Verb;

/// What a stack object will do when it resolves.
#[derive(Clone, Debug)]
pub enum StackKind {
    /// A card being cast. Its effect is the card's own.
    Spell,
    /// A non-mana activated ability.
    Ability(Arc<ActivatedAbility>),
    /// A triggered ability. The first choice is the cause.
    Trigger(Arc<TriggeredAbility>),
    /// An upkeep ability.
    Timed(Arc<TimedAbility>),
}

/// An entry pending resolution.
///
/// Holds only handles into the owning state's arena, so it follows the state
/// through every copy.
#[derive(Clone, Debug)]
pub struct StackObject {
    pub controller: PlayerId,
    /// The spell itself, or the card the ability comes from.
    pub card: Option<CardRef>,
    pub kind: StackKind,
    /// Choices made so far. Effect choices are filled in once the object
    /// leaves the super-stack.
    pub choices: ChoiceList,
}

impl StackObject {
    #[must_use]
    pub fn spell(controller: PlayerId, card: CardRef, choices: ChoiceList) -> Self {
        Self {
            controller,
            card: Some(card),
            kind: StackKind::Spell,
            choices,
        }
    }

    #[must_use]
    pub fn ability(controller: PlayerId, source: CardRef, ability: Arc<ActivatedAbility>, choices: ChoiceList) -> Self {
        Self {
            controller,
            card: Some(source),
            kind: StackKind::Ability(ability),
            choices,
        }
    }

    #[must_use]
    pub fn trigger(controller: PlayerId, source: CardRef, ability: Arc<TriggeredAbility>, cause: Choice) -> Self {
        let mut choices = ChoiceList::new();
        choices.push(cause);
        Self {
            controller,
            card: Some(source),
            kind: StackKind::Trigger(ability),
            choices,
        }
    }

    #[must_use]
    pub fn timed(controller: PlayerId, source: CardRef, ability: Arc<TimedAbility>) -> Self {
        Self {
            controller,
            card: Some(source),
            kind: StackKind::Timed(ability),
            choices: ChoiceList::new(),
        }
    }

    // === Queries ===

    /// Check if this is a card rather than an ability.
    #[must_use]
    pub fn is_spell(&self) -> bool {
        matches!(self.kind, StackKind::Spell)
    }

    /// Check if this resolves straight out of the super-stack.
    #[must_use]
    pub fn is_as_enters(&self) -> bool {
        matches!(&self.kind, StackKind::Trigger(ability) if ability.as_enters)
    }

    /// The triggering card or player, for triggers.
    #[must_use]
    pub fn cause(&self) -> Option<&Choice> {
        match self.kind {
            StackKind::Trigger(_) => self.choices.first(),
            _ => None,
        }
    }

    /// Who resolves the effect, and through which card.
    #[must_use]
    pub fn subject(&self) -> Subject {
        Subject {
            player: self.controller,
            source: self.card,
            card: self.card,
        }
    }

    /// The effect to run.
    ///
    /// Panics for a spell without a card.
    #[must_use]
    pub fn effect<'a>(&'a self, state: &'a GameState) -> &'a Verb {
        match &self.kind {
            StackKind::Spell => {
                let card = self.card.expect("spell on the stack without a card");
                &state.card(card).rules.effect
            }
            StackKind::Ability(ability) => &ability.effect,
            StackKind::Trigger(ability) => &ability.effect,
            StackKind::Timed(ability) => &ability.effect,
        }
    }

    /// The choices the effect consumes: everything but a trigger's cause.
    #[must_use]
    pub fn effect_choices(&self) -> &[Choice] {
        match self.kind {
            StackKind::Trigger(_) => self.choices.get(1..).unwrap_or(&[]),
            _ => &self.choices,
        }
    }

    /// A copy with effect choices appended.
    #[must_use]
    pub fn with_effect_choices(&self, extra: &[Choice]) -> Self {
        let mut object = self.clone();
        object.choices.extend(extra.iter().cloned());
        object
    }

    /// Display name: the card, or the ability.
    #[must_use]
    pub fn name(&self, state: &GameState) -> String {
        match &self.kind {
            StackKind::Spell => self.card.map_or_else(String::new, |c| state.card(c).name().to_string()),
            StackKind::Ability(ability) => ability.name.clone(),
            StackKind::Trigger(ability) => ability.name.clone(),
            StackKind::Timed(ability) => ability.name.clone(),
        }
    }

    /// Canonical id: kind, name, source card id and choices.
    #[must_use]
    pub fn id(&self, state: &GameState) -> String {
        let kind = match self.kind {
            StackKind::Spell => 'S',
            StackKind::Ability(_) => 'A',
            StackKind::Trigger(_) => 'T',
            StackKind::Timed(_) => 'U',
        };
        let source = self.card.map_or_else(String::new, |c| state.card(c).id());
        let choices: Vec<String> = self.choices.iter().map(|c| c.describe(state)).collect();
        format!(
            "{kind}:{}:{}:{source}({})",
            self.controller,
            self.name(state),
            choices.join(",")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cards::catalog;
    use crate::zones::ZoneKind;

    #[test]
    fn test_trigger_choices_split() {
        let mut state = GameState::new(1, 20);
        let p0 = PlayerId::new(0);
        let visionary = state.create_card(Arc::new(catalog::elvish_visionary()), p0, ZoneKind::Field);
        let ability = state.card(visionary).rules.triggered[0].clone();

        let object = StackObject::trigger(p0, visionary, ability, Choice::Card(visionary))
            .with_effect_choices(&[Choice::Int(1)]);

        assert_eq!(object.cause(), Some(&Choice::Card(visionary)));
        assert_eq!(object.effect_choices(), &[Choice::Int(1)]);
        assert_eq!(object.effect(&state), &Verb::DrawCard);
    }

    #[test]
    fn test_id_follows_card_state() {
        let mut state = GameState::new(1, 20);
        let p0 = PlayerId::new(0);
        let elf = state.create_card(Arc::new(catalog::llanowar_elves()), p0, ZoneKind::Stack);
        let object = StackObject::spell(p0, elf, ChoiceList::new());

        assert_eq!(object.id(&state), "S:P0:Llanowar Elves:CLlanowar Elves:K()");
        assert!(object.is_spell());
        assert!(!object.is_as_enters());
    }
}
