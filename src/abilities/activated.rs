//! Activated abilities.

use crate::core::{CardRef, GameState};
use crate::query::{ChoiceList, Chooser, Subject};
use crate::verbs::{Cost, Verb};

/// "Cost: effect."
///
/// Abilities that add mana and take no target are mana abilities: they
/// resolve on activation instead of using the stack.
#[derive(Clone, Debug, PartialEq)]
pub struct ActivatedAbility {
    pub name: String,
    pub cost: Cost,
    pub effect: Verb,
    mana_ability: bool,
}

impl ActivatedAbility {
    #[must_use]
    pub fn new(name: impl Into<String>, cost: Cost, effect: Verb) -> Self {
        let mana_ability = effect.produces_mana() && !effect.has_targets();
        Self {
            name: name.into(),
            cost,
            effect,
            mana_ability,
        }
    }

    /// Check if this ability skips the stack.
    #[must_use]
    pub fn is_mana_ability(&self) -> bool {
        self.mana_ability
    }

    /// Every `(payment, effect choices)` pair available for activating from
    /// `source` right now. Nothing is mutated.
    #[must_use]
    pub fn activation_options(
        &self,
        state: &GameState,
        source: CardRef,
        chooser: &dyn Chooser,
    ) -> Vec<(ChoiceList, ChoiceList)> {
        let subject = Subject::of(state, source);
        let plans = self.cost.get_payment_plans(state, &subject, chooser);
        if plans.is_empty() {
            return Vec::new();
        }
        let effects = self.effect.populate_options(state, &subject, chooser);
        plans
            .iter()
            .flat_map(|plan| effects.iter().map(move |effect| (plan.clone(), effect.clone())))
            .collect()
    }

    /// Check if the ability can be activated from `source` right now.
    #[must_use]
    pub fn can_activate(&self, state: &GameState, source: CardRef, chooser: &dyn Chooser) -> bool {
        !self.activation_options(state, source, chooser).is_empty()
    }
}
