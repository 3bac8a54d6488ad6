//! Costs: an optional mana cost plus extra verbs, paid as one unit.
//!
//! A cost is checked and paid through the composite verb [`Cost::as_verb`]
//! builds, so "can I afford this" and "paying this produces an outcome" are
//! the same question asked twice.

use crate::core::GameState;
use crate::mana::ManaCost;
use crate::query::{Choice, ChoiceList, Chooser, Subject};

use super::{Branch, Verb};

/// Something to pay before an effect happens.
///
/// ```
/// use goldfish::verbs::{Cost, Verb};
///
/// let cost = Cost::mana("1G".parse().unwrap()).with_verb(Verb::TapSymbol);
/// assert_eq!(cost.mana_value(), 2);
/// assert_eq!(cost.as_verb().num_inputs(), 0);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Cost {
    mana: Option<ManaCost>,
    verbs: Vec<Verb>,
}

impl Cost {
    /// Costs nothing.
    #[must_use]
    pub fn free() -> Self {
        Self {
            mana: None,
            verbs: Vec::new(),
        }
    }

    /// A plain mana cost.
    #[must_use]
    pub fn mana(cost: ManaCost) -> Self {
        Self {
            mana: (!cost.is_free()).then_some(cost),
            verbs: Vec::new(),
        }
    }

    /// Only extra verbs ("tap, sacrifice this").
    #[must_use]
    pub fn verbs(verbs: Vec<Verb>) -> Self {
        Self { mana: None, verbs }
    }

    /// Add an extra verb.
    #[must_use]
    pub fn with_verb(mut self, verb: Verb) -> Self {
        self.verbs.push(verb);
        self
    }

    /// The mana part, if any.
    #[must_use]
    pub fn mana_cost(&self) -> Option<&ManaCost> {
        self.mana.as_ref()
    }

    /// Extra verbs, in payment order.
    #[must_use]
    pub fn extra_verbs(&self) -> &[Verb] {
        &self.verbs
    }

    /// Mana value of the mana part.
    #[must_use]
    pub fn mana_value(&self) -> u32 {
        self.mana.map_or(0, |cost| cost.mana_value())
    }

    /// Check if there is nothing to pay.
    #[must_use]
    pub fn is_free(&self) -> bool {
        self.mana.is_none() && self.verbs.is_empty()
    }

    /// The cost as one verb: mana first, then the extras in order.
    #[must_use]
    pub fn as_verb(&self) -> Verb {
        let mut parts = Vec::with_capacity(self.verbs.len() + 1);
        if let Some(cost) = self.mana {
            parts.push(Verb::PayMana(cost));
        }
        parts.extend(self.verbs.iter().cloned());
        Verb::Many(parts)
    }

    /// Check if the cost can be paid with these choices.
    #[must_use]
    pub fn can_afford(&self, state: &GameState, subject: &Subject, choices: &[Choice]) -> bool {
        self.as_verb().can_be_done(state, subject, choices)
    }

    /// Pay the cost, one branch per way of paying it.
    #[must_use]
    pub fn pay_cost(&self, state: &GameState, subject: &Subject, choices: &[Choice]) -> Vec<Branch> {
        self.as_verb().do_it(state, subject, choices)
    }

    /// Every choice list that pays this cost right now.
    #[must_use]
    pub fn get_payment_plans(&self, state: &GameState, subject: &Subject, chooser: &dyn Chooser) -> Vec<ChoiceList> {
        let verb = self.as_verb();
        verb.populate_options(state, subject, chooser)
            .into_iter()
            .filter(|plan| verb.can_be_done(state, subject, plan))
            .collect()
    }
}

impl Default for Cost {
    fn default() -> Self {
        Self::free()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::cards::{catalog, CardType};
    use crate::core::PlayerId;
    use crate::mana::{Color, ManaPool};
    use crate::query::{CardPattern, EnumerateAll, Getter};
    use crate::zones::{ZoneKind, ZoneRef};

    fn p0() -> PlayerId {
        PlayerId::new(0)
    }

    #[test]
    fn test_free_mana_cost_is_dropped() {
        let cost = Cost::mana(ManaCost::free());
        assert!(cost.is_free());
        assert_eq!(cost.as_verb(), Verb::Many(vec![]));
    }

    #[test]
    fn test_afford_matches_pay() {
        let mut state = GameState::new(1, 20);
        let subject = Subject::player(p0());
        let cost = Cost::mana("1G".parse().unwrap());

        assert!(!cost.can_afford(&state, &subject, &[]));
        assert!(cost.pay_cost(&state, &subject, &[]).is_empty());

        state.player_mut(p0()).pool = ManaPool::of(Color::G, 2);
        assert!(cost.can_afford(&state, &subject, &[]));
        let branches = cost.pay_cost(&state, &subject, &[]);
        assert_eq!(branches.len(), 1);
        assert!(branches[0].as_ref().unwrap().state.player(p0()).pool.is_empty());
    }

    #[test]
    fn test_tap_cost_plans() {
        let mut state = GameState::new(1, 20);
        let forest = state.create_card(Arc::new(catalog::forest()), p0(), ZoneKind::Field);
        let subject = Subject::card(p0(), forest);
        let cost = Cost::verbs(vec![Verb::TapSymbol]);

        assert_eq!(cost.get_payment_plans(&state, &subject, &EnumerateAll).len(), 1);

        state.card_mut(forest).tapped = true;
        assert!(cost.get_payment_plans(&state, &subject, &EnumerateAll).is_empty());
    }

    #[test]
    fn test_discard_cost_without_choices() {
        let mut state = GameState::new(1, 20);
        let subject = Subject::player(p0());
        let discard_land = Cost::verbs(vec![Verb::on_target(
            Verb::discard(),
            Getter::Card {
                zone: ZoneRef::yours(ZoneKind::Hand),
                pattern: CardPattern::Type(CardType::Land),
            },
        )]);

        assert!(!discard_land.can_afford(&state, &subject, &[]));
        assert!(discard_land.pay_cost(&state, &subject, &[]).is_empty());

        state.create_card(Arc::new(catalog::forest()), p0(), ZoneKind::Hand);
        state.create_card(Arc::new(catalog::swamp()), p0(), ZoneKind::Hand);
        assert!(discard_land.can_afford(&state, &subject, &[]));
        assert_eq!(discard_land.pay_cost(&state, &subject, &[]).len(), 2);
        assert_eq!(discard_land.get_payment_plans(&state, &subject, &EnumerateAll).len(), 2);
    }
}
