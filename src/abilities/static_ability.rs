//! Static abilities: continuous modifiers consulted by getters.
//!
//! A static ability is active while its card is on the field. Whenever a
//! power, toughness or keyword query runs, every active static whose
//! `applies_to` pattern matches the queried card transforms the raw value.
//! Patterns are evaluated from the static's own point of view, so `Other`
//! and `YouControl` refer to the card carrying the ability.
//!
//! Keyword grants must not use keyword patterns in `applies_to`; the query
//! would ask itself.

use serde::{Deserialize, Serialize};

use crate::cards::Keyword;
use crate::core::{CardRef, GameState};
use crate::query::{CardPattern, Subject};
use crate::zones::ZoneKind;

/// The getter a static ability modifies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatQuery {
    Power,
    Toughness,
    Keywords,
}

/// How a matching value is transformed.
#[derive(Clone, Debug, PartialEq)]
pub enum Modifier {
    /// Add to a number.
    Add(i64),
    /// Union into the keyword list.
    Grant(Vec<Keyword>),
}

/// A continuous effect.
#[derive(Clone, Debug, PartialEq)]
pub struct StaticAbility {
    pub name: String,
    pub query: StatQuery,
    pub applies_to: CardPattern,
    pub modifier: Modifier,
}

impl StaticAbility {
    #[must_use]
    pub fn new(name: impl Into<String>, query: StatQuery, applies_to: CardPattern, modifier: Modifier) -> Self {
        Self {
            name: name.into(),
            query,
            applies_to,
            modifier,
        }
    }

    /// "[Cards] get +X/+Y": one static per stat.
    #[must_use]
    pub fn pump(name: &str, applies_to: CardPattern, power: i64, toughness: i64) -> [StaticAbility; 2] {
        [
            Self::new(name, StatQuery::Power, applies_to.clone(), Modifier::Add(power)),
            Self::new(name, StatQuery::Toughness, applies_to, Modifier::Add(toughness)),
        ]
    }

    /// "[Cards] have [keywords]."
    #[must_use]
    pub fn grant(name: &str, applies_to: CardPattern, keywords: &[Keyword]) -> StaticAbility {
        Self::new(name, StatQuery::Keywords, applies_to, Modifier::Grant(keywords.to_vec()))
    }

    /// Check if the ability, on `source`, modifies `card`.
    #[must_use]
    pub fn applies(&self, state: &GameState, source: CardRef, card: CardRef) -> bool {
        self.applies_to.matches(card, state, &Subject::of(state, source))
    }
}

/// Every active static of one query kind, with the card carrying it.
fn active(state: &GameState, query: StatQuery) -> Vec<(CardRef, &StaticAbility)> {
    let mut found = Vec::new();
    for player in state.player_ids() {
        for source in state.zone(player, ZoneKind::Field) {
            for ability in &state.card(source).rules.statics {
                if ability.query == query {
                    found.push((source, ability.as_ref()));
                }
            }
        }
    }
    found
}

/// Pass a numeric stat of `card` through every matching static.
#[must_use]
pub fn modified_int(state: &GameState, query: StatQuery, card: CardRef, base: i64) -> i64 {
    active(state, query)
        .into_iter()
        .filter(|(source, ability)| ability.applies(state, *source, card))
        .fold(base, |value, (_, ability)| match ability.modifier {
            Modifier::Add(delta) => value + delta,
            Modifier::Grant(_) => value,
        })
}

/// Pass the keyword list of `card` through every matching grant.
#[must_use]
pub fn modified_keywords(state: &GameState, card: CardRef, base: Vec<Keyword>) -> Vec<Keyword> {
    let mut keywords = base;
    for (source, ability) in active(state, StatQuery::Keywords) {
        if let Modifier::Grant(granted) = &ability.modifier {
            if ability.applies(state, source, card) {
                for keyword in granted {
                    if !keywords.contains(keyword) {
                        keywords.push(*keyword);
                    }
                }
            }
        }
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::cards::{catalog, CardType};
    use crate::core::PlayerId;

    #[test]
    fn test_statics_only_from_field() {
        let mut state = GameState::new(1, 20);
        let p0 = PlayerId::new(0);
        let elf = state.create_card(Arc::new(catalog::llanowar_elves()), p0, ZoneKind::Field);
        let lord = state.create_card(Arc::new(catalog::elvish_archdruid()), p0, ZoneKind::Hand);

        assert_eq!(modified_int(&state, StatQuery::Power, elf, 1), 1);
        state.move_card(lord, ZoneKind::Field);
        assert_eq!(modified_int(&state, StatQuery::Power, elf, 1), 2);
    }

    #[test]
    fn test_grants_dedup() {
        let mut state = GameState::new(1, 20);
        let p0 = PlayerId::new(0);
        let elf = state.create_card(Arc::new(catalog::llanowar_elves()), p0, ZoneKind::Field);
        state.create_card(Arc::new(catalog::concordant_crossroads()), p0, ZoneKind::Field);
        state.create_card(Arc::new(catalog::concordant_crossroads()), p0, ZoneKind::Field);

        let keywords = modified_keywords(&state, elf, vec![Keyword::Haste]);
        assert_eq!(keywords, vec![Keyword::Haste]);
    }

    #[test]
    fn test_pump_pair() {
        let [power, toughness] = StaticAbility::pump("anthem", CardPattern::Type(CardType::Creature), 1, 2);
        assert_eq!(power.query, StatQuery::Power);
        assert_eq!(toughness.modifier, Modifier::Add(2));
    }
}
