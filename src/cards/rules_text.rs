//! Card designs: the immutable template shared by every copy of a card.
//!
//! `RulesText` holds what is printed on a card: name, types, cost, keywords,
//! power/toughness, abilities and the effect a spell has on resolution.
//! Physical copies (`Cardboard`) share it through an `Arc` and never mutate
//! it. Effects that change what a card is build a new `RulesText` instead.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::abilities::{ActivatedAbility, StaticAbility, TimedAbility, TriggeredAbility};
use crate::mana::ManaCost;
use crate::verbs::{Cost, Verb};
use crate::zones::ZoneKind;

/// Card type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardType {
    Land,
    Creature,
    Artifact,
    Enchantment,
    Instant,
    Sorcery,
}

impl CardType {
    /// Single-letter code used in canonical ids.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            CardType::Land => 'L',
            CardType::Creature => 'C',
            CardType::Artifact => 'A',
            CardType::Enchantment => 'E',
            CardType::Instant => 'I',
            CardType::Sorcery => 'S',
        }
    }

    /// Check if cards of this type stay on the field after resolving.
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        !matches!(self, CardType::Instant | CardType::Sorcery)
    }
}

/// Keyword ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Keyword {
    Haste,
    Defender,
    Flying,
    Reach,
    Vigilance,
    Trample,
}

/// Immutable card design.
///
/// ```
/// use goldfish::cards::{CardType, RulesText};
/// use goldfish::zones::ZoneKind;
///
/// let bear = RulesText::creature("Grizzly Bears", "1G".parse().unwrap(), 2, 2)
///     .with_subtypes(&["Bear"]);
///
/// assert!(bear.is_type(CardType::Creature));
/// assert_eq!(bear.destination, ZoneKind::Field);
/// assert_eq!(bear.mana_value(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct RulesText {
    /// Card name.
    pub name: String,

    /// Card types, in printed order.
    pub card_types: Vec<CardType>,

    /// Subtypes ("Elf", "Wall").
    pub subtypes: Vec<String>,

    /// Cost to cast.
    pub cost: Cost,

    /// Printed keywords.
    pub keywords: Vec<Keyword>,

    /// Printed power (creatures only).
    pub power: Option<i64>,

    /// Printed toughness (creatures only).
    pub toughness: Option<i64>,

    // === Abilities ===
    pub activated: Vec<Arc<ActivatedAbility>>,
    pub triggered: Vec<Arc<TriggeredAbility>>,
    pub timed: Vec<Arc<TimedAbility>>,
    pub statics: Vec<Arc<StaticAbility>>,

    /// What the card does when it resolves as a spell.
    pub effect: Verb,

    /// Where the card goes after resolving.
    pub destination: ZoneKind,
}

impl RulesText {
    /// A blank design with no types and no cost.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            card_types: Vec::new(),
            subtypes: Vec::new(),
            cost: Cost::free(),
            keywords: Vec::new(),
            power: None,
            toughness: None,
            activated: Vec::new(),
            triggered: Vec::new(),
            timed: Vec::new(),
            statics: Vec::new(),
            effect: Verb::Null,
            destination: ZoneKind::Field,
        }
    }

    /// A land.
    #[must_use]
    pub fn land(name: impl Into<String>) -> Self {
        Self::new(name).with_type(CardType::Land)
    }

    /// A creature with a mana cost and printed power/toughness.
    #[must_use]
    pub fn creature(name: impl Into<String>, cost: ManaCost, power: i64, toughness: i64) -> Self {
        let mut rules = Self::new(name)
            .with_type(CardType::Creature)
            .with_cost(Cost::mana(cost));
        rules.power = Some(power);
        rules.toughness = Some(toughness);
        rules
    }

    /// An instant with an effect.
    #[must_use]
    pub fn instant(name: impl Into<String>, cost: ManaCost, effect: Verb) -> Self {
        Self::new(name)
            .with_type(CardType::Instant)
            .with_cost(Cost::mana(cost))
            .with_effect(effect)
    }

    /// A sorcery with an effect.
    #[must_use]
    pub fn sorcery(name: impl Into<String>, cost: ManaCost, effect: Verb) -> Self {
        Self::new(name)
            .with_type(CardType::Sorcery)
            .with_cost(Cost::mana(cost))
            .with_effect(effect)
    }

    // === Builders ===

    /// Add a card type. Instants and sorceries go to the graveyard after
    /// resolving.
    #[must_use]
    pub fn with_type(mut self, card_type: CardType) -> Self {
        if !self.card_types.contains(&card_type) {
            self.card_types.push(card_type);
        }
        self.destination = if self.card_types.iter().all(|t| t.is_permanent()) {
            ZoneKind::Field
        } else {
            ZoneKind::Grave
        };
        self
    }

    /// Add subtypes.
    #[must_use]
    pub fn with_subtypes(mut self, subtypes: &[&str]) -> Self {
        self.subtypes.extend(subtypes.iter().map(|s| (*s).to_string()));
        self
    }

    /// Set the cost.
    #[must_use]
    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.cost = cost;
        self
    }

    /// Add a keyword.
    #[must_use]
    pub fn with_keyword(mut self, keyword: Keyword) -> Self {
        if !self.keywords.contains(&keyword) {
            self.keywords.push(keyword);
        }
        self
    }

    /// Set the resolution effect.
    #[must_use]
    pub fn with_effect(mut self, effect: Verb) -> Self {
        self.effect = effect;
        self
    }

    /// Add an activated ability.
    #[must_use]
    pub fn with_activated(mut self, ability: ActivatedAbility) -> Self {
        self.activated.push(Arc::new(ability));
        self
    }

    /// Add a triggered ability.
    #[must_use]
    pub fn with_triggered(mut self, ability: TriggeredAbility) -> Self {
        self.triggered.push(Arc::new(ability));
        self
    }

    /// Add a timed ability.
    #[must_use]
    pub fn with_timed(mut self, ability: TimedAbility) -> Self {
        self.timed.push(Arc::new(ability));
        self
    }

    /// Add a static ability.
    #[must_use]
    pub fn with_static(mut self, ability: StaticAbility) -> Self {
        self.statics.push(Arc::new(ability));
        self
    }

    // === Queries ===

    /// Check for a card type.
    #[must_use]
    pub fn is_type(&self, card_type: CardType) -> bool {
        self.card_types.contains(&card_type)
    }

    /// Check for a subtype.
    #[must_use]
    pub fn has_subtype(&self, subtype: &str) -> bool {
        self.subtypes.iter().any(|s| s == subtype)
    }

    /// Check if this can be cast while the stack is not empty.
    #[must_use]
    pub fn is_instant_speed(&self) -> bool {
        self.is_type(CardType::Instant)
    }

    /// Mana value of the cost.
    #[must_use]
    pub fn mana_value(&self) -> u32 {
        self.cost.mana_value()
    }

    /// Code of the first card type, `?` for typeless cards.
    #[must_use]
    pub fn type_code(&self) -> char {
        self.card_types.first().map_or('?', |t| t.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spells_go_to_graveyard() {
        let ritual = RulesText::instant("Dark Ritual", "B".parse().unwrap(), Verb::Null);
        assert_eq!(ritual.destination, ZoneKind::Grave);
        assert!(ritual.is_instant_speed());

        let land = RulesText::land("Forest");
        assert_eq!(land.destination, ZoneKind::Field);
        assert_eq!(land.type_code(), 'L');
    }

    #[test]
    fn test_artifact_creature_is_permanent() {
        let golem = RulesText::creature("Golem", "3".parse().unwrap(), 3, 3).with_type(CardType::Artifact);
        assert_eq!(golem.destination, ZoneKind::Field);
        assert_eq!(golem.card_types, vec![CardType::Creature, CardType::Artifact]);
    }

    #[test]
    fn test_keywords_and_subtypes() {
        let elf = RulesText::creature("Elf", "G".parse().unwrap(), 1, 1)
            .with_subtypes(&["Elf", "Druid"])
            .with_keyword(Keyword::Haste)
            .with_keyword(Keyword::Haste);

        assert!(elf.has_subtype("Druid"));
        assert!(!elf.has_subtype("Wall"));
        assert_eq!(elf.keywords, vec![Keyword::Haste]);
    }
}
