//! Built-in card designs.
//!
//! Each function builds one [`RulesText`]. [`CardRegistry::with_catalog`]
//! registers all of them by name so decklists can refer to cards as text.
//!
//! [`CardRegistry::with_catalog`]: super::CardRegistry::with_catalog

use crate::abilities::{ActivatedAbility, StaticAbility, TimedAbility, TriggeredAbility};
use crate::mana::{Color, ManaCost, ManaPool};
use crate::query::{CardPattern, Choice, Comparison, Getter, IntGetter, VerbPattern};
use crate::verbs::{Cost, Verb};
use crate::zones::{ZoneKind, ZoneRef};

use super::rules_text::{CardType, Keyword, RulesText};

fn cost(text: &str) -> ManaCost {
    text.parse()
        .unwrap_or_else(|err| panic!("catalog mana cost {text:?}: {err}"))
}

fn one_of_any_color() -> Getter {
    Getter::OneOf(
        Color::COLORS
            .iter()
            .map(|&color| Choice::Mana(ManaPool::of(color, 1)))
            .collect(),
    )
}

/// "{T}: Add {color}."
fn tap_for(name: &str, color: Color) -> ActivatedAbility {
    ActivatedAbility::new(
        name,
        Cost::verbs(vec![Verb::TapSymbol]),
        Verb::add_mana(ManaPool::of(color, 1)),
    )
}

fn draw_on_enter(name: &str) -> TriggeredAbility {
    TriggeredAbility::new(name, VerbPattern::self_enters(), Verb::DrawCard)
}

// =============================================================================
// Lands
// =============================================================================

#[must_use]
pub fn forest() -> RulesText {
    RulesText::land("Forest")
        .with_subtypes(&["Forest"])
        .with_activated(tap_for("Forest", Color::G))
}

#[must_use]
pub fn swamp() -> RulesText {
    RulesText::land("Swamp")
        .with_subtypes(&["Swamp"])
        .with_activated(tap_for("Swamp", Color::B))
}

#[must_use]
pub fn plains() -> RulesText {
    RulesText::land("Plains")
        .with_subtypes(&["Plains"])
        .with_activated(tap_for("Plains", Color::W))
}

// =============================================================================
// Creatures
// =============================================================================

#[must_use]
pub fn llanowar_elves() -> RulesText {
    RulesText::creature("Llanowar Elves", cost("G"), 1, 1)
        .with_subtypes(&["Elf", "Druid"])
        .with_activated(tap_for("Llanowar Elves", Color::G))
}

/// Any color, from a flier.
#[must_use]
pub fn birds_of_paradise() -> RulesText {
    RulesText::creature("Birds of Paradise", cost("G"), 0, 1)
        .with_subtypes(&["Bird"])
        .with_keyword(Keyword::Flying)
        .with_activated(ActivatedAbility::new(
            "Birds of Paradise",
            Cost::verbs(vec![Verb::TapSymbol]),
            Verb::AddMana(one_of_any_color()),
        ))
}

/// Once a turn, no tap: shrink by -0/-1 for {G}.
#[must_use]
pub fn wall_of_roots() -> RulesText {
    RulesText::creature("Wall of Roots", cost("1G"), 0, 5)
        .with_subtypes(&["Plant", "Wall"])
        .with_keyword(Keyword::Defender)
        .with_activated(ActivatedAbility::new(
            "Wall of Roots",
            Cost::verbs(vec![Verb::AddCounter("-0/-1".into()), Verb::ActivateOncePerTurn]),
            Verb::add_mana(ManaPool::of(Color::G, 1)),
        ))
}

#[must_use]
pub fn elvish_visionary() -> RulesText {
    RulesText::creature("Elvish Visionary", cost("1G"), 1, 1)
        .with_subtypes(&["Elf", "Shaman"])
        .with_triggered(draw_on_enter("Elvish Visionary"))
}

#[must_use]
pub fn wall_of_omens() -> RulesText {
    RulesText::creature("Wall of Omens", cost("1W"), 0, 4)
        .with_subtypes(&["Wall"])
        .with_keyword(Keyword::Defender)
        .with_triggered(draw_on_enter("Wall of Omens"))
}

/// Lord for other Elves, taps for {G} per Elf.
#[must_use]
pub fn elvish_archdruid() -> RulesText {
    let other_elves = CardPattern::Subtype("Elf".into())
        .and(CardPattern::Other)
        .and(CardPattern::YouControl);
    let elves_you_control = IntGetter::CountCards {
        zone: ZoneRef::yours(ZoneKind::Field),
        pattern: CardPattern::Subtype("Elf".into()),
    };
    let [power, toughness] = StaticAbility::pump("Elvish Archdruid", other_elves, 1, 1);

    RulesText::creature("Elvish Archdruid", cost("1GG"), 2, 2)
        .with_subtypes(&["Elf", "Druid"])
        .with_static(power)
        .with_static(toughness)
        .with_activated(ActivatedAbility::new(
            "Elvish Archdruid",
            Cost::verbs(vec![Verb::TapSymbol]),
            Verb::repeat(Verb::add_mana(ManaPool::of(Color::G, 1)), elves_you_control),
        ))
}

// =============================================================================
// Other permanents
// =============================================================================

/// "{T}, Sacrifice: add one mana of any color."
#[must_use]
pub fn lotus_petal() -> RulesText {
    RulesText::new("Lotus Petal")
        .with_type(CardType::Artifact)
        .with_activated(ActivatedAbility::new(
            "Lotus Petal",
            Cost::verbs(vec![Verb::TapSymbol, Verb::sacrifice()]),
            Verb::AddMana(one_of_any_color()),
        ))
}

/// All creatures have haste.
#[must_use]
pub fn concordant_crossroads() -> RulesText {
    RulesText::new("Concordant Crossroads")
        .with_type(CardType::Enchantment)
        .with_cost(Cost::mana(cost("G")))
        .with_static(StaticAbility::grant(
            "Concordant Crossroads",
            CardPattern::Type(CardType::Creature),
            &[Keyword::Haste],
        ))
}

/// Upkeep: draw a card and lose 1 life.
#[must_use]
pub fn phyrexian_arena() -> RulesText {
    RulesText::new("Phyrexian Arena")
        .with_type(CardType::Enchantment)
        .with_cost(Cost::mana(cost("1BB")))
        .with_timed(TimedAbility::new(
            "Phyrexian Arena",
            Verb::Many(vec![Verb::DrawCard, Verb::lose_life(1)]),
        ))
}

/// Upkeep: win with 50 or more life.
#[must_use]
pub fn test_of_endurance() -> RulesText {
    let fifty_life = CardPattern::compare(IntGetter::Life, Comparison::Ge, 50);
    RulesText::new("Test of Endurance")
        .with_type(CardType::Enchantment)
        .with_cost(Cost::mana(cost("2WW")))
        .with_timed(TimedAbility::new("Test of Endurance", Verb::WinTheGame).with_condition(fifty_life))
}

// =============================================================================
// Spells
// =============================================================================

#[must_use]
pub fn dark_ritual() -> RulesText {
    RulesText::instant("Dark Ritual", cost("B"), Verb::add_mana(ManaPool::of(Color::B, 3)))
}

/// Search the deck for a land and put it into hand.
#[must_use]
pub fn sylvan_scrying() -> RulesText {
    let land_in_deck = Getter::CardsUpTo {
        zone: ZoneRef::yours(ZoneKind::Deck),
        pattern: CardPattern::Type(CardType::Land),
        max: 1,
    };
    RulesText::sorcery(
        "Sylvan Scrying",
        cost("1G"),
        Verb::on_split_list(land_in_deck, Verb::move_to(ZoneKind::Hand), Verb::Null),
    )
}

/// Put up to two creature cards from hand onto the field at once.
#[must_use]
pub fn mass_summons() -> RulesText {
    let creatures_in_hand = Getter::CardsUpTo {
        zone: ZoneRef::yours(ZoneKind::Hand),
        pattern: CardPattern::Type(CardType::Creature),
        max: 2,
    };
    RulesText::sorcery(
        "Mass Summons",
        cost("2G"),
        Verb::on_split_list(creatures_in_hand, Verb::move_to(ZoneKind::Field), Verb::Null),
    )
}

/// Gain 3 life.
#[must_use]
pub fn healing_salve() -> RulesText {
    RulesText::instant("Healing Salve", cost("W"), Verb::gain_life(3))
}

/// Every design in the catalog.
#[must_use]
pub fn all() -> Vec<RulesText> {
    vec![
        forest(),
        swamp(),
        plains(),
        llanowar_elves(),
        birds_of_paradise(),
        wall_of_roots(),
        elvish_visionary(),
        wall_of_omens(),
        elvish_archdruid(),
        lotus_petal(),
        concordant_crossroads(),
        phyrexian_arena(),
        test_of_endurance(),
        dark_ritual(),
        sylvan_scrying(),
        mass_summons(),
        healing_salve(),
    ]
}
