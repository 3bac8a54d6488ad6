//! Patterns: composable predicates over cards, players and verbs.
//!
//! Patterns are evaluated against a candidate plus the asking [`Subject`]
//! (who is asking, and on behalf of which card), so "another creature you
//! control" is written once and means the right thing for every card that
//! uses it.
//!
//! [`VerbPattern`] is the trigger-detection primitive: it matches the kind
//! of a just-executed verb and the card, source and player it acted on.

use crate::cards::{CardType, Keyword};
use crate::core::{CardRef, GameState, PlayerId};
use crate::verbs::{Verb, VerbTag};
use crate::zones::ZoneKind;

use super::getter::{has_keyword, IntGetter};
use super::Subject;

/// Numeric comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Comparison {
    /// Compare `lhs` against `rhs`.
    #[must_use]
    pub fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Comparison::Eq => lhs == rhs,
            Comparison::Ne => lhs != rhs,
            Comparison::Lt => lhs < rhs,
            Comparison::Le => lhs <= rhs,
            Comparison::Gt => lhs > rhs,
            Comparison::Ge => lhs >= rhs,
        }
    }
}

// =============================================================================
// Cards
// =============================================================================

/// Predicate over a card.
#[derive(Clone, Debug, PartialEq)]
pub enum CardPattern {
    Any,
    Type(CardType),
    /// Printed or granted keyword.
    Keyword(Keyword),
    Named(String),
    Subtype(String),
    InZone(ZoneKind),
    Tapped,
    Untapped,
    /// The card asking.
    IsSelf,
    /// Any card but the one asking.
    Other,
    /// Controlled by the asking player.
    YouControl,
    HasCounter(String),
    /// A number about the candidate compared to a constant.
    Compare {
        getter: Box<IntGetter>,
        cmp: Comparison,
        value: i64,
    },
    And(Vec<CardPattern>),
    Or(Vec<CardPattern>),
    Not(Box<CardPattern>),
}

impl CardPattern {
    /// `getter` of the candidate compared to `value`.
    #[must_use]
    pub fn compare(getter: IntGetter, cmp: Comparison, value: i64) -> CardPattern {
        CardPattern::Compare {
            getter: Box::new(getter),
            cmp,
            value,
        }
    }

    /// Both patterns.
    #[must_use]
    pub fn and(self, other: CardPattern) -> CardPattern {
        match self {
            CardPattern::And(mut parts) => {
                parts.push(other);
                CardPattern::And(parts)
            }
            first => CardPattern::And(vec![first, other]),
        }
    }

    /// Either pattern.
    #[must_use]
    pub fn or(self, other: CardPattern) -> CardPattern {
        match self {
            CardPattern::Or(mut parts) => {
                parts.push(other);
                CardPattern::Or(parts)
            }
            first => CardPattern::Or(vec![first, other]),
        }
    }

    /// Test `card`.
    #[must_use]
    pub fn matches(&self, card: CardRef, state: &GameState, subject: &Subject) -> bool {
        let cardboard = state.card(card);
        match self {
            CardPattern::Any => true,
            CardPattern::Type(card_type) => cardboard.rules.is_type(*card_type),
            CardPattern::Keyword(keyword) => has_keyword(state, card, *keyword),
            CardPattern::Named(name) => cardboard.name() == name,
            CardPattern::Subtype(subtype) => cardboard.rules.has_subtype(subtype),
            CardPattern::InZone(zone) => cardboard.zone == *zone,
            CardPattern::Tapped => cardboard.tapped,
            CardPattern::Untapped => !cardboard.tapped,
            CardPattern::IsSelf => subject.source == Some(card),
            CardPattern::Other => subject.source != Some(card),
            CardPattern::YouControl => cardboard.owner == subject.player,
            CardPattern::HasCounter(counter) => cardboard.has_counter(counter),
            CardPattern::Compare { getter, cmp, value } => {
                cmp.holds(getter.get(state, &subject.with_card(card)), *value)
            }
            CardPattern::And(parts) => parts.iter().all(|p| p.matches(card, state, subject)),
            CardPattern::Or(parts) => parts.iter().any(|p| p.matches(card, state, subject)),
            CardPattern::Not(inner) => !inner.matches(card, state, subject),
        }
    }
}

// =============================================================================
// Players
// =============================================================================

/// Predicate over a player.
#[derive(Clone, Debug, PartialEq)]
pub enum PlayerPattern {
    Any,
    /// The asking player.
    You,
    /// Anyone but the asking player.
    Opponent,
    /// The player whose turn it is.
    Active,
    /// A number about the player compared to a constant.
    Compare {
        getter: Box<IntGetter>,
        cmp: Comparison,
        value: i64,
    },
    Not(Box<PlayerPattern>),
}

impl PlayerPattern {
    #[must_use]
    pub fn compare(getter: IntGetter, cmp: Comparison, value: i64) -> PlayerPattern {
        PlayerPattern::Compare {
            getter: Box::new(getter),
            cmp,
            value,
        }
    }

    /// Test `player`.
    #[must_use]
    pub fn matches(&self, player: PlayerId, state: &GameState, subject: &Subject) -> bool {
        match self {
            PlayerPattern::Any => true,
            PlayerPattern::You => player == subject.player,
            PlayerPattern::Opponent => player != subject.player,
            PlayerPattern::Active => player == state.active_player,
            PlayerPattern::Compare { getter, cmp, value } => {
                let asking = Subject::player(player);
                cmp.holds(getter.get(state, &asking), *value)
            }
            PlayerPattern::Not(inner) => !inner.matches(player, state, subject),
        }
    }
}

// =============================================================================
// Verbs
// =============================================================================

/// Predicate over a just-executed verb.
///
/// `card`, `source` and `player` test what the verb acted on; they are
/// evaluated from the point of view of the watching card, so `IsSelf` means
/// "the card with this trigger".
#[derive(Clone, Debug, PartialEq)]
pub struct VerbPattern {
    /// Required verb kind. `None` matches every atomic verb.
    pub verb: Option<VerbTag>,
    /// The card acted on.
    pub card: CardPattern,
    /// The card whose ability did it.
    pub source: CardPattern,
    /// The player acted for.
    pub player: PlayerPattern,
}

impl VerbPattern {
    /// Match one kind of verb, on anything.
    #[must_use]
    pub fn new(verb: VerbTag) -> Self {
        Self {
            verb: Some(verb),
            card: CardPattern::Any,
            source: CardPattern::Any,
            player: PlayerPattern::Any,
        }
    }

    /// "When this enters the battlefield."
    #[must_use]
    pub fn self_enters() -> Self {
        Self::new(VerbTag::MoveTo(ZoneKind::Field)).with_card(CardPattern::IsSelf)
    }

    /// Restrict the card acted on.
    #[must_use]
    pub fn with_card(mut self, pattern: CardPattern) -> Self {
        self.card = pattern;
        self
    }

    /// Restrict the source.
    #[must_use]
    pub fn with_source(mut self, pattern: CardPattern) -> Self {
        self.source = pattern;
        self
    }

    /// Restrict the player.
    #[must_use]
    pub fn with_player(mut self, pattern: PlayerPattern) -> Self {
        self.player = pattern;
        self
    }

    /// Test a verb that just acted on `acted`, as seen by `watcher`.
    #[must_use]
    pub fn matches(&self, verb: &Verb, acted: &Subject, state: &GameState, watcher: &Subject) -> bool {
        if let Some(tag) = self.verb {
            if verb.tag() != Some(tag) {
                return false;
            }
        }
        let card_ok = |pattern: &CardPattern, card: Option<CardRef>| match (pattern, card) {
            (CardPattern::Any, _) => true,
            (_, Some(card)) => pattern.matches(card, state, watcher),
            (_, None) => false,
        };
        card_ok(&self.card, acted.card)
            && card_ok(&self.source, acted.source)
            && self.player.matches(acted.player, state, watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::cards::catalog;
    use crate::zones::ZoneRef;

    fn p0() -> PlayerId {
        PlayerId::new(0)
    }

    #[test]
    fn test_comparison() {
        assert!(Comparison::Ge.holds(3, 3));
        assert!(!Comparison::Gt.holds(3, 3));
        assert!(Comparison::Ne.holds(1, 2));
    }

    #[test]
    fn test_card_patterns() {
        let mut state = GameState::new(2, 20);
        let elf = state.create_card(Arc::new(catalog::llanowar_elves()), p0(), ZoneKind::Field);
        let forest = state.create_card(Arc::new(catalog::forest()), p0(), ZoneKind::Field);
        let theirs = state.create_card(Arc::new(catalog::llanowar_elves()), PlayerId::new(1), ZoneKind::Field);

        let subject = Subject::card(p0(), elf);
        let other_elf = CardPattern::Subtype("Elf".into())
            .and(CardPattern::Other)
            .and(CardPattern::YouControl);

        assert!(!other_elf.matches(elf, &state, &subject));
        assert!(!other_elf.matches(forest, &state, &subject));
        assert!(!other_elf.matches(theirs, &state, &subject));
        assert!(CardPattern::IsSelf.matches(elf, &state, &subject));

        let land_or_elf = CardPattern::Type(CardType::Land).or(CardPattern::Named("Llanowar Elves".into()));
        assert!(land_or_elf.matches(forest, &state, &subject));
        assert!(land_or_elf.matches(theirs, &state, &subject));
        assert!(!CardPattern::Not(Box::new(land_or_elf)).matches(elf, &state, &subject));
    }

    #[test]
    fn test_compare_uses_candidate() {
        let mut state = GameState::new(1, 20);
        let elf = state.create_card(Arc::new(catalog::llanowar_elves()), p0(), ZoneKind::Field);
        let wall = state.create_card(Arc::new(catalog::wall_of_roots()), p0(), ZoneKind::Field);

        let big_butt = CardPattern::compare(IntGetter::Toughness, Comparison::Ge, 4);
        let subject = Subject::player(p0());
        assert!(big_butt.matches(wall, &state, &subject));
        assert!(!big_butt.matches(elf, &state, &subject));
    }

    #[test]
    fn test_player_patterns() {
        let state = GameState::new(2, 20);
        let subject = Subject::player(PlayerId::new(1));

        assert!(PlayerPattern::You.matches(PlayerId::new(1), &state, &subject));
        assert!(PlayerPattern::Opponent.matches(PlayerId::new(0), &state, &subject));
        assert!(PlayerPattern::Active.matches(PlayerId::new(0), &state, &subject));

        let low_life = PlayerPattern::compare(IntGetter::Life, Comparison::Le, 10);
        assert!(!low_life.matches(PlayerId::new(0), &state, &subject));
    }

    #[test]
    fn test_nested_counts() {
        let mut state = GameState::new(2, 20);
        state.create_card(Arc::new(catalog::forest()), p0(), ZoneKind::Field);
        state.player_mut(PlayerId::new(1)).life = 0;

        // Lands on the field of every player still alive.
        let living_lands = IntGetter::CountCards {
            zone: ZoneRef::Relative {
                players: PlayerPattern::compare(IntGetter::Life, Comparison::Gt, 0),
                kind: ZoneKind::Field,
            },
            pattern: CardPattern::Type(CardType::Land),
        };
        let two_lands = PlayerPattern::compare(living_lands.clone(), Comparison::Ge, 2);
        let wall_beside_lands =
            CardPattern::compare(living_lands, Comparison::Ge, 1).and(CardPattern::Named("Wall of Roots".into()));

        let subject = Subject::player(p0());
        assert!(!two_lands.matches(p0(), &state, &subject));
        state.create_card(Arc::new(catalog::forest()), PlayerId::new(1), ZoneKind::Field);
        assert!(!two_lands.matches(p0(), &state, &subject));
        state.create_card(Arc::new(catalog::forest()), p0(), ZoneKind::Field);
        assert!(two_lands.matches(p0(), &state, &subject));

        let wall = state.create_card(Arc::new(catalog::wall_of_roots()), p0(), ZoneKind::Field);
        assert!(wall_beside_lands.matches(wall, &state, &subject));
    }

    #[test]
    fn test_verb_pattern() {
        let mut state = GameState::new(1, 20);
        let visionary = state.create_card(Arc::new(catalog::elvish_visionary()), p0(), ZoneKind::Field);
        let other = state.create_card(Arc::new(catalog::llanowar_elves()), p0(), ZoneKind::Field);

        let enters = VerbPattern::self_enters();
        let watcher = Subject::card(p0(), visionary);
        let to_field = Verb::move_to(ZoneKind::Field);

        assert!(enters.matches(&to_field, &Subject::card(p0(), visionary), &state, &watcher));
        assert!(!enters.matches(&to_field, &Subject::card(p0(), other), &state, &watcher));
        assert!(!enters.matches(&Verb::Tap, &Subject::card(p0(), visionary), &state, &watcher));
    }
}
