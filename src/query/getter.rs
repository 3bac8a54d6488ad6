//! Getters: static-effect-aware queries over a state.
//!
//! ## Numbers
//!
//! [`IntGetter`] computes one number for a subject. Power and toughness go
//! through [`power`]/[`toughness`], which add counters to the printed value
//! and then pass it through every active static modifier. That is how "other
//! Elves get +1/+1" works without touching the cards it pumps.
//!
//! ## Choices
//!
//! [`Getter`] supplies the options for one positional choice of a verb.
//! Constant and number getters have exactly one output; the rest produce a
//! candidate list that a [`Chooser`] narrows.

use crate::abilities::static_ability::{modified_int, modified_keywords, StatQuery};
use crate::cards::Keyword;
use crate::core::{CardRef, GameState};
use crate::zones::{ZoneKind, ZoneRef};

use super::choice::Choice;
use super::chooser::{choose_exactly_one, choose_n_or_fewer, Chooser};
use super::pattern::{CardPattern, PlayerPattern};
use super::Subject;

// =============================================================================
// Static-aware card stats
// =============================================================================

/// Power after counters and static effects.
#[must_use]
pub fn power(state: &GameState, card: CardRef) -> i64 {
    let cardboard = state.card(card);
    let base = cardboard.rules.power.unwrap_or(0) + cardboard.pt_delta().0;
    modified_int(state, StatQuery::Power, card, base)
}

/// Toughness after counters and static effects.
#[must_use]
pub fn toughness(state: &GameState, card: CardRef) -> i64 {
    let cardboard = state.card(card);
    let base = cardboard.rules.toughness.unwrap_or(0) + cardboard.pt_delta().1;
    modified_int(state, StatQuery::Toughness, card, base)
}

/// Keywords after static grants, deduplicated.
#[must_use]
pub fn keywords(state: &GameState, card: CardRef) -> Vec<Keyword> {
    modified_keywords(state, card, state.card(card).rules.keywords.clone())
}

/// Check for a keyword, printed or granted.
#[must_use]
pub fn has_keyword(state: &GameState, card: CardRef, keyword: Keyword) -> bool {
    keywords(state, card).contains(&keyword)
}

// =============================================================================
// IntGetter
// =============================================================================

/// A number derived from the state and the asking subject.
#[derive(Clone, Debug, PartialEq)]
pub enum IntGetter {
    /// A fixed number.
    Const(i64),

    // === Of the subject card (0 without one) ===
    Power,
    Toughness,
    ManaValue,
    /// Copies of a counter on the subject card.
    Counters(String),

    // === Of the asking player ===
    Life,
    HandSize,
    DeckSize,
    /// Spells cast this turn.
    SpellsCast,

    /// Cards in `zone` matching `pattern`.
    CountCards { zone: ZoneRef, pattern: CardPattern },

    /// Sum of several getters.
    Sum(Vec<IntGetter>),
}

impl IntGetter {
    /// Evaluate for `subject`.
    #[must_use]
    pub fn get(&self, state: &GameState, subject: &Subject) -> i64 {
        match self {
            IntGetter::Const(n) => *n,
            IntGetter::Power => subject.card.map_or(0, |c| power(state, c)),
            IntGetter::Toughness => subject.card.map_or(0, |c| toughness(state, c)),
            IntGetter::ManaValue => subject
                .card
                .map_or(0, |c| i64::from(state.card(c).rules.mana_value())),
            IntGetter::Counters(name) => subject
                .card
                .map_or(0, |c| state.card(c).count_counters(name) as i64),
            IntGetter::Life => state.player(subject.player).life,
            IntGetter::HandSize => state.zone_size(subject.player, ZoneKind::Hand) as i64,
            IntGetter::DeckSize => state.zone_size(subject.player, ZoneKind::Deck) as i64,
            IntGetter::SpellsCast => i64::from(state.player(subject.player).spells_cast),
            IntGetter::CountCards { zone, pattern } => zone
                .cards(state, subject)
                .into_iter()
                .filter(|&c| pattern.matches(c, state, subject))
                .count() as i64,
            IntGetter::Sum(parts) => parts.iter().map(|g| g.get(state, subject)).sum(),
        }
    }
}

// =============================================================================
// Getter
// =============================================================================

/// Supplies the options for one positional choice.
#[derive(Clone, Debug, PartialEq)]
pub enum Getter {
    /// Always this value.
    Const(Choice),

    /// A computed number.
    Int(IntGetter),

    /// One of a fixed list ("one mana of any color").
    OneOf(Vec<Choice>),

    /// One card in `zone` matching `pattern`.
    Card { zone: ZoneRef, pattern: CardPattern },

    /// Up to `max` cards in `zone` matching `pattern`, as one selection.
    CardsUpTo {
        zone: ZoneRef,
        pattern: CardPattern,
        max: usize,
    },

    /// One player matching a pattern.
    Player(PlayerPattern),

    /// One value from each getter.
    Pair(Box<Getter>, Box<Getter>),

    /// `n` values from the same getter, order ignored ("two mana in any
    /// combination of colors").
    Repeat(Box<Getter>, usize),
}

impl Getter {
    /// Check if this getter can only ever produce one value.
    #[must_use]
    pub fn is_single_output(&self) -> bool {
        match self {
            Getter::Const(_) | Getter::Int(_) => true,
            Getter::Pair(a, b) => a.is_single_output() && b.is_single_output(),
            Getter::Repeat(inner, _) => inner.is_single_output(),
            Getter::OneOf(_) | Getter::Card { .. } | Getter::CardsUpTo { .. } | Getter::Player(_) => false,
        }
    }

    /// Every legal value, before any narrowing.
    ///
    /// For `CardsUpTo` these are the individual cards a selection is drawn
    /// from, not the selections.
    #[must_use]
    pub fn candidates(&self, state: &GameState, subject: &Subject) -> Vec<Choice> {
        match self {
            Getter::Const(choice) => vec![choice.clone()],
            Getter::Int(getter) => vec![Choice::Int(getter.get(state, subject))],
            Getter::OneOf(options) => options.clone(),
            Getter::Card { zone, pattern } | Getter::CardsUpTo { zone, pattern, .. } => zone
                .cards(state, subject)
                .into_iter()
                .filter(|&c| pattern.matches(c, state, subject))
                .map(Choice::Card)
                .collect(),
            Getter::Player(pattern) => state
                .player_ids()
                .filter(|&p| pattern.matches(p, state, subject))
                .map(Choice::Player)
                .collect(),
            Getter::Pair(a, b) => {
                let right = b.candidates(state, subject);
                a.candidates(state, subject)
                    .into_iter()
                    .flat_map(|x| right.iter().map(move |y| Choice::List(vec![x.clone(), y.clone()])))
                    .collect()
            }
            Getter::Repeat(inner, n) => {
                let base = inner.candidates(state, subject);
                multisets(&base, *n)
                    .into_iter()
                    .map(Choice::List)
                    .collect()
            }
        }
    }

    /// Options after the chooser has narrowed them. One entry per branch.
    #[must_use]
    pub fn options(&self, state: &GameState, subject: &Subject, chooser: &dyn Chooser) -> Vec<Choice> {
        let candidates = self.candidates(state, subject);
        match self {
            _ if self.is_single_output() => candidates,
            Getter::CardsUpTo { max, .. } => {
                let cards: Vec<CardRef> = candidates.iter().filter_map(Choice::as_card).collect();
                choose_n_or_fewer(chooser, &cards, *max)
                    .into_iter()
                    .map(Choice::Cards)
                    .collect()
            }
            _ => choose_exactly_one(chooser, &candidates),
        }
    }

    /// Check if `choice` is still a legal value.
    #[must_use]
    pub fn accepts(&self, state: &GameState, subject: &Subject, choice: &Choice) -> bool {
        let candidates = self.candidates(state, subject);
        match self {
            Getter::CardsUpTo { max, .. } => choice.as_cards().is_some_and(|cards| {
                cards.len() <= *max && cards.iter().all(|c| candidates.contains(&Choice::Card(*c)))
            }),
            _ => candidates.contains(choice),
        }
    }
}

/// Every size-`n` multiset of `items`, as non-decreasing index sequences.
fn multisets(items: &[Choice], n: usize) -> Vec<Vec<Choice>> {
    fn extend(items: &[Choice], start: usize, left: usize, current: &mut Vec<Choice>, out: &mut Vec<Vec<Choice>>) {
        if left == 0 {
            out.push(current.clone());
            return;
        }
        for i in start..items.len() {
            current.push(items[i].clone());
            extend(items, i, left - 1, current, out);
            current.pop();
        }
    }

    let mut out = Vec::new();
    extend(items, 0, n, &mut Vec::with_capacity(n), &mut out);
    out
}
