//! The verb algebra: every cost, effect and ability body is a [`Verb`].
//!
//! ## Inputs
//!
//! A verb reads its decisions from a flat, positional [`Choice`] list.
//! [`Verb::num_inputs`] says how many entries it consumes: one per
//! parameterizing getter plus whatever its sub-verbs consume. Composite
//! verbs hand each sub-verb its own slice of the list.
//!
//! ## Branching
//!
//! [`Verb::do_it`] never touches the state it is given. It returns one
//! [`Branch`] per outcome: an empty vector means the verb could not be done,
//! and `Err(GameOver)` means the branch ended the game. A verb whose getters
//! all have exactly one value ([`Verb::mutates`]) has a single outcome, so
//! callers holding a `&mut GameState` may use [`Verb::do_in_place`] instead
//! of branching.
//!
//! ## Triggers
//!
//! Every atomic verb, once it has acted, scans hand, field and graveyard for
//! triggered abilities that match it and queues them on the super-stack.
//! Composite verbs get this for free through their atomic parts.

mod atomic;
mod composite;
pub mod cost;

pub use cost::Cost;

use smallvec::smallvec;

use crate::core::{GameOver, GameState};
use crate::mana::{ManaCost, ManaPool};
use crate::query::{Choice, ChoiceList, Chooser, EnumerateAll, FirstOption, Getter, IntGetter, Subject};
use crate::zones::ZoneKind;

/// Kind of an atomic verb, as seen by trigger patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerbTag {
    Tap,
    Untap,
    AddCounter,
    /// A move into the given zone.
    MoveTo(ZoneKind),
    AddMana,
    PayMana,
    LoseLife,
    GainLife,
    DrawCard,
    WinTheGame,
    LoseTheGame,
}

/// A unit of game action.
#[derive(Clone, Debug, PartialEq)]
pub enum Verb {
    // === Atomic ===
    /// Does nothing. Always legal.
    Null,
    /// Tap the subject card.
    Tap,
    /// Untap the subject card.
    Untap,
    /// The tap symbol: tap, and creatures must not be summoning sick.
    TapSymbol,
    /// Put a counter on the subject card.
    AddCounter(String),
    /// Mark the subject card as activated this turn. Illegal if it already is.
    ActivateOncePerTurn,
    /// Move the subject card, optionally only from one zone.
    MoveTo { from: Option<ZoneKind>, to: ZoneKind },
    /// Add mana to the asking player's pool.
    AddMana(Getter),
    /// Pay a mana cost from the asking player's pool.
    PayMana(ManaCost),
    LoseLife(Getter),
    GainLife(Getter),
    /// Draw the top card. Drawing from an empty deck loses the game.
    DrawCard,
    WinTheGame,
    LoseTheGame,

    // === Composite ===
    /// Each verb in order.
    Many(Vec<Verb>),
    /// One of the verbs, picked by an index choice.
    ChooseOne(Vec<Verb>),
    /// The verb `times` times, on the same inner choices.
    Repeat { verb: Box<Verb>, times: Getter },
    /// The verb, acting on a chosen card instead of the subject card.
    OnTarget { verb: Box<Verb>, target: Getter },
    /// Split the cards `options` offers into a chosen selection and the rest,
    /// then run `chosen` on each selected card and `unchosen` on the others.
    OnSplitList {
        options: Getter,
        chosen: Box<Verb>,
        unchosen: Box<Verb>,
    },
}

/// One outcome of a verb: the resulting state, who acted, and the choices
/// the verb did not consume.
#[derive(Clone, Debug)]
pub struct Step {
    pub state: GameState,
    pub subject: Subject,
    pub rest: ChoiceList,
}

/// An outcome, or the end of the game.
pub type Branch = Result<Step, GameOver>;

/// Result of executing on a state in place: `Some(consumed)` when the verb
/// was done, `None` when it was illegal.
pub type Executed = Result<Option<usize>, GameOver>;

impl Verb {
    // === Constructors ===

    /// Move the subject card to `to` from wherever it is.
    #[must_use]
    pub fn move_to(to: ZoneKind) -> Verb {
        Verb::MoveTo { from: None, to }
    }

    /// Put the subject permanent into its owner's graveyard.
    #[must_use]
    pub fn sacrifice() -> Verb {
        Verb::MoveTo {
            from: Some(ZoneKind::Field),
            to: ZoneKind::Grave,
        }
    }

    /// Put the subject card from hand into the graveyard.
    #[must_use]
    pub fn discard() -> Verb {
        Verb::MoveTo {
            from: Some(ZoneKind::Hand),
            to: ZoneKind::Grave,
        }
    }

    /// Add a fixed amount of mana.
    #[must_use]
    pub fn add_mana(pool: ManaPool) -> Verb {
        Verb::AddMana(Getter::Const(Choice::Mana(pool)))
    }

    /// Lose a fixed amount of life.
    #[must_use]
    pub fn lose_life(amount: i64) -> Verb {
        Verb::LoseLife(Getter::Int(IntGetter::Const(amount)))
    }

    /// Gain a fixed amount of life.
    #[must_use]
    pub fn gain_life(amount: i64) -> Verb {
        Verb::GainLife(Getter::Int(IntGetter::Const(amount)))
    }

    /// Run `verb` a fixed number of times.
    #[must_use]
    pub fn times(verb: Verb, n: i64) -> Verb {
        Verb::repeat(verb, IntGetter::Const(n))
    }

    /// Run `verb` as many times as `count` says.
    #[must_use]
    pub fn repeat(verb: Verb, count: IntGetter) -> Verb {
        Verb::Repeat {
            verb: Box::new(verb),
            times: Getter::Int(count),
        }
    }

    /// Run `verb` on a card chosen from `target`.
    #[must_use]
    pub fn on_target(verb: Verb, target: Getter) -> Verb {
        Verb::OnTarget {
            verb: Box::new(verb),
            target,
        }
    }

    /// Split a card selection.
    ///
    /// Panics if either branch needs choices of its own: the split verbs run
    /// once per card with nothing left to read.
    #[must_use]
    pub fn on_split_list(options: Getter, chosen: Verb, unchosen: Verb) -> Verb {
        assert!(
            chosen.num_inputs() == 0 && unchosen.num_inputs() == 0,
            "split-list verbs must not take choices"
        );
        Verb::OnSplitList {
            options,
            chosen: Box::new(chosen),
            unchosen: Box::new(unchosen),
        }
    }

    // === Shape ===

    /// Check if this verb is a leaf of the algebra.
    #[must_use]
    pub fn is_atomic(&self) -> bool {
        !matches!(
            self,
            Verb::Many(_)
                | Verb::ChooseOne(_)
                | Verb::Repeat { .. }
                | Verb::OnTarget { .. }
                | Verb::OnSplitList { .. }
        )
    }

    /// Trigger-visible kind. `None` for composites and for verbs nothing can
    /// trigger on.
    #[must_use]
    pub fn tag(&self) -> Option<VerbTag> {
        match self {
            Verb::Tap | Verb::TapSymbol => Some(VerbTag::Tap),
            Verb::Untap => Some(VerbTag::Untap),
            Verb::AddCounter(_) => Some(VerbTag::AddCounter),
            Verb::MoveTo { to, .. } => Some(VerbTag::MoveTo(*to)),
            Verb::AddMana(_) => Some(VerbTag::AddMana),
            Verb::PayMana(_) => Some(VerbTag::PayMana),
            Verb::LoseLife(_) => Some(VerbTag::LoseLife),
            Verb::GainLife(_) => Some(VerbTag::GainLife),
            Verb::DrawCard => Some(VerbTag::DrawCard),
            Verb::WinTheGame => Some(VerbTag::WinTheGame),
            Verb::LoseTheGame => Some(VerbTag::LoseTheGame),
            Verb::Null | Verb::ActivateOncePerTurn => None,
            Verb::Many(_)
            | Verb::ChooseOne(_)
            | Verb::Repeat { .. }
            | Verb::OnTarget { .. }
            | Verb::OnSplitList { .. } => None,
        }
    }

    /// Number of positional choices this verb consumes.
    #[must_use]
    pub fn num_inputs(&self) -> usize {
        match self {
            Verb::AddMana(_) | Verb::LoseLife(_) | Verb::GainLife(_) => 1,
            Verb::Many(verbs) => verbs.iter().map(Verb::num_inputs).sum(),
            Verb::ChooseOne(verbs) => 1 + verbs.iter().map(Verb::num_inputs).max().unwrap_or(0),
            Verb::Repeat { verb, .. } | Verb::OnTarget { verb, .. } => 1 + verb.num_inputs(),
            Verb::OnSplitList { .. } => 1,
            _ => 0,
        }
    }

    /// Check if this verb has exactly one possible outcome.
    ///
    /// True iff every getter it or its sub-verbs use has a single value.
    /// Choosing a mode or splitting a selection is always a decision.
    #[must_use]
    pub fn mutates(&self) -> bool {
        match self {
            Verb::AddMana(g) | Verb::LoseLife(g) | Verb::GainLife(g) => g.is_single_output(),
            Verb::Many(verbs) => verbs.iter().all(Verb::mutates),
            Verb::Repeat { verb, times: g } | Verb::OnTarget { verb, target: g } => {
                g.is_single_output() && verb.mutates()
            }
            Verb::ChooseOne(_) | Verb::OnSplitList { .. } => false,
            _ => true,
        }
    }

    /// Check if running this verb adds mana.
    #[must_use]
    pub fn produces_mana(&self) -> bool {
        match self {
            Verb::AddMana(_) => true,
            Verb::Many(verbs) | Verb::ChooseOne(verbs) => verbs.iter().any(Verb::produces_mana),
            Verb::Repeat { verb, .. } => verb.produces_mana(),
            Verb::OnSplitList { chosen, unchosen, .. } => chosen.produces_mana() || unchosen.produces_mana(),
            _ => false,
        }
    }

    /// Check if this verb chooses a target.
    #[must_use]
    pub fn has_targets(&self) -> bool {
        match self {
            Verb::OnTarget { .. } => true,
            Verb::Many(verbs) | Verb::ChooseOne(verbs) => verbs.iter().any(Verb::has_targets),
            Verb::Repeat { verb, .. } => verb.has_targets(),
            _ => false,
        }
    }

    // === Legality ===

    /// Check if the verb can be done with these choices. Never mutates.
    ///
    /// Atomic verbs check their preconditions directly. Composite verbs are
    /// run on a scratch copy, so this agrees exactly with [`Verb::do_it`]
    /// being non-empty. With no choices, a verb that needs some can be done
    /// if any option [`Verb::populate_options`] finds can.
    #[must_use]
    pub fn can_be_done(&self, state: &GameState, subject: &Subject, choices: &[Choice]) -> bool {
        if choices.is_empty() && self.num_inputs() > 0 {
            return self
                .populate_options(state, subject, &EnumerateAll)
                .iter()
                .filter(|options| !options.is_empty())
                .any(|options| self.can_be_done(state, subject, options));
        }
        if self.is_atomic() {
            return atomic::can_be_done(self, state, subject, choices);
        }
        let mut probe = state.clone();
        !matches!(self.execute(&mut probe, subject, choices), Ok(None))
    }

    // === Execution ===

    /// Run the verb, one branch per outcome. `state` is left untouched.
    ///
    /// With no choices, a verb that needs some branches over every option
    /// [`Verb::populate_options`] finds.
    #[must_use]
    pub fn do_it(&self, state: &GameState, subject: &Subject, choices: &[Choice]) -> Vec<Branch> {
        if choices.is_empty() && self.num_inputs() > 0 {
            return self
                .populate_options(state, subject, &EnumerateAll)
                .iter()
                .filter(|options| !options.is_empty())
                .flat_map(|options| self.do_it(state, subject, options))
                .collect();
        }

        let mut next = state.clone();
        match self.execute(&mut next, subject, choices) {
            Ok(Some(used)) => vec![Ok(Step {
                state: next,
                subject: *subject,
                rest: choices[used.min(choices.len())..].iter().cloned().collect(),
            })],
            Ok(None) => Vec::new(),
            Err(over) => vec![Err(over)],
        }
    }

    /// Run a single-outcome verb directly on `state`.
    ///
    /// Returns `Ok(false)`, leaving `state` untouched, if the verb cannot be
    /// done. Panics if the verb has more than one outcome.
    pub fn do_in_place(&self, state: &mut GameState, subject: &Subject) -> Result<bool, GameOver> {
        assert!(self.mutates(), "in-place execution of a branching verb");
        let choices: ChoiceList = self
            .populate_options(state, subject, &FirstOption)
            .into_iter()
            .next()
            .unwrap_or_default();
        if !self.can_be_done(state, subject, &choices) {
            return Ok(false);
        }
        Ok(self.execute(state, subject, &choices)?.is_some())
    }

    /// Run the verb on `state` itself.
    ///
    /// On `Ok(None)` or `Err` the state may be partly changed; callers own a
    /// scratch copy or have checked [`Verb::can_be_done`] first.
    pub fn execute(&self, state: &mut GameState, subject: &Subject, choices: &[Choice]) -> Executed {
        if self.is_atomic() {
            atomic::execute(self, state, subject, choices)
        } else {
            composite::execute(self, state, subject, choices)
        }
    }

    // === Options ===

    /// Every full choice list this verb could be given, narrowed by
    /// `chooser`. A verb with no inputs has one option: the empty list.
    #[must_use]
    pub fn populate_options(&self, state: &GameState, subject: &Subject, chooser: &dyn Chooser) -> Vec<ChoiceList> {
        match self {
            Verb::AddMana(getter) | Verb::LoseLife(getter) | Verb::GainLife(getter) => getter
                .options(state, subject, chooser)
                .into_iter()
                .map(|choice| smallvec![choice])
                .collect(),
            Verb::Many(verbs) => verbs.iter().fold(vec![ChoiceList::new()], |acc, verb| {
                let tails = verb.populate_options(state, subject, chooser);
                acc.iter()
                    .flat_map(|head| {
                        tails.iter().map(move |tail| {
                            let mut joined = head.clone();
                            joined.extend(tail.iter().cloned());
                            joined
                        })
                    })
                    .collect()
            }),
            _ => composite::populate_options(self, state, subject, chooser),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::cards::catalog;
    use crate::core::PlayerId;
    use crate::mana::Color;

    fn p0() -> PlayerId {
        PlayerId::new(0)
    }

    #[test]
    fn test_num_inputs() {
        let any_color = Getter::OneOf(
            Color::COLORS
                .iter()
                .map(|&c| Choice::Mana(ManaPool::of(c, 1)))
                .collect(),
        );
        assert_eq!(Verb::Tap.num_inputs(), 0);
        assert_eq!(Verb::AddMana(any_color.clone()).num_inputs(), 1);
        assert_eq!(
            Verb::Many(vec![Verb::Tap, Verb::AddMana(any_color.clone()), Verb::lose_life(1)]).num_inputs(),
            2
        );
        assert_eq!(
            Verb::ChooseOne(vec![Verb::Tap, Verb::Many(vec![Verb::lose_life(1), Verb::gain_life(1)])]).num_inputs(),
            3
        );
        assert_eq!(Verb::times(Verb::AddMana(any_color), 3).num_inputs(), 2);
    }

    #[test]
    fn test_mutates() {
        assert!(Verb::Tap.mutates());
        assert!(Verb::Many(vec![Verb::Tap, Verb::add_mana(ManaPool::of(Color::G, 1))]).mutates());
        assert!(!Verb::ChooseOne(vec![Verb::Tap]).mutates());
        assert!(!Verb::AddMana(Getter::OneOf(vec![Choice::Mana(ManaPool::new())])).mutates());
    }

    #[test]
    fn test_tags() {
        assert_eq!(Verb::TapSymbol.tag(), Some(VerbTag::Tap));
        assert_eq!(Verb::sacrifice().tag(), Some(VerbTag::MoveTo(ZoneKind::Grave)));
        assert_eq!(Verb::Many(vec![Verb::Tap]).tag(), None);
        assert_eq!(Verb::ActivateOncePerTurn.tag(), None);
    }

    #[test]
    fn test_do_it_leaves_input_alone() {
        let mut state = GameState::new(1, 20);
        let forest = state.create_card(Arc::new(catalog::forest()), p0(), ZoneKind::Field);
        let subject = Subject::card(p0(), forest);
        let before = state.id();

        let branches = Verb::Tap.do_it(&state, &subject, &[]);
        assert_eq!(branches.len(), 1);
        assert_eq!(state.id(), before);

        let step = branches.into_iter().next().unwrap().unwrap();
        assert!(step.state.card(forest).tapped);
        assert!(step.rest.is_empty());
    }

    #[test]
    fn test_do_it_returns_rest() {
        let state = GameState::new(1, 20);
        let subject = Subject::player(p0());
        let choices = [Choice::Int(2), Choice::Int(7)];

        let verb = Verb::LoseLife(Getter::OneOf(vec![Choice::Int(2), Choice::Int(3)]));
        let branches = verb.do_it(&state, &subject, &choices);
        let step = branches.into_iter().next().unwrap().unwrap();
        assert_eq!(step.state.player(p0()).life, 18);
        assert_eq!(step.rest.as_slice(), &[Choice::Int(7)]);
    }

    #[test]
    fn test_do_it_fans_out_without_choices() {
        let state = GameState::new(1, 20);
        let verb = Verb::AddMana(Getter::OneOf(vec![
            Choice::Mana(ManaPool::of(Color::G, 1)),
            Choice::Mana(ManaPool::of(Color::B, 1)),
        ]));

        let branches = verb.do_it(&state, &Subject::player(p0()), &[]);
        let pools: Vec<String> = branches
            .into_iter()
            .map(|b| b.unwrap().state.player(p0()).pool.to_string())
            .collect();
        assert_eq!(pools, vec!["G", "B"]);
    }

    #[test]
    fn test_illegal_is_empty() {
        let mut state = GameState::new(1, 20);
        let forest = state.create_card(Arc::new(catalog::forest()), p0(), ZoneKind::Field);
        state.card_mut(forest).tapped = true;

        assert!(Verb::Tap.do_it(&state, &Subject::card(p0(), forest), &[]).is_empty());
        assert!(!Verb::Tap.can_be_done(&state, &Subject::card(p0(), forest), &[]));
    }

    #[test]
    fn test_do_in_place() {
        let mut state = GameState::new(1, 20);
        let subject = Subject::player(p0());

        assert!(Verb::lose_life(3).do_in_place(&mut state, &subject).unwrap());
        assert_eq!(state.player(p0()).life, 17);

        assert!(!Verb::PayMana("G".parse().unwrap()).do_in_place(&mut state, &subject).unwrap());
    }

    #[test]
    fn test_draw_from_empty_deck_loses() {
        let state = GameState::new(1, 20);
        let branches = Verb::DrawCard.do_it(&state, &Subject::player(p0()), &[]);

        assert_eq!(branches.len(), 1);
        let over = branches.into_iter().next().unwrap().unwrap_err();
        assert_eq!(over.player, p0());
        assert_eq!(over.outcome, crate::core::Outcome::Loss);
    }
}
