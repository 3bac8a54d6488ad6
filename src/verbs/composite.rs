//! Composite verbs: sequencing, modes, repetition, retargeting and splits.
//!
//! Choice layout, per verb:
//!
//! | verb          | choices                                  |
//! |---------------|------------------------------------------|
//! | `Many`        | each sub-verb's choices, concatenated    |
//! | `ChooseOne`   | `[Index(i)] ++ choices of verb i`        |
//! | `Repeat`      | `[Int(n)] ++ inner choices` (used n times)|
//! | `OnTarget`    | `[Card(t)] ++ inner choices`             |
//! | `OnSplitList` | `[Cards(selection)]`                     |

use crate::core::GameState;
use crate::query::{choose_exactly_one, Choice, ChoiceList, Chooser, Subject};

use super::{Executed, Verb};

pub(super) fn execute(verb: &Verb, state: &mut GameState, subject: &Subject, choices: &[Choice]) -> Executed {
    match verb {
        Verb::Many(verbs) => {
            let mut used = 0;
            for sub in verbs {
                match sub.execute(state, subject, &choices[used.min(choices.len())..])? {
                    Some(n) => used += n,
                    None => return Ok(None),
                }
            }
            Ok(Some(used))
        }

        Verb::ChooseOne(verbs) => {
            let Some(sub) = choices.first().and_then(Choice::as_index).and_then(|i| verbs.get(i)) else {
                return Ok(None);
            };
            Ok(sub.execute(state, subject, &choices[1..])?.map(|n| n + 1))
        }

        Verb::Repeat { verb: inner, times } => {
            let Some(first) = choices.first() else {
                return Ok(None);
            };
            let Some(n) = first.as_int().filter(|&n| n >= 0) else {
                return Ok(None);
            };
            if !times.accepts(state, subject, first) {
                return Ok(None);
            }
            let inner_choices = &choices[1..];
            let mut used = inner.num_inputs().min(inner_choices.len());
            for _ in 0..n {
                match inner.execute(state, subject, inner_choices)? {
                    Some(k) => used = k,
                    None => return Ok(None),
                }
            }
            Ok(Some(1 + used))
        }

        Verb::OnTarget { verb: inner, target } => {
            let Some(first) = choices.first() else {
                return Ok(None);
            };
            let Some(card) = first.as_card() else {
                return Ok(None);
            };
            if !target.accepts(state, subject, first) {
                return Ok(None);
            }
            let redirected = subject.with_card(card);
            Ok(inner.execute(state, &redirected, &choices[1..])?.map(|n| n + 1))
        }

        Verb::OnSplitList {
            options,
            chosen,
            unchosen,
        } => {
            let Some(first) = choices.first() else {
                return Ok(None);
            };
            let Some(selection) = first.as_cards() else {
                return Ok(None);
            };
            if !options.accepts(state, subject, first) {
                return Ok(None);
            }
            let candidates: Vec<_> = options
                .candidates(state, subject)
                .iter()
                .filter_map(Choice::as_card)
                .collect();
            for card in candidates {
                let sub = if selection.contains(&card) { chosen } else { unchosen };
                if sub.execute(state, &subject.with_card(card), &[])?.is_none() {
                    return Ok(None);
                }
            }
            Ok(Some(1))
        }

        atomic => panic!("not a composite verb: {atomic:?}"),
    }
}

/// Options for composites other than `Many`.
pub(super) fn populate_options(
    verb: &Verb,
    state: &GameState,
    subject: &Subject,
    chooser: &dyn Chooser,
) -> Vec<ChoiceList> {
    let prefixed = |head: Choice, tails: Vec<ChoiceList>| -> Vec<ChoiceList> {
        tails
            .into_iter()
            .map(|tail| {
                let mut list = ChoiceList::new();
                list.push(head.clone());
                list.extend(tail);
                list
            })
            .collect()
    };

    match verb {
        Verb::ChooseOne(verbs) => {
            let modes: Vec<usize> = (0..verbs.len()).collect();
            choose_exactly_one(chooser, &modes)
                .into_iter()
                .flat_map(|i| prefixed(Choice::Index(i), verbs[i].populate_options(state, subject, chooser)))
                .collect()
        }

        Verb::Repeat { verb: inner, times } => {
            let tails = inner.populate_options(state, subject, chooser);
            times
                .options(state, subject, chooser)
                .into_iter()
                .flat_map(|n| prefixed(n, tails.clone()))
                .collect()
        }

        Verb::OnTarget { verb: inner, target } => target
            .options(state, subject, chooser)
            .into_iter()
            .filter_map(|choice| choice.as_card().map(|card| (choice, card)))
            .flat_map(|(choice, card)| {
                prefixed(choice, inner.populate_options(state, &subject.with_card(card), chooser))
            })
            .collect(),

        Verb::OnSplitList { options, .. } => options
            .options(state, subject, chooser)
            .into_iter()
            .map(|selection| {
                let mut list = ChoiceList::new();
                list.push(selection);
                list
            })
            .collect(),

        _ => vec![ChoiceList::new()],
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::cards::{catalog, CardType};
    use crate::core::{GameState, PlayerId};
    use crate::mana::{Color, ManaPool};
    use crate::query::{CardPattern, Choice, EnumerateAll, Getter, IntGetter, Subject};
    use crate::verbs::Verb;
    use crate::zones::{ZoneKind, ZoneRef};

    fn p0() -> PlayerId {
        PlayerId::new(0)
    }

    fn green() -> Verb {
        Verb::add_mana(ManaPool::of(Color::G, 1))
    }

    #[test]
    fn test_many_is_all_or_nothing() {
        let state = GameState::new(1, 20);
        let subject = Subject::player(p0());

        let pay_then_add = Verb::Many(vec![Verb::PayMana("G".parse().unwrap()), green()]);
        assert!(pay_then_add.do_it(&state, &subject, &[]).is_empty());

        let add_then_pay = Verb::Many(vec![green(), Verb::PayMana("G".parse().unwrap())]);
        let branches = add_then_pay.do_it(&state, &subject, &[]);
        assert_eq!(branches.len(), 1);
    }

    #[test]
    fn test_choose_one_branches_per_mode() {
        let state = GameState::new(1, 20);
        let subject = Subject::player(p0());
        let modal = Verb::ChooseOne(vec![Verb::lose_life(2), Verb::gain_life(3)]);

        let options = modal.populate_options(&state, &subject, &EnumerateAll);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].as_slice(), &[Choice::Index(0), Choice::Int(2)]);

        let lives: Vec<i64> = modal
            .do_it(&state, &subject, &[])
            .into_iter()
            .map(|b| b.unwrap().state.player(p0()).life)
            .collect();
        assert_eq!(lives, vec![18, 23]);
    }

    #[test]
    fn test_repeat_reuses_inner_choices() {
        let state = GameState::new(1, 20);
        let subject = Subject::player(p0());
        let three_of_one = Verb::Repeat {
            verb: Box::new(Verb::AddMana(Getter::OneOf(vec![
                Choice::Mana(ManaPool::of(Color::G, 1)),
                Choice::Mana(ManaPool::of(Color::U, 1)),
            ]))),
            times: Getter::Int(IntGetter::Const(3)),
        };

        let choices = [Choice::Int(3), Choice::Mana(ManaPool::of(Color::U, 1))];
        let branches = three_of_one.do_it(&state, &subject, &choices);
        let step = branches.into_iter().next().unwrap().unwrap();
        assert_eq!(step.state.player(p0()).pool.to_string(), "UUU");
        assert!(step.rest.is_empty());

        // The count must be the one the getter computes.
        assert!(!three_of_one.can_be_done(&state, &subject, &[Choice::Int(4), Choice::Mana(ManaPool::of(Color::U, 1))]));
    }

    #[test]
    fn test_repeat_zero_times() {
        let state = GameState::new(1, 20);
        let verb = Verb::times(green(), 0);
        let step = verb
            .do_it(&state, &Subject::player(p0()), &[])
            .into_iter()
            .next()
            .unwrap()
            .unwrap();
        assert!(step.state.player(p0()).pool.is_empty());
    }

    #[test]
    fn test_on_target_redirects() {
        let mut state = GameState::new(1, 20);
        let source = state.create_card(Arc::new(catalog::llanowar_elves()), p0(), ZoneKind::Field);
        let forest = state.create_card(Arc::new(catalog::forest()), p0(), ZoneKind::Field);

        let untap_land = Verb::on_target(
            Verb::Untap,
            Getter::Card {
                zone: ZoneRef::yours(ZoneKind::Field),
                pattern: CardPattern::Type(CardType::Land),
            },
        );
        state.card_mut(forest).tapped = true;

        let subject = Subject::card(p0(), source);
        let branches = untap_land.do_it(&state, &subject, &[]);
        assert_eq!(branches.len(), 1);
        let step = branches.into_iter().next().unwrap().unwrap();
        assert!(!step.state.card(forest).tapped);

        // Not a legal target.
        assert!(!untap_land.can_be_done(&state, &subject, &[Choice::Card(source)]));
    }

    #[test]
    fn test_split_list() {
        let mut state = GameState::new(1, 20);
        let forest = state.create_card(Arc::new(catalog::forest()), p0(), ZoneKind::Deck);
        let swamp = state.create_card(Arc::new(catalog::swamp()), p0(), ZoneKind::Deck);

        let tutor = Verb::on_split_list(
            Getter::CardsUpTo {
                zone: ZoneRef::yours(ZoneKind::Deck),
                pattern: CardPattern::Type(CardType::Land),
                max: 1,
            },
            Verb::move_to(ZoneKind::Hand),
            Verb::Null,
        );
        let subject = Subject::player(p0());

        let branches = tutor.do_it(&state, &subject, &[]);
        assert_eq!(branches.len(), 3);

        let step = tutor
            .do_it(&state, &subject, &[Choice::Cards(vec![swamp])])
            .into_iter()
            .next()
            .unwrap()
            .unwrap();
        assert_eq!(step.state.card(swamp).zone, ZoneKind::Hand);
        assert_eq!(step.state.card(forest).zone, ZoneKind::Deck);
    }
}
