//! Leaf verbs: precondition checks and state changes.

use tracing::trace;

use crate::abilities::triggered::queue_triggers;
use crate::cards::{CardType, Keyword, ACTIVATED_MARKER};
use crate::core::{CardRef, GameOver, GameState};
use crate::query::getter::has_keyword;
use crate::query::{Choice, Subject};
use crate::zones::{Zone, ZoneKind};

use super::{Executed, Verb};

pub(super) fn can_be_done(verb: &Verb, state: &GameState, subject: &Subject, choices: &[Choice]) -> bool {
    let card = || subject.card.map(|c| (c, state.card(c)));
    match verb {
        Verb::Null | Verb::DrawCard | Verb::WinTheGame | Verb::LoseTheGame => true,
        Verb::Tap => card().is_some_and(|(_, cb)| cb.zone == ZoneKind::Field && !cb.tapped),
        Verb::TapSymbol => card().is_some_and(|(c, cb)| {
            cb.zone == ZoneKind::Field && !cb.tapped && !is_sick(state, c)
        }),
        Verb::Untap => card().is_some_and(|(_, cb)| cb.zone == ZoneKind::Field && cb.tapped),
        Verb::AddCounter(_) => card().is_some_and(|(_, cb)| cb.zone != ZoneKind::New),
        Verb::ActivateOncePerTurn => card().is_some_and(|(_, cb)| !cb.has_counter(ACTIVATED_MARKER)),
        Verb::MoveTo { from, to } => card().is_some_and(|(_, cb)| {
            cb.zone != *to && from.map_or(true, |zone| cb.zone == zone)
        }),
        Verb::AddMana(getter) => choices
            .first()
            .is_some_and(|c| c.as_mana().is_some() && getter.accepts(state, subject, c)),
        Verb::PayMana(cost) => state.player(subject.player).pool.can_pay(cost),
        Verb::LoseLife(getter) | Verb::GainLife(getter) => choices.first().is_some_and(|c| {
            c.as_int().is_some_and(|n| n >= 0) && getter.accepts(state, subject, c)
        }),
        composite => panic!("not an atomic verb: {composite:?}"),
    }
}

/// Summoning sickness only stops creatures without haste.
fn is_sick(state: &GameState, card: CardRef) -> bool {
    let cardboard = state.card(card);
    cardboard.summon_sick
        && cardboard.rules.is_type(CardType::Creature)
        && !has_keyword(state, card, Keyword::Haste)
}

pub(super) fn execute(verb: &Verb, state: &mut GameState, subject: &Subject, choices: &[Choice]) -> Executed {
    if !can_be_done(verb, state, subject, choices) {
        return Ok(None);
    }
    let acted = apply(verb, state, subject, choices)?;
    trace!(verb = ?verb.tag(), player = %acted.player, "verb done");
    if verb.tag().is_some() {
        queue_triggers(state, verb, &acted);
    }
    Ok(Some(verb.num_inputs()))
}

/// Change the state. Returns what the verb acted on, for trigger matching.
fn apply(verb: &Verb, state: &mut GameState, subject: &Subject, choices: &[Choice]) -> Result<Subject, GameOver> {
    let player = subject.player;
    let mut acted = *subject;

    // Legality has been checked, so card verbs have a card and choice verbs
    // a well-formed first choice.
    let target = || subject.card.unwrap_or_else(|| panic!("{verb:?} needs a subject card"));
    let first = || choices.first().unwrap_or_else(|| panic!("{verb:?} needs a choice"));

    match verb {
        Verb::Null => {}
        Verb::Tap | Verb::TapSymbol => state.card_mut(target()).tapped = true,
        Verb::Untap => state.card_mut(target()).tapped = false,
        Verb::AddCounter(counter) => state.card_mut(target()).add_counter(counter.as_str()),
        Verb::ActivateOncePerTurn => state.card_mut(target()).add_counter(ACTIVATED_MARKER),
        Verb::MoveTo { to, .. } => {
            let card = target();
            let (owner, from) = {
                let cardboard = state.card(card);
                (cardboard.owner, cardboard.zone)
            };
            acted.player = owner;
            Zone::of(owner, from).remove(state, card);
            Zone::of(owner, *to).add(state, card);
        }
        Verb::AddMana(_) => {
            let mana = first().as_mana().unwrap_or_default();
            state.player_mut(player).pool.add(&mana);
        }
        Verb::PayMana(cost) => {
            state.player_mut(player).pool.pay(cost);
        }
        Verb::LoseLife(_) => state.player_mut(player).life -= first().as_int().unwrap_or(0),
        Verb::GainLife(_) => state.player_mut(player).life += first().as_int().unwrap_or(0),
        Verb::DrawCard => match state.top_of_deck(player) {
            Some(card) => {
                Zone::of(player, ZoneKind::Deck).remove(state, card);
                Zone::of(player, ZoneKind::Hand).add(state, card);
                acted.card = Some(card);
            }
            None => return Err(GameOver::loss(state.clone(), player)),
        },
        Verb::WinTheGame => return Err(GameOver::win(state.clone(), player)),
        Verb::LoseTheGame => return Err(GameOver::loss(state.clone(), player)),
        composite => panic!("not an atomic verb: {composite:?}"),
    }
    Ok(acted)
}
