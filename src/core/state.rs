//! Game state: the root aggregate every operation reads and branches.
//!
//! ## Layout
//!
//! - A card arena (`im::Vector<Cardboard>`) addressed by [`CardRef`] handles
//! - Per-player zones (deck, hand, field, graveyard) holding handles
//! - Per-player life, floating mana, land drop and spells-cast counters
//! - The stack and the super-stack of pending objects
//! - Turn number and active player
//! - An optional history log
//!
//! ## Copy semantics
//!
//! Every collection is persistent, so `clone()` is O(1) and shares structure
//! with the original until one side writes. Because all cross-references are
//! arena handles, a clone is a full graph copy: a stack object pointing at a
//! field card in the original points at the clone's card in the clone.
//!
//! ## Identity
//!
//! Equality and hashing go through [`GameState::id`], a canonical string that
//! sorts the unordered zones. Two states with the same id are interchangeable
//! for search purposes.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use im::Vector;

use super::action::ActionRecord;
use super::config::GameConfig;
use super::entity::CardRef;
use super::error::EngineError;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{Cardboard, RulesText};
use crate::mana::ManaPool;
use crate::stack::StackObject;
use crate::zones::ZoneKind;

/// Everything one player owns.
#[derive(Clone, Debug)]
pub struct PlayerState {
    /// Life total.
    pub life: i64,

    /// Floating mana.
    pub pool: ManaPool,

    /// A land was played this turn.
    pub land_played: bool,

    /// Spells cast this turn (storm count).
    pub spells_cast: u32,

    /// Library. Front is the top.
    deck: Vector<CardRef>,
    hand: Vector<CardRef>,
    field: Vector<CardRef>,
    grave: Vector<CardRef>,
}

impl PlayerState {
    fn new(life: i64) -> Self {
        Self {
            life,
            pool: ManaPool::new(),
            land_played: false,
            spells_cast: 0,
            deck: Vector::new(),
            hand: Vector::new(),
            field: Vector::new(),
            grave: Vector::new(),
        }
    }

    /// Cards in one of this player's zones.
    ///
    /// `None` for zones that are not player-owned lists (the stack, limbo).
    #[must_use]
    pub fn zone(&self, kind: ZoneKind) -> Option<&Vector<CardRef>> {
        match kind {
            ZoneKind::Deck => Some(&self.deck),
            ZoneKind::Hand => Some(&self.hand),
            ZoneKind::Field => Some(&self.field),
            ZoneKind::Grave => Some(&self.grave),
            ZoneKind::Stack | ZoneKind::New => None,
        }
    }

    fn zone_mut(&mut self, kind: ZoneKind) -> Option<&mut Vector<CardRef>> {
        match kind {
            ZoneKind::Deck => Some(&mut self.deck),
            ZoneKind::Hand => Some(&mut self.hand),
            ZoneKind::Field => Some(&mut self.field),
            ZoneKind::Grave => Some(&mut self.grave),
            ZoneKind::Stack | ZoneKind::New => None,
        }
    }
}

/// Complete game state.
#[derive(Clone, Debug)]
pub struct GameState {
    // === Cards ===
    cards: Vector<Cardboard>,

    // === Players ===
    players: PlayerMap<PlayerState>,

    // === Resolution ===
    /// Objects waiting to resolve. Back is the top.
    pub stack: Vector<StackObject>,

    /// Simultaneous triggers whose stack order is not decided yet.
    pub super_stack: Vector<StackObject>,

    // === Progression ===
    /// Turn number (starts at 1).
    pub turn: u32,

    /// Whose turn it is.
    pub active_player: PlayerId,

    // === History ===
    track_history: bool,
    history: Vector<ActionRecord>,
}

impl GameState {
    /// Create an empty table.
    #[must_use]
    pub fn new(player_count: usize, starting_life: i64) -> Self {
        Self {
            cards: Vector::new(),
            players: PlayerMap::new(player_count, |_| PlayerState::new(starting_life)),
            stack: Vector::new(),
            super_stack: Vector::new(),
            turn: 1,
            active_player: PlayerId::new(0),
            track_history: false,
            history: Vector::new(),
        }
    }

    /// Create an empty table from a validated configuration.
    pub fn from_config(config: &GameConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let mut state = Self::new(config.player_count, config.starting_life);
        state.track_history = config.track_history;
        Ok(state)
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.player_count())
    }

    /// Player data.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    /// Mutable player data.
    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    // === Card Arena ===

    /// Resolve a card handle.
    ///
    /// Panics on a dangling handle: handles are only minted by this state's
    /// arena, so a miss is a corrupted card definition.
    #[must_use]
    pub fn card(&self, card: CardRef) -> &Cardboard {
        self.cards
            .get(card.index())
            .unwrap_or_else(|| panic!("dangling card handle {card}"))
    }

    /// Resolve a card handle for writing. Copies the card if it is shared
    /// with another state.
    pub fn card_mut(&mut self, card: CardRef) -> &mut Cardboard {
        self.cards
            .get_mut(card.index())
            .unwrap_or_else(|| panic!("dangling card handle {card}"))
    }

    /// Number of cards in the arena.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Iterate over every card handle.
    pub fn card_refs(&self) -> impl Iterator<Item = CardRef> {
        (0..self.cards.len() as u32).map(CardRef::new)
    }

    /// Create a new physical card and put it into `zone`.
    pub fn create_card(&mut self, rules: Arc<RulesText>, owner: PlayerId, zone: ZoneKind) -> CardRef {
        let card = CardRef::new(self.cards.len() as u32);
        self.cards.push_back(Cardboard::new(rules, owner));
        self.move_card(card, zone);
        card
    }

    // === Zones ===

    /// Cards in a player's zone. Empty for the stack and limbo.
    pub fn zone(&self, player: PlayerId, kind: ZoneKind) -> impl Iterator<Item = CardRef> + '_ {
        self.players[player]
            .zone(kind)
            .into_iter()
            .flat_map(|cards| cards.iter().copied())
    }

    /// Number of cards in a player's zone.
    #[must_use]
    pub fn zone_size(&self, player: PlayerId, kind: ZoneKind) -> usize {
        self.players[player].zone(kind).map_or(0, Vector::len)
    }

    /// Move a card to `to`, updating both zone lists and the card itself.
    ///
    /// Entering the field makes a card summoning sick. Leaving it clears tap
    /// state and counters. Cards put into a deck go on top.
    pub fn move_card(&mut self, card: CardRef, to: ZoneKind) {
        let (owner, from) = {
            let cardboard = self.card(card);
            (cardboard.owner, cardboard.zone)
        };

        if let Some(list) = self.players[owner].zone_mut(from) {
            if let Some(pos) = list.index_of(&card) {
                list.remove(pos);
            }
        }

        if let Some(list) = self.players[owner].zone_mut(to) {
            match to {
                ZoneKind::Deck => list.push_front(card),
                _ => list.push_back(card),
            }
        }

        let cardboard = self.card_mut(card);
        if from == ZoneKind::Field && to != ZoneKind::Field {
            cardboard.reset();
        }
        if to == ZoneKind::Field && from != ZoneKind::Field {
            cardboard.summon_sick = true;
        }
        cardboard.zone = to;
    }

    /// Top card of a player's deck.
    #[must_use]
    pub fn top_of_deck(&self, player: PlayerId) -> Option<CardRef> {
        self.players[player].deck.front().copied()
    }

    // === Resolution ===

    /// Check if both the stack and the super-stack are empty.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        self.stack.is_empty() && self.super_stack.is_empty()
    }

    // === History ===

    /// Check if actions are being logged.
    #[must_use]
    pub fn tracks_history(&self) -> bool {
        self.track_history
    }

    /// Enable or disable the history log.
    pub fn set_track_history(&mut self, track: bool) {
        self.track_history = track;
    }

    /// Append to the history log if it is enabled. The description is only
    /// built when it will be kept.
    pub fn record(&mut self, player: PlayerId, describe: impl FnOnce(&GameState) -> String) {
        if self.track_history {
            let record = ActionRecord::new(player, self.turn, describe(self));
            self.history.push_back(record);
        }
    }

    /// The history log.
    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    // === Identity ===

    /// Canonical id string.
    ///
    /// `T{turn}P{active}` followed, for each player, by
    /// `|life|L{land}|S{storm}|(pool)|D{deck count}|H:..|F:..|G:..` with
    /// hand, field and graveyard card ids sorted; then `|K:` and the stack
    /// bottom to top, and `|SS:` with the super-stack when it is not empty.
    /// The history log is not part of the id.
    #[must_use]
    pub fn id(&self) -> String {
        let mut id = format!("T{}P{}", self.turn, self.active_player.0);

        for (_, player) in self.players.iter() {
            id.push_str(&format!(
                "|{}|L{}|S{}|({})|D{}",
                player.life,
                u8::from(player.land_played),
                player.spells_cast,
                player.pool,
                player.deck.len()
            ));
            for (label, cards) in [("H", &player.hand), ("F", &player.field), ("G", &player.grave)] {
                let mut ids: Vec<String> = cards.iter().map(|&c| self.card(c).id()).collect();
                ids.sort_unstable();
                id.push_str(&format!("|{label}:{}", ids.join(",")));
            }
        }

        let stack: Vec<String> = self.stack.iter().map(|obj| obj.id(self)).collect();
        id.push_str(&format!("|K:{}", stack.join(";")));

        if !self.super_stack.is_empty() {
            let pending: Vec<String> = self.super_stack.iter().map(|obj| obj.id(self)).collect();
            id.push_str(&format!("|SS:{}", pending.join(";")));
        }

        id
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for GameState {}

impl Hash for GameState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}
