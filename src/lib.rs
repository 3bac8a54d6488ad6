//! # goldfish
//!
//! A rules engine for a Magic-like card game, and an exhaustive explorer of
//! the states one player can reach from a starting hand.
//!
//! ## Design Principles
//!
//! 1. **States are values**: a `GameState` is copied before every branching
//!    step and never shared mutably between branches. Copies are O(1) through
//!    `im-rs` persistent vectors.
//!
//! 2. **Branching is enumeration**: anything with more than one outcome
//!    returns all of them. Decisions are delegated to a `Chooser`, which may
//!    keep every option (search) or narrow to one (bots, replays).
//!
//! 3. **One algebra for costs and effects**: paying for a spell, tapping a
//!    land and drawing a card are all `Verb`s, composed with the same
//!    combinators and checked the same way.
//!
//! ## Architecture
//!
//! - **Canonical identity**: `GameState::id` builds a string from the
//!   visible contents of the game. Equal ids mean interchangeable states,
//!   which is what the play tree dedups on.
//!
//! - **Two-tier resolution**: simultaneous triggers wait on the super-stack
//!   until their order is chosen, then resolve from the stack one at a time.
//!
//! - **Terminal outcomes as values**: wins and losses travel as
//!   `Err(GameOver)` inside branch results and end up in the play tree's
//!   win or loss sets.
//!
//! ## Modules
//!
//! - `core`: handles, players, state, actions, RNG, configuration, errors
//! - `mana`: colors, pools, costs and payment
//! - `zones`: zone kinds and owner-relative zone references
//! - `cards`: card designs, physical cards, registry, catalog, decklists
//! - `query`: choices, choosers, getters and patterns
//! - `verbs`: the verb algebra and costs
//! - `abilities`: activated, triggered, timed and static abilities
//! - `stack`: stack objects, super-stack clearing, resolution
//! - `rules`: legal actions and turn steps
//! - `search`: the breadth-first play tree

pub mod core;
pub mod mana;
pub mod zones;
pub mod cards;
pub mod query;
pub mod verbs;
pub mod abilities;
pub mod stack;
pub mod rules;
pub mod search;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, CardRef, EngineError, GameConfig, GameOver, GameRng, GameState, Outcome, PlayerId,
    PlayerMap,
};

pub use crate::mana::{Color, ManaCost, ManaPool};

pub use crate::zones::{ZoneKind, ZoneRef};

pub use crate::cards::{build_game, CardRegistry, CardType, Cardboard, Decklist, Keyword, RulesText};

pub use crate::query::{CardPattern, Choice, ChoiceList, Chooser, EnumerateAll, FirstOption, Getter, Subject};

pub use crate::verbs::{Branch, Cost, Step, Verb};

pub use crate::abilities::{ActivatedAbility, StaticAbility, TimedAbility, TriggeredAbility};

pub use crate::stack::{clear_super_stack, resolve_top_of_stack, StackObject};

pub use crate::rules::{apply_action, beginning_phase, legal_actions};

pub use crate::search::{PlayTree, SearchConfig, SearchStats, StateTracker};
