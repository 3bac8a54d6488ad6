//! Core engine types: handles, players, state, actions, RNG, configuration.
//!
//! Everything else in the crate reads or writes a [`GameState`]; this module
//! holds it together with the small value types it is built from.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionRecord};
pub use config::GameConfig;
pub use entity::CardRef;
pub use error::{EngineError, GameOver, Outcome};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{GameState, PlayerState};
