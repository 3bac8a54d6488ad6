//! Game rules: legal actions, how they apply, and turn progression.
//!
//! Everything here is a function of a state and a [`Chooser`]. Nothing in
//! this module decides anything on its own.
//!
//! [`Chooser`]: crate::query::Chooser

pub mod engine;
pub mod turn;

pub use engine::{apply_action, get_valid_activations, get_valid_castables, legal_actions};
pub use turn::{beginning_phase, draw, untap, upkeep};
