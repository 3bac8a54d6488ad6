//! Mana primitives: colors, floating pools and costs.
//!
//! Pure value types with no dependency on game state.

mod cost;
mod pool;

pub use cost::ManaCost;
pub use pool::{Color, ManaPool};
