//! Play-tree search: breadth-first exploration of every reachable state.
//!
//! ## Key Types
//!
//! - `PlayTree`: runs the search turn by turn and answers goal queries
//! - `StateTracker`: one turn's distinct states, active queue and end states
//! - `SearchConfig`: turn limit and per-turn budgets
//! - `SearchStats`: per-turn counts and elapsed time
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use goldfish::cards::catalog;
//! use goldfish::core::{GameState, PlayerId};
//! use goldfish::search::{PlayTree, SearchConfig};
//! use goldfish::zones::ZoneKind;
//!
//! let mut state = GameState::new(1, 20);
//! let p0 = PlayerId::new(0);
//! state.create_card(Arc::new(catalog::forest()), p0, ZoneKind::Hand);
//! state.create_card(Arc::new(catalog::forest()), p0, ZoneKind::Deck);
//!
//! let mut tree = PlayTree::new(state, SearchConfig::default().with_turn_limit(2));
//! tree.run();
//! assert!(tree.can_reach_mana(2, 2));
//! ```

pub mod config;
pub mod stats;
pub mod tracker;
pub mod tree;

pub use config::SearchConfig;
pub use stats::{SearchStats, TurnStats};
pub use tracker::StateTracker;
pub use tree::PlayTree;
