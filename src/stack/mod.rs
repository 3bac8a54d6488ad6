//! Stack and super-stack resolution.
//!
//! ## Two tiers
//!
//! - The **stack** holds spells and abilities in the order they will
//!   resolve, top last. Players see it and may respond to it.
//! - The **super-stack** holds triggers that went off together and are not
//!   ordered yet. Clearing it is how a controller picks the order of
//!   simultaneous triggers: every order is a branch.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use goldfish::cards::catalog;
//! use goldfish::core::{GameState, PlayerId};
//! use goldfish::query::{ChoiceList, EnumerateAll};
//! use goldfish::stack::{resolve_top_of_stack, StackObject};
//! use goldfish::zones::ZoneKind;
//!
//! let mut state = GameState::new(1, 20);
//! let p0 = PlayerId::new(0);
//! let ritual = state.create_card(Arc::new(catalog::dark_ritual()), p0, ZoneKind::Stack);
//! state.stack.push_back(StackObject::spell(p0, ritual, ChoiceList::new()));
//!
//! let outcomes = resolve_top_of_stack(&state, &EnumerateAll);
//! let after = outcomes[0].as_ref().unwrap();
//! assert_eq!(after.player(p0).pool.to_string(), "BBB");
//! assert_eq!(after.card(ritual).zone, ZoneKind::Grave);
//! ```

mod object;
mod resolution;

pub use object::{StackKind, StackObject};
pub use resolution::{clear_super_stack, resolve_top_of_stack, state_based_actions, Resolved};
