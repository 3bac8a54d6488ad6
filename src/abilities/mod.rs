//! Abilities attached to card designs.
//!
//! - [`ActivatedAbility`]: a cost and an effect, used at will.
//! - [`TriggeredAbility`]: watches executed verbs and queues its effect on
//!   the super-stack when its pattern matches.
//! - [`TimedAbility`]: checked at the active player's upkeep.
//! - [`StaticAbility`]: never runs; the getter layer consults it.

pub mod activated;
pub mod static_ability;
pub mod timed;
pub mod triggered;

pub use activated::ActivatedAbility;
pub use static_ability::{Modifier, StatQuery, StaticAbility};
pub use timed::TimedAbility;
pub use triggered::TriggeredAbility;
