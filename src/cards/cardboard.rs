//! Physical cards.
//!
//! A `Cardboard` is one copy of a card in one game state: its shared
//! `RulesText` plus everything that can differ between copies (zone, tap
//! state, summoning sickness, counters).
//!
//! ## Counters
//!
//! Counters are strings kept in sorted order so two cards with the same
//! counters have the same id regardless of the order they were added.
//!
//! - `+X/+Y` and `-X/-Y` adjust power and toughness.
//! - Counters starting with `@` are bookkeeping markers ("activated this
//!   turn"); the untap step strips them.

use std::sync::Arc;

use crate::core::PlayerId;
use crate::zones::ZoneKind;

use super::rules_text::RulesText;

/// Prefix of bookkeeping counters cleared every untap.
pub const INVISIBLE_PREFIX: char = '@';

/// Marker left by once-per-turn activations.
pub const ACTIVATED_MARKER: &str = "@activated";

/// One physical card.
#[derive(Clone, Debug)]
pub struct Cardboard {
    /// Shared design.
    pub rules: Arc<RulesText>,

    /// Owner (and controller).
    pub owner: PlayerId,

    /// Current zone.
    pub zone: ZoneKind,

    /// Tapped.
    pub tapped: bool,

    /// Came under its controller's control this turn.
    pub summon_sick: bool,

    counters: Vec<String>,
}

impl Cardboard {
    /// A fresh card not yet in any zone.
    #[must_use]
    pub fn new(rules: Arc<RulesText>, owner: PlayerId) -> Self {
        Self {
            rules,
            owner,
            zone: ZoneKind::New,
            tapped: false,
            summon_sick: false,
            counters: Vec::new(),
        }
    }

    /// Card name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.rules.name
    }

    /// Replace the design (animation effects). The old design is untouched.
    pub fn set_rules(&mut self, rules: Arc<RulesText>) {
        self.rules = rules;
    }

    // === Counters ===

    /// All counters, sorted.
    #[must_use]
    pub fn counters(&self) -> &[String] {
        &self.counters
    }

    /// Add a counter.
    pub fn add_counter(&mut self, counter: impl Into<String>) {
        let counter = counter.into();
        let pos = self.counters.partition_point(|c| *c <= counter);
        self.counters.insert(pos, counter);
    }

    /// Remove one copy of a counter. Returns false if there was none.
    pub fn remove_counter(&mut self, counter: &str) -> bool {
        match self.counters.iter().position(|c| c == counter) {
            Some(pos) => {
                self.counters.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Check for at least one copy of a counter.
    #[must_use]
    pub fn has_counter(&self, counter: &str) -> bool {
        self.counters.iter().any(|c| c == counter)
    }

    /// Number of copies of a counter.
    #[must_use]
    pub fn count_counters(&self, counter: &str) -> usize {
        self.counters.iter().filter(|c| *c == counter).count()
    }

    /// Remove every bookkeeping counter.
    pub fn strip_invisible(&mut self) {
        self.counters.retain(|c| !c.starts_with(INVISIBLE_PREFIX));
    }

    /// Net power/toughness change from `+X/+Y` style counters.
    #[must_use]
    pub fn pt_delta(&self) -> (i64, i64) {
        self.counters
            .iter()
            .filter_map(|c| parse_pt(c))
            .fold((0, 0), |(p, t), (dp, dt)| (p + dp, t + dt))
    }

    /// Untap, clear sickness and drop all counters (leaving the field).
    pub fn reset(&mut self) {
        self.tapped = false;
        self.summon_sick = false;
        self.counters.clear();
    }

    // === Identity ===

    /// Canonical id: type code, name, `(T)` if tapped, `(S)` if summoning
    /// sick, sorted counters in brackets, and `:` plus the zone code.
    #[must_use]
    pub fn id(&self) -> String {
        let mut id = String::with_capacity(self.rules.name.len() + 8);
        id.push(self.rules.type_code());
        id.push_str(&self.rules.name);
        if self.tapped {
            id.push_str("(T)");
        }
        if self.summon_sick {
            id.push_str("(S)");
        }
        if !self.counters.is_empty() {
            id.push('[');
            id.push_str(&self.counters.join(","));
            id.push(']');
        }
        id.push(':');
        id.push(self.zone.code());
        id
    }

    /// Value equality: same canonical id. Not identity.
    #[must_use]
    pub fn is_equivalent(&self, other: &Cardboard) -> bool {
        self.id() == other.id()
    }
}

fn parse_pt(counter: &str) -> Option<(i64, i64)> {
    let (power, toughness) = counter.split_once('/')?;
    if !(power.starts_with(['+', '-']) && toughness.starts_with(['+', '-'])) {
        return None;
    }
    Some((power.parse().ok()?, toughness.parse().ok()?))
}
