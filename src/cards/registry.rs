//! Card registry for design lookup by name.
//!
//! The `CardRegistry` maps card names to shared [`RulesText`]s. Every
//! physical copy dealt from a decklist points at the same design.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::catalog;
use super::rules_text::{CardType, RulesText};
use crate::core::EngineError;

/// Registry of card designs.
///
/// ## Example
///
/// ```
/// use goldfish::cards::{CardRegistry, RulesText};
///
/// let mut registry = CardRegistry::new();
/// registry.register(RulesText::land("Wastes"));
///
/// let found = registry.lookup("Wastes").unwrap();
/// assert_eq!(found.name, "Wastes");
/// assert!(registry.lookup("Black Lotus").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<String, Arc<RulesText>>,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in design.
    #[must_use]
    pub fn with_catalog() -> Self {
        let mut registry = Self::new();
        for rules in catalog::all() {
            registry.register(rules);
        }
        registry
    }

    /// Register a design.
    ///
    /// Panics if a design with the same name already exists.
    pub fn register(&mut self, rules: RulesText) -> Arc<RulesText> {
        if self.cards.contains_key(&rules.name) {
            panic!("Card named {:?} already registered", rules.name);
        }
        let rules = Arc::new(rules);
        self.cards.insert(rules.name.clone(), Arc::clone(&rules));
        rules
    }

    /// Get a design by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Arc<RulesText>> {
        self.cards.get(name)
    }

    /// Get a design by name, as a setup error if it is missing.
    pub fn lookup(&self, name: &str) -> Result<Arc<RulesText>, EngineError> {
        self.get(name)
            .cloned()
            .ok_or_else(|| EngineError::UnknownCard(name.to_string()))
    }

    /// Check if a name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cards.contains_key(name)
    }

    /// Get the number of registered designs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all designs.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<RulesText>> {
        self.cards.values()
    }

    /// Find designs by type.
    pub fn find_by_type(&self, card_type: CardType) -> impl Iterator<Item = &Arc<RulesText>> {
        self.cards.values().filter(move |r| r.is_type(card_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = CardRegistry::new();
        registry.register(catalog::forest());

        assert!(registry.get("Forest").is_some());
        assert!(registry.get("Island").is_none());
        assert_eq!(
            registry.lookup("Island").unwrap_err(),
            EngineError::UnknownCard("Island".into())
        );
    }

    #[test]
    fn test_copies_share_design() {
        let registry = CardRegistry::with_catalog();
        let a = registry.lookup("Llanowar Elves").unwrap();
        let b = registry.lookup("Llanowar Elves").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_name_panics() {
        let mut registry = CardRegistry::new();
        registry.register(catalog::forest());
        registry.register(catalog::forest());
    }

    #[test]
    fn test_find_by_type() {
        let registry = CardRegistry::with_catalog();
        let lands: Vec<_> = registry.find_by_type(CardType::Land).collect();
        assert_eq!(lands.len(), 3);
        assert_eq!(registry.len(), catalog::all().len());
    }
}
