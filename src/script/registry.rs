//! Name-keyed variant registry.
//!
//! Maps a variant identifier to a script factory. Selecting a variant
//! constructs a fresh script, which then drives `build_piles` and
//! `start_game`. Restoring a snapshot goes through the same lookup so
//! role references are always re-derived, never deserialized.

use rustc_hash::FxHashMap;

use super::{GameScript, Toad};

/// Constructs a fresh script for one variant.
pub type ScriptFactory = fn() -> Box<dyn GameScript>;

/// Registry of known variants.
#[derive(Clone, Default)]
pub struct VariantRegistry {
    factories: FxHashMap<String, ScriptFactory>,
    /// Registration order, for stable menu listings.
    order: Vec<String>,
}

impl VariantRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in variant registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("Toad", || Box::new(Toad::new()));
        registry
    }

    /// Register a variant. Re-registering a name replaces its factory.
    pub fn register(&mut self, name: impl Into<String>, factory: ScriptFactory) {
        let name = name.into();
        if self.factories.insert(name.clone(), factory).is_none() {
            self.order.push(name);
        }
    }

    /// Construct a fresh script for a variant, if known.
    #[must_use]
    pub fn create(&self, name: &str) -> Option<Box<dyn GameScript>> {
        self.factories.get(name).map(|factory| factory())
    }

    /// True if a variant is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Variant names in registration order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_include_toad() {
        let registry = VariantRegistry::with_builtins();
        assert!(registry.contains("Toad"));
        assert_eq!(registry.names(), &["Toad".to_string()]);

        let script = registry.create("Toad").unwrap();
        assert_eq!(script.name(), "Toad");
    }

    #[test]
    fn test_unknown_variant() {
        let registry = VariantRegistry::with_builtins();
        assert!(registry.create("Klondike").is_none());
        assert!(!registry.contains("Klondike"));
    }

    #[test]
    fn test_reregistration_keeps_order() {
        let mut registry = VariantRegistry::with_builtins();
        registry.register("Toad", || Box::new(Toad::new()));
        assert_eq!(registry.names().len(), 1);
    }
}
