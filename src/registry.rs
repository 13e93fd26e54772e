//! Per-injector binding registry
//!
//! Uses DashMap keyed by [`Identifier`]. The registry only knows about its
//! own bindings; walking the parent chain is the injector's job.

use crate::binding::Binding;
use crate::{DiError, Identifier, Result};
use ahash::RandomState;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

/// Map from identifier to binding, owned by exactly one injector.
pub(crate) struct Registry {
    bindings: DashMap<Identifier, Arc<Binding>, RandomState>,
}

impl Registry {
    /// Create new empty registry.
    ///
    /// Uses 8 shards; injectors rarely hold more than a few dozen bindings.
    #[inline]
    pub fn new() -> Self {
        Self {
            bindings: DashMap::with_capacity_and_hasher_and_shard_amount(
                0,
                RandomState::new(),
                8,
            ),
        }
    }

    /// Store a new unconfigured binding.
    ///
    /// Fails with `DuplicateMapping` when the identifier is already bound here.
    pub fn create(&self, identifier: Identifier) -> Result<Arc<Binding>> {
        match self.bindings.entry(identifier) {
            Entry::Occupied(entry) => Err(DiError::DuplicateMapping {
                identifier: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                let binding = Arc::new(Binding::new(entry.key().clone()));
                entry.insert(Arc::clone(&binding));
                Ok(binding)
            }
        }
    }

    /// Insert a prepared binding, replacing any existing one
    #[inline]
    pub fn install(&self, binding: Binding) {
        self.bindings
            .insert(binding.identifier().clone(), Arc::new(binding));
    }

    /// Local binding for `identifier`, if any
    #[inline]
    pub fn lookup_local(&self, identifier: &Identifier) -> Option<Arc<Binding>> {
        self.bindings.get(identifier).map(|b| Arc::clone(b.value()))
    }

    /// Check if identifier is bound here
    #[inline]
    pub fn contains_local(&self, identifier: &Identifier) -> bool {
        self.bindings.contains_key(identifier)
    }

    /// Remove a binding; returns whether one was present
    #[inline]
    pub fn remove_local(&self, identifier: &Identifier) -> bool {
        self.bindings.remove(identifier).is_some()
    }

    /// Drop every binding
    #[inline]
    pub fn clear(&self) {
        self.bindings.clear();
    }

    /// Get number of bindings
    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All locally bound identifiers, in no particular order
    pub fn identifiers(&self) -> Vec<Identifier> {
        self.bindings.iter().map(|r| r.key().clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_lookup() {
        let registry = Registry::new();
        let id = Identifier::new("widget");

        let created = registry.create(id.clone()).unwrap();
        let found = registry.lookup_local(&id).unwrap();

        assert!(Arc::ptr_eq(&created, &found));
        assert!(!found.is_configured());
    }

    #[test]
    fn test_create_rejects_duplicates() {
        let registry = Registry::new();
        registry.create(Identifier::named("widget", "blue")).unwrap();

        let err = registry
            .create(Identifier::named("widget", "blue"))
            .unwrap_err();
        assert!(matches!(err, DiError::DuplicateMapping { .. }));

        // Different name, different identifier
        assert!(registry.create(Identifier::new("widget")).is_ok());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove() {
        let registry = Registry::new();
        let id = Identifier::new("widget");
        registry.create(id.clone()).unwrap();

        assert!(registry.contains_local(&id));
        assert!(registry.remove_local(&id));
        assert!(!registry.contains_local(&id));
        assert!(!registry.remove_local(&id));
    }

    #[test]
    fn test_install_replaces() {
        let registry = Registry::new();
        let id = Identifier::new("widget");
        registry.create(id.clone()).unwrap();

        registry.install(Binding::with_value(id.clone(), Arc::new(5u8)));

        let binding = registry.lookup_local(&id).unwrap();
        assert!(binding.is_configured());
        assert_eq!(registry.len(), 1);
    }
}
