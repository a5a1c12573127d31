//! A generic named registry. Instances are constructed explicitly and
//! passed to whoever needs them; there is no process-global instance map.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// A keyed collection of shared entries, safe for concurrent access.
pub struct Registry<T> {
    name: String,
    entries: RwLock<BTreeMap<String, Arc<T>>>,
}

impl<T> Registry<T> {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register an entry under `key`. Replacing an existing entry is
    /// allowed but logged, since it usually means two plugins collided.
    pub fn register(&self, key: impl Into<String>, value: T) -> Arc<T> {
        let key = key.into();
        let value = Arc::new(value);
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        if entries.insert(key.clone(), Arc::clone(&value)).is_some() {
            log::warn!("registry {}: entry '{key}' was replaced", self.name);
        }
        value
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(key)
    }

    /// Snapshot of every registered entry, sorted by key.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, Arc<T>)> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(k, v)| (k.clone(), Arc::clone(v)))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_get() {
        let registry = Registry::new("effects");
        registry.register("helix", 1u32);
        registry.register("ripples", 2u32);
        assert_eq!(registry.get("helix").as_deref(), Some(&1));
        assert!(registry.get("missing").is_none());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn replacement_keeps_latest() {
        let registry = Registry::new("themes");
        registry.register("dark", "v1");
        registry.register("dark", "v2");
        assert_eq!(registry.get("dark").as_deref(), Some(&"v2"));
        assert_eq!(registry.len(), 1);
    }
}
