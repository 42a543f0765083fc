use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::traits::KeyValueStore;

/// Volatile key-value store kept entirely in memory
///
/// Used by tests and by runs that should not touch the disk. Clones share
/// the same underlying map.
#[derive(Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// All keys currently stored, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryKeyValueStore::new();
        assert_eq!(store.get("profiles").unwrap(), None);

        store.set("profiles", "[]").unwrap();
        assert_eq!(store.get("profiles").unwrap(), Some("[]".to_string()));
        assert!(store.contains("profiles").unwrap());

        store.set("profiles", "[1]").unwrap();
        assert_eq!(store.get("profiles").unwrap(), Some("[1]".to_string()));

        store.remove("profiles").unwrap();
        assert!(!store.contains("profiles").unwrap());

        // Removing twice is fine
        store.remove("profiles").unwrap();
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryKeyValueStore::new();
        let other = store.clone();
        other.set("currentProfile", "{}").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.keys(), vec!["currentProfile".to_string()]);
    }
}
