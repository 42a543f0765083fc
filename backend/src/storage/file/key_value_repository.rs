use anyhow::{Context, Result};
use std::fs;
use std::io::ErrorKind;
use tracing::debug;

use super::connection::FileConnection;
use crate::storage::traits::KeyValueStore;

/// File-backed key-value store: one file per key in the data directory
#[derive(Clone)]
pub struct FileKeyValueStore {
    connection: FileConnection,
}

impl FileKeyValueStore {
    /// Create a new file key-value store
    pub fn new(connection: FileConnection) -> Self {
        Self { connection }
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.connection.path_for_key(key);

        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.connection.path_for_key(key);

        // Atomic write using temp file
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        debug!("Stored key {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.connection.path_for_key(key);

        match fs::remove_file(&path) {
            Ok(()) => {
                debug!("Removed key {}", key);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::file::test_utils::TestEnvironment;

    #[test]
    fn test_missing_key_is_none() {
        let env = TestEnvironment::new().unwrap();
        let store = FileKeyValueStore::new(env.connection.clone());

        assert_eq!(store.get("progression_level_profile::1").unwrap(), None);
        assert!(!store.contains("progression_level_profile::1").unwrap());
    }

    #[test]
    fn test_set_then_get_survives_new_store() {
        let env = TestEnvironment::new().unwrap();
        let store = FileKeyValueStore::new(env.connection.clone());

        store.set("progression_completed_profile::1", r#"["cow","pig"]"#).unwrap();

        // A fresh store over the same directory sees the value
        let reopened = FileKeyValueStore::new(FileConnection::new(env.base_directory()).unwrap());
        assert_eq!(
            reopened.get("progression_completed_profile::1").unwrap(),
            Some(r#"["cow","pig"]"#.to_string())
        );

        // No temp files left behind
        let leftovers: Vec<_> = fs::read_dir(env.base_directory())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().extension().map_or(false, |ext| ext == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_overwrite_and_remove() {
        let env = TestEnvironment::new().unwrap();
        let store = FileKeyValueStore::new(env.connection.clone());

        store.set("profiles", "[]").unwrap();
        store.set("profiles", "[{}]").unwrap();
        assert_eq!(store.get("profiles").unwrap(), Some("[{}]".to_string()));

        store.remove("profiles").unwrap();
        assert_eq!(store.get("profiles").unwrap(), None);

        // Removing an absent key is fine
        store.remove("profiles").unwrap();
    }

    #[test]
    fn test_keys_do_not_collide() {
        let env = TestEnvironment::new().unwrap();
        let store = FileKeyValueStore::new(env.connection.clone());

        store.set("a:b", "colon").unwrap();
        store.set("a_b", "underscore").unwrap();
        store.set("a%3Ab", "literal").unwrap();

        assert_eq!(store.get("a:b").unwrap(), Some("colon".to_string()));
        assert_eq!(store.get("a_b").unwrap(), Some("underscore".to_string()));
        assert_eq!(store.get("a%3Ab").unwrap(), Some("literal".to_string()));
    }
}
