//! # Storage Traits
//!
//! This module defines the storage abstraction that lets the domain layer
//! persist progression and profile data without knowing where it lands.

use anyhow::Result;

/// Trait defining a string-keyed, string-valued persistent store
///
/// This mirrors the browser's local storage: values are opaque strings
/// (usually JSON) and every call completes synchronously. Implementations
/// must be shareable across threads so a single store can back every
/// service in the application state.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Whether a value exists for `key`
    fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }
}
