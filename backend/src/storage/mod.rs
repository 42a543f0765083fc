//! # Storage Module
//!
//! Handles all data persistence for the talking animals backend.
//!
//! Everything the domain persists goes through the [`KeyValueStore`] trait:
//! string keys, string values, synchronous calls. This is the same contract
//! the game used against the browser's local storage, so the key layout
//! (`profiles`, `currentProfile`, `progression_level_<profileId>`, ...) is
//! unchanged.
//!
//! ## Implementations
//!
//! - **File**: one file per key under the data directory, atomic replace on write
//! - **Memory**: a shared map, for tests and throwaway sessions

pub mod traits;
pub mod memory;
pub mod file;

pub use traits::KeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use file::{FileConnection, FileKeyValueStore};
