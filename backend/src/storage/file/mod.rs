//! File-backed storage: every key is a small file in the data directory.

pub mod connection;
pub mod key_value_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::FileConnection;
pub use key_value_repository::FileKeyValueStore;
