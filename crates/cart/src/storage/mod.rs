//! Snapshot storage backends.
//!
//! The cart persists through a small key-value surface with the semantics
//! of web local storage: string keys, string values, an absent key is
//! distinct from an empty value, and each write replaces the whole value
//! under its key. Exactly one logical writer is assumed; independent
//! instances sharing a backing medium see last-writer-wins with no merging
//! and no locking.
//!
//! # Backing layout (file storage)
//!
//! - `<data_dir>/storage.json` - one JSON object mapping keys to raw
//!   string values, rewritten atomically on every write

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors from a storage backend.
///
/// The cart store never propagates these to the shopper: any storage
/// failure downgrades the session to an in-memory cart.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing medium holds data this backend cannot interpret.
    #[error("corrupt backing store: {0}")]
    Corrupt(String),

    /// The backing value could not be serialized.
    #[error("storage encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A key-value surface for persisted snapshots.
pub trait SnapshotStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Erase the value stored under `key`. Erasing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
