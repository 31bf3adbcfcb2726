//! In-memory snapshot storage.

use std::collections::HashMap;

use super::{SnapshotStorage, StorageError};

/// Hash-map storage that never fails. Used by tests and by hosts that
/// want a cart without durability (nothing survives the process).
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get("cart").unwrap().is_none());

        storage.set("cart", "value").unwrap();
        assert_eq!(storage.get("cart").unwrap().as_deref(), Some("value"));

        storage.remove("cart").unwrap();
        assert!(storage.get("cart").unwrap().is_none());
    }
}
