//! File-backed snapshot storage.
//!
//! All keys live in a single JSON object file. Every write reads the
//! current map, applies the change, and rewrites the whole file through a
//! temp file and an atomic rename, so readers never observe a torn write.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{SnapshotStorage, StorageError};

/// Key-value storage persisted as one JSON object file.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Open storage backed by the given file, creating parent directories
    /// as needed. The file itself is created on first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full key-value map from disk. A missing file is an empty
    /// map; an unparseable file is a corrupt-store error.
    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&raw)
            .map_err(|e| StorageError::Corrupt(format!("{}: {e}", self.path.display())))
    }

    /// Like [`Self::read_map`], but a corrupt file degrades to an empty
    /// map instead of an error. Used on the write path: the rewrite that
    /// follows replaces the corrupt content with a valid map.
    fn read_map_or_reset(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match self.read_map() {
            Ok(map) => Ok(map),
            Err(StorageError::Corrupt(_)) => Ok(BTreeMap::new()),
            Err(e) => Err(e),
        }
    }

    /// Rewrite the whole map atomically: write a temp file next to the
    /// target, then rename over it.
    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let raw = serde_json::to_string(map)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SnapshotStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.read_map_or_reset()?;
        map.insert(key.to_owned(), value.to_owned());
        self.write_map(&map)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut map = self.read_map_or_reset()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}
