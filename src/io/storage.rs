// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Durable key-value storage for notebook state.
//!
//! Notes, categories and filters are each kept under their own key as a
//! JSON array. The notebook only talks to the [`Storage`] trait; the
//! desktop app plugs in [`FileStorage`] and tests use `MemoryStorage`.

use std::path::PathBuf;
use thiserror::Error;

#[cfg(test)]
pub use memory::MemoryStorage;

/// The three independently persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Notes,
    Categories,
    Filters,
}

impl StorageKey {
    pub const ALL: [StorageKey; 3] = [StorageKey::Notes, StorageKey::Categories, StorageKey::Filters];

    /// Name of the entry in the backing store.
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::Notes => "userNotes",
            StorageKey::Categories => "noteCategories",
            StorageKey::Filters => "noteFilters",
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read {key}: {source}")]
    Read {
        key: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {key}: {source}")]
    Write {
        key: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[cfg(test)]
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Key-value port the notebook persists through.
pub trait Storage {
    /// Read the raw JSON stored under `key`, or `None` if nothing was saved yet.
    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError>;

    /// Overwrite the entry under `key`.
    fn write(&mut self, key: StorageKey, value: &str) -> Result<(), StorageError>;
}

/// Stores each key as `<key>.json` inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: StorageKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read { key: key.as_str(), source }),
        }
    }

    fn write(&mut self, key: StorageKey, value: &str) -> Result<(), StorageError> {
        let wrap = |source| StorageError::Write { key: key.as_str(), source };
        std::fs::create_dir_all(&self.dir).map_err(wrap)?;
        std::fs::write(self.path_for(key), value).map_err(wrap)
    }
}

#[cfg(test)]
mod memory {
    use super::{Storage, StorageError, StorageKey};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    struct MemoryInner {
        entries: HashMap<StorageKey, String>,
        failing: bool,
    }

    /// In-memory storage. Clones share the same entries, so a test can keep a
    /// handle and inspect what the notebook wrote.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryStorage {
        inner: Arc<Mutex<MemoryInner>>,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        /// Current raw value under `key`.
        pub fn get(&self, key: StorageKey) -> Option<String> {
            self.inner.lock().ok()?.entries.get(&key).cloned()
        }

        /// Seed a raw value, bypassing the failure switch.
        pub fn insert(&self, key: StorageKey, value: impl Into<String>) {
            if let Ok(mut inner) = self.inner.lock() {
                inner.entries.insert(key, value.into());
            }
        }

        /// Make every subsequent write fail.
        pub fn set_failing(&self, failing: bool) {
            if let Ok(mut inner) = self.inner.lock() {
                inner.failing = failing;
            }
        }
    }

    impl Storage for MemoryStorage {
        fn read(&self, key: StorageKey) -> Result<Option<String>, StorageError> {
            let inner = self
                .inner
                .lock()
                .map_err(|e| StorageError::Unavailable(e.to_string()))?;
            Ok(inner.entries.get(&key).cloned())
        }

        fn write(&mut self, key: StorageKey, value: &str) -> Result<(), StorageError> {
            let mut inner = self
                .inner
                .lock()
                .map_err(|e| StorageError::Unavailable(e.to_string()))?;
            if inner.failing {
                return Err(StorageError::Unavailable(format!("write to {} refused", key.as_str())));
            }
            inner.entries.insert(key, value.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_storage_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(storage.read(StorageKey::Notes).unwrap().is_none());
    }

    #[test]
    fn test_file_storage_creates_dir_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));

        storage.write(StorageKey::Categories, r#"["General"]"#).unwrap();
        storage.write(StorageKey::Categories, r#"["General","Work"]"#).unwrap();

        assert_eq!(
            storage.read(StorageKey::Categories).unwrap().as_deref(),
            Some(r#"["General","Work"]"#)
        );
        assert!(dir.path().join("nested").join("noteCategories.json").exists());
        assert!(storage.read(StorageKey::Filters).unwrap().is_none());
    }

    #[test]
    fn test_memory_storage_shares_entries_between_clones() {
        let storage = MemoryStorage::new();
        let mut handle = storage.clone();
        handle.write(StorageKey::Filters, "[]").unwrap();
        assert_eq!(storage.get(StorageKey::Filters).as_deref(), Some("[]"));
    }

    #[test]
    fn test_memory_storage_failing_writes() {
        let mut storage = MemoryStorage::new();
        storage.set_failing(true);
        assert!(storage.write(StorageKey::Notes, "[]").is_err());
        assert!(storage.get(StorageKey::Notes).is_none());

        storage.set_failing(false);
        assert!(storage.write(StorageKey::Notes, "[]").is_ok());
    }
}
