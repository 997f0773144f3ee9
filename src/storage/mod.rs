//! # Storage Module - Key/Value Persistence Layer
//!
//! Unit profiles are persisted as JSON-encoded lists inside an embedded
//! [sled](https://docs.rs/sled) database, keyed by a fixed storage key per
//! collection. The layer is deliberately generic: callers store and load
//! `Vec<T>` for any serde type, and higher layers (the unit store) own the
//! domain rules.
//!
//! ## Read semantics
//!
//! A missing key and an unreadable value are both treated as "no data": reads
//! never fail, they return an empty list and leave a warning in the log when a
//! stored value could not be decoded. Writes replace the stored list
//! wholesale and flush before returning.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors that can arise while writing to the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Wrapper around sled's error type.
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Wrapper around JSON serialization errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Wrapper around IO errors (directory creation, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Generic list-valued key/value persistence.
///
/// `get_list` is infallible by contract: absent or corrupt data degrades to an
/// empty list. `set_list` replaces the stored collection in one write.
pub trait KeyValueStore {
    /// Load the list stored under `key`, or an empty list if absent/unreadable.
    fn get_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T>;

    /// Replace the list stored under `key`.
    fn set_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StorageError>;

    /// Remove every stored key.
    fn clear(&self) -> Result<(), StorageError>;
}

impl<S: KeyValueStore> KeyValueStore for &S {
    fn get_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        (*self).get_list(key)
    }

    fn set_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StorageError> {
        (*self).set_list(key, items)
    }

    fn clear(&self) -> Result<(), StorageError> {
        (*self).clear()
    }
}

/// Sled-backed persistence rooted at a directory on disk.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    /// Open (or create) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = sled::open(path_ref)?;
        Ok(Self { db })
    }
}

impl KeyValueStore for SledStore {
    fn get_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let bytes = match self.db.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("storage read failed for '{key}': {e}");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(items) => items,
            Err(e) => {
                warn!("stored value under '{key}' is unreadable, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    fn set_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(items)?;
        self.db.insert(key, bytes)?;
        self.db.flush()?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.db.clear()?;
        self.db.flush()?;
        Ok(())
    }
}

/// In-memory store with the same contract as [`SledStore`].
///
/// Useful for tests and for throwaway runs that should leave nothing on disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let entries = self.entries.lock().expect("storage mutex poisoned");
        let Some(bytes) = entries.get(key) else {
            return Vec::new();
        };
        match serde_json::from_slice(bytes) {
            Ok(items) => items,
            Err(e) => {
                warn!("stored value under '{key}' is unreadable, treating as empty: {e}");
                Vec::new()
            }
        }
    }

    fn set_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(items)?;
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.to_string(), bytes);
        Ok(())
    }

    fn clear(&self) -> Result<(), StorageError> {
        self.entries.lock().expect("storage mutex poisoned").clear();
        Ok(())
    }
}
