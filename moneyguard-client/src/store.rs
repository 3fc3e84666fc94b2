//! Local key/value store standing in for browser local storage.
//!
//! Values are opaque strings (JSON blobs in practice). There is no
//! transaction discipline: concurrent writers to one key race and the last
//! write wins.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ClientError, Result, StoreError};

/// Cached transaction list (`Vec<TransactionRecord>` as JSON)
pub const TRANSACTIONS_KEY: &str = "transactions";
/// Cached category names (`Vec<String>` as JSON)
pub const CATEGORIES_KEY: &str = "categories";
/// Session token
pub const USER_TOKEN_KEY: &str = "userToken";
/// Saved user profile (`UserProfile` as JSON)
pub const USER_DATA_KEY: &str = "userData";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StoreError>;
    fn remove(&self, key: &str) -> std::result::Result<(), StoreError>;
}

/// Read and decode a JSON value. `Ok(None)` when the key is absent.
pub fn get_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        None => Ok(None),
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| ClientError::Cache {
                key: key.to_string(),
                source,
            }),
    }
}

/// Encode and write a JSON value, replacing whatever was there.
pub fn set_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value).map_err(StoreError::from)?;
    store.set(key, &raw)?;
    Ok(())
}

/// In-process store; the default for tests and `--offline` runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> std::result::Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

/// File-backed store: one pretty-printed JSON object, rewritten on every
/// `set`/`remove`. A missing file reads as an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> std::result::Result<BTreeMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let s = fs::read_to_string(&self.path)?;
        if s.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&s)?)
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> std::result::Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let s = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, s)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> std::result::Result<Option<String>, StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> std::result::Result<(), StoreError> {
        let _guard = self.lock.lock().map_err(|_| StoreError::Poisoned)?;
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}
