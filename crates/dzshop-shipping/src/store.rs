//! Durable key-value storage for the zone cache.
//!
//! The original client kept its zone cache in the browser's key-value
//! storage; server-side the same role is played by a small JSON-file store.
//! The trait seam keeps the repository testable with an in-memory store.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

/// Key-value persistence for serialized cache entries.
pub trait CacheStore: Send + Sync {
    /// Returns the stored value for `key`, or `None` when absent or unreadable.
    fn load(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous entry.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the entry cannot be written.
    fn save(&self, key: &str, value: &str) -> io::Result<()>;

    /// Removes the entry for `key`; absent entries are not an error.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the removal itself fails.
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// File-backed store: one `<key>.json` file per entry under a root directory.
pub struct FileCacheStore {
    dir: PathBuf,
}

impl FileCacheStore {
    #[must_use]
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CacheStore for FileCacheStore {
    fn load(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.entry_path(key)).ok()
    }

    fn save(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.entry_path(key), value)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.entry_path(key)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

/// In-memory store for tests and cache-less deployments.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCacheStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCacheStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn save(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
