//! In-memory key-value store.

use crate::domain::error::{MoviesError, Result};
use crate::storage::backend::KeyValueStore;
use std::collections::HashMap;

/// Process-local [`KeyValueStore`].
///
/// Used for sessions that should not touch the disk and for tests. A store can
/// be switched to read-only with [`set_read_only`](Self::set_read_only) to
/// simulate a backend that rejects writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    /// Creates a store pre-populated with a single key.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries,
            read_only: false,
        }
    }

    /// Makes subsequent writes fail with [`MoviesError::Storage`].
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    fn check_writable(&self) -> Result<()> {
        if self.read_only {
            return Err(MoviesError::Storage("store is read-only".to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_writable()?;
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.check_writable()?;
        self.entries.remove(key);
        Ok(())
    }
}
