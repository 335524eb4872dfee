//! JSON file-based key-value store.
//!
//! All keys live in a single human-readable JSON document. Writes go to a
//! temporary file first and are renamed into place, so a crash mid-write never
//! leaves a truncated document behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1) - the document is loaded into memory once
//! - **Write**: O(n) - the whole document is rewritten on every mutation
//! - **Best for**: a handful of keys with small values

use crate::domain::error::{MoviesError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// Top-level document serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreDocument {
    version: u32,

    #[serde(default)]
    entries: BTreeMap<String, String>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            entries: BTreeMap::new(),
        }
    }
}

/// Key-value store persisted as a JSON file.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "entries": {
///     "moviescorn-watchlist": "[{\"id\":1,\"title\":\"Inception\"}]"
///   }
/// }
/// ```
///
/// Values are opaque strings; the store never interprets them.
#[derive(Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
    data: StoreDocument,
}

impl JsonFileStore {
    /// Opens the store at `file_path`, creating parent directories as needed.
    ///
    /// A missing file starts an empty store. A file that exists but does not
    /// parse is moved aside to `<name>.corrupt` and the store starts empty; the
    /// event is logged as a warning rather than surfaced as an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the file
    /// exists but cannot be read.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use moviescorn::storage::JsonFileStore;
    ///
    /// let store = JsonFileStore::open("/tmp/moviescorn/store.json")?;
    /// # Ok::<(), moviescorn::MoviesError>(())
    /// ```
    pub fn open(file_path: impl Into<PathBuf>) -> Result<Self> {
        let file_path = file_path.into();
        tracing::debug!(path = ?file_path, "opening JSON key-value store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty store");
            StoreDocument::default()
        };

        tracing::debug!(keys = data.entries.len(), "store opened");
        Ok(Self { file_path, data })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_from_file(path: &Path) -> Result<StoreDocument> {
        let contents = std::fs::read(path)?;

        match serde_json::from_slice::<StoreDocument>(&contents) {
            Ok(data) => {
                tracing::debug!(version = data.version, keys = data.entries.len(), "loaded store document");
                Ok(data)
            }
            Err(e) => {
                let backup = path.with_extension("corrupt");
                tracing::warn!(
                    path = ?path,
                    backup = ?backup,
                    error = %e,
                    "store document is corrupt, starting empty"
                );
                if let Err(rename_err) = std::fs::rename(path, &backup) {
                    tracing::warn!(error = %rename_err, "could not move corrupt store aside");
                }
                Ok(StoreDocument::default())
            }
        }
    }

    fn save_to_file(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| MoviesError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");
        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!(path = ?self.file_path, "store saved");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.data.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key = %key, bytes = value.len()).entered();

        let previous = self.data.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.save_to_file() {
            match previous {
                Some(old) => self.data.entries.insert(key.to_string(), old),
                None => self.data.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_remove", key = %key).entered();

        let Some(previous) = self.data.entries.remove(key) else {
            return Ok(());
        };
        if let Err(e) = self.save_to_file() {
            self.data.entries.insert(key.to_string(), previous);
            return Err(e);
        }
        Ok(())
    }
}
