//! Key-value persistence abstraction.
//!
//! The watchlist persists itself through the [`KeyValueStore`] trait, a scoped
//! string store in the spirit of browser local storage. Keeping the trait this
//! small lets the watchlist run against a JSON file in the CLI and an in-memory
//! map in tests.

use crate::domain::error::Result;

/// Scoped string key-value store.
///
/// Implementations must make a successful [`set`](KeyValueStore::set) durable
/// before returning, so a value written by one call is visible to the next
/// [`get`](KeyValueStore::get), even from a fresh instance over the same backing
/// medium.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): one JSON document on disk
/// - [`MemoryStore`](crate::storage::MemoryStore): process-local map
///
/// # Examples
///
/// ```
/// use moviescorn::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.set("greeting", "hello")?;
/// assert_eq!(store.get("greeting")?.as_deref(), Some("hello"));
/// # Ok::<(), moviescorn::MoviesError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Returns the value stored under `key`, or `Ok(None)` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be made durable.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be made durable.
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
