//! Persisted watchlist store.
//!
//! [`WatchlistStore`] owns the user's saved movies and the backend they are
//! persisted to. It is created once per session with [`WatchlistStore::load`],
//! injected wherever membership is needed, and torn down with
//! [`WatchlistStore::into_backend`]. There is no ambient global.
//!
//! # Persistence
//!
//! The entire list is serialized under [`WATCHLIST_KEY`] as a JSON array of full
//! movie records after every mutation. Loading is fail-soft: a missing key gives
//! an empty list, and unreadable or malformed data is logged and replaced by an
//! empty list.

use crate::catalog::CatalogStore;
use crate::domain::error::{MoviesError, Result};
use crate::domain::{Movie, MovieId};
use crate::storage::KeyValueStore;

/// Namespace key the watchlist is stored under.
pub const WATCHLIST_KEY: &str = "moviescorn-watchlist";

/// Insertion-ordered set of saved movies, keyed by identifier.
pub struct WatchlistStore {
    backend: Box<dyn KeyValueStore>,
    entries: Vec<Movie>,
}

impl WatchlistStore {
    /// Loads the persisted watchlist from `backend`.
    ///
    /// Never fails: read errors and structurally invalid data both result in an
    /// empty watchlist and a warning in the log. Duplicate identifiers in stored
    /// data are collapsed to their first occurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use moviescorn::storage::MemoryStore;
    /// use moviescorn::watchlist::{WatchlistStore, WATCHLIST_KEY};
    ///
    /// let backend = MemoryStore::with_entry(WATCHLIST_KEY, r#"[{"id":1,"title":"Inception"}]"#);
    /// let watchlist = WatchlistStore::load(Box::new(backend));
    /// assert!(watchlist.is_member(1));
    /// ```
    #[must_use]
    pub fn load(backend: Box<dyn KeyValueStore>) -> Self {
        let _span = tracing::debug_span!("watchlist_load").entered();

        let entries = match backend.get(WATCHLIST_KEY) {
            Ok(Some(raw)) => Self::decode(&raw),
            Ok(None) => {
                tracing::debug!("no stored watchlist, starting empty");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored watchlist, starting empty");
                Vec::new()
            }
        };

        tracing::debug!(count = entries.len(), "watchlist loaded");
        Self { backend, entries }
    }

    fn decode(raw: &str) -> Vec<Movie> {
        match serde_json::from_str::<Vec<Movie>>(raw) {
            Ok(records) => {
                let mut entries: Vec<Movie> = Vec::with_capacity(records.len());
                for record in records {
                    if entries.iter().all(|m| m.id != record.id) {
                        entries.push(record);
                    }
                }
                entries
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored watchlist is malformed, starting empty");
                Vec::new()
            }
        }
    }

    /// Adds `movie` if it is not already saved.
    ///
    /// Returns `true` if the movie was inserted, `false` if it was already
    /// present (in which case nothing is written and order is unchanged).
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list cannot be persisted; the in-memory
    /// list is left as it was before the call.
    pub fn add(&mut self, movie: &Movie) -> Result<bool> {
        let _span = tracing::debug_span!("watchlist_add", movie_id = movie.id).entered();

        if self.is_member(movie.id) {
            tracing::debug!("already in watchlist");
            return Ok(false);
        }

        self.entries.push(movie.clone());
        if let Err(e) = self.persist() {
            self.entries.pop();
            return Err(e);
        }
        Ok(true)
    }

    /// Removes the movie with `movie_id`.
    ///
    /// Returns `true` if an entry was removed. Removing an absent movie is a
    /// no-op that writes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the updated list cannot be persisted; the entry is
    /// restored at its original position.
    pub fn remove(&mut self, movie_id: MovieId) -> Result<bool> {
        let _span = tracing::debug_span!("watchlist_remove", movie_id).entered();

        let Some(position) = self.entries.iter().position(|m| m.id == movie_id) else {
            return Ok(false);
        };

        let removed = self.entries.remove(position);
        if let Err(e) = self.persist() {
            self.entries.insert(position, removed);
            return Err(e);
        }
        Ok(true)
    }

    /// Removes `movie` if saved, otherwise adds it.
    ///
    /// Membership is read at call time. Returns the membership after the call.
    ///
    /// # Errors
    ///
    /// Propagates persistence failures from [`add`](Self::add) or
    /// [`remove`](Self::remove).
    pub fn toggle(&mut self, movie: &Movie) -> Result<bool> {
        if self.is_member(movie.id) {
            self.remove(movie.id)?;
            Ok(false)
        } else {
            self.add(movie)?;
            Ok(true)
        }
    }

    /// Returns whether a movie with `movie_id` is saved.
    #[must_use]
    pub fn is_member(&self, movie_id: MovieId) -> bool {
        self.entries.iter().any(|m| m.id == movie_id)
    }

    /// Removes every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the empty list cannot be persisted; the previous
    /// entries are kept.
    pub fn clear(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("watchlist_clear", count = self.entries.len()).entered();

        let previous = std::mem::take(&mut self.entries);
        if let Err(e) = self.persist() {
            self.entries = previous;
            return Err(e);
        }
        Ok(())
    }

    /// Saved movies in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[Movie] {
        &self.entries
    }

    /// Saved identifiers in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = MovieId> + '_ {
        self.entries.iter().map(|m| m.id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Re-resolves saved movies against the loaded catalog.
    ///
    /// Movies present in the catalog are returned as the catalog's record; the
    /// rest fall back to the stored snapshot so watchlisted movies stay visible
    /// without a catalog.
    #[must_use]
    pub fn resolve<'a>(&'a self, catalog: &'a CatalogStore) -> Vec<&'a Movie> {
        self.entries
            .iter()
            .map(|stored| catalog.find(stored.id).unwrap_or(stored))
            .collect()
    }

    /// Read access to the persistence backend.
    #[must_use]
    pub fn backend(&self) -> &dyn KeyValueStore {
        &*self.backend
    }

    /// Tears the store down and hands back its backend.
    #[must_use]
    pub fn into_backend(self) -> Box<dyn KeyValueStore> {
        self.backend
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.entries)
            .map_err(|e| MoviesError::Storage(format!("failed to serialize watchlist: {e}")))?;
        self.backend.set(WATCHLIST_KEY, &json).inspect_err(|e| {
            tracing::error!(error = %e, "failed to persist watchlist");
        })?;
        tracing::debug!(count = self.entries.len(), "watchlist persisted");
        Ok(())
    }
}

impl std::fmt::Debug for WatchlistStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchlistStore")
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn movie(id: MovieId) -> Movie {
        Movie::new(id, format!("Movie {id}"))
    }

    fn empty_store() -> WatchlistStore {
        WatchlistStore::load(Box::new(MemoryStore::default()))
    }

    fn stored_json(store: &WatchlistStore) -> serde_json::Value {
        let raw = store.backend().get(WATCHLIST_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn add_twice_keeps_one_entry() {
        let mut store = empty_store();
        assert!(store.add(&movie(1)).unwrap());
        assert!(!store.add(&movie(1)).unwrap());
        assert_eq!(store.len(), 1);
        assert_eq!(stored_json(&store).as_array().unwrap().len(), 1);
    }

    #[test]
    fn add_preserves_insertion_order() {
        let mut store = empty_store();
        store.add(&movie(3)).unwrap();
        store.add(&movie(1)).unwrap();
        store.add(&movie(3)).unwrap();
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![3, 1]);
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let mut store = empty_store();
        store.add(&movie(2)).unwrap();

        for id in [1, 2] {
            let before = store.is_member(id);
            store.toggle(&movie(id)).unwrap();
            assert_ne!(store.is_member(id), before);
            store.toggle(&movie(id)).unwrap();
            assert_eq!(store.is_member(id), before);
        }
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut store = empty_store();
        store.add(&movie(1)).unwrap();
        assert!(!store.remove(99).unwrap());
        assert!(store.is_member(1));
        assert!(store.remove(1).unwrap());
        assert!(!store.is_member(1));
    }

    #[test]
    fn clear_persists_empty_array() {
        let mut store = empty_store();
        store.add(&movie(1)).unwrap();
        store.add(&movie(2)).unwrap();
        store.clear().unwrap();
        assert!(store.is_empty());
        assert_eq!(stored_json(&store), serde_json::json!([]));
    }

    #[test]
    fn loads_previously_persisted_records() {
        let backend = MemoryStore::with_entry(
            WATCHLIST_KEY,
            r#"[{"id":1,"title":"Inception","genres":["Action"],"cast":[],"production_companies":[]}]"#,
        );
        let store = WatchlistStore::load(Box::new(backend));
        assert!(store.is_member(1));
        assert_eq!(store.entries()[0].title, "Inception");
    }

    #[test]
    fn malformed_data_recovers_to_empty() {
        for raw in ["not json", r#"{"id":1}"#, r#"[{"title":"no id"}]"#, r#"[1,2,3]"#] {
            let backend = MemoryStore::with_entry(WATCHLIST_KEY, raw);
            let store = WatchlistStore::load(Box::new(backend));
            assert!(store.is_empty(), "expected empty watchlist for {raw}");
        }
    }

    #[test]
    fn duplicate_stored_ids_are_collapsed() {
        let backend = MemoryStore::with_entry(WATCHLIST_KEY, r#"[{"id":1},{"id":2},{"id":1}]"#);
        let store = WatchlistStore::load(Box::new(backend));
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn failed_persist_rolls_back() {
        let mut backend = MemoryStore::default();
        backend.set_read_only(true);
        let mut store = WatchlistStore::load(Box::new(backend));

        assert!(store.add(&movie(1)).is_err());
        assert!(!store.is_member(1));
        assert!(store.toggle(&movie(1)).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn failed_remove_restores_position() {
        let mut store = empty_store();
        store.add(&movie(1)).unwrap();
        store.add(&movie(2)).unwrap();
        store.add(&movie(3)).unwrap();

        let mut backend = MemoryStore::with_entry(WATCHLIST_KEY, stored_json(&store).to_string());
        backend.set_read_only(true);
        let mut store = WatchlistStore::load(Box::new(backend));

        assert!(store.remove(2).is_err());
        assert_eq!(store.ids().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(store.clear().is_err());
        assert_eq!(store.len(), 3);
    }
}
