//! Catalog store: the session's movie set and everything derived from it.
//!
//! The catalog is loaded once per session and is immutable afterwards. Filtered
//! results, sort orders and home-page sections are computed on demand and never
//! stored.
//!
//! # Loading
//!
//! A load is bracketed by [`CatalogStore::begin_load`] and
//! [`CatalogStore::finish_load`]. Each `begin_load` issues a fresh
//! [`LoadTicket`]; only the most recent ticket may complete, so when two loads
//! overlap the last one requested wins. While a load is pending every query
//! returns an empty result.
//!
//! ```text
//! Idle ──begin_load──► Loading ──finish_load(Ok)──► Ready
//!                        │  ▲
//!                        │  └──begin_load (supersedes)
//!                        └────finish_load(Err)──► Failed ──begin_load──► Loading
//! ```
//!
//! # Modules
//!
//! - [`filter`]: search, genre and year matching
//! - [`sort`]: stable result orderings
//! - [`sections`]: featured / trending / popular / top-rated slices
//! - [`loader`]: abortable background load task

pub mod filter;
pub mod loader;
pub mod sections;
pub mod sort;

pub use filter::{filter_movies, Criteria, Selection};
pub use loader::{spawn_load, LoadTask};
pub use sections::{derive_sections, Sections};
pub use sort::{sort_movies, SortKey};

use crate::domain::error::Result;
use crate::domain::{Movie, MovieId};
use crate::source::{fetch_all, MovieSource};

/// Message shown to the user when the catalog cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to fetch movies. Please try again later.";

/// Lifecycle of the catalog's one-shot load.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No load has been requested yet.
    #[default]
    Idle,
    /// A load is in flight.
    Loading,
    /// The full movie set is available.
    Ready,
    /// The last load failed; `message` is safe to show to the user.
    Failed { message: String },
}

/// Identifies one load request. Only the latest ticket can complete a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

/// Holds the loaded movie set and answers derived-view queries.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    movies: Vec<Movie>,
    state: LoadState,
    generation: u64,
}

impl CatalogStore {
    /// Creates an empty catalog in the [`LoadState::Idle`] state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog that is already [`LoadState::Ready`] with `movies`.
    ///
    /// Duplicate identifiers are dropped, keeping the first occurrence.
    #[must_use]
    pub fn with_movies(movies: Vec<Movie>) -> Self {
        let mut catalog = Self::new();
        let ticket = catalog.begin_load();
        catalog.finish_load(ticket, Ok(movies));
        catalog
    }

    /// Marks a load as started and returns its ticket.
    ///
    /// Any earlier ticket is superseded and will be ignored by
    /// [`finish_load`](Self::finish_load).
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        tracing::debug!(generation = self.generation, "catalog load started");
        LoadTicket(self.generation)
    }

    /// Completes the load identified by `ticket`.
    ///
    /// On success the movie set is replaced in full. On failure the set is
    /// cleared and the state becomes [`LoadState::Failed`] with
    /// [`LOAD_FAILED_MESSAGE`]; the underlying cause is logged. Returns `false`
    /// without touching the catalog if `ticket` has been superseded.
    pub fn finish_load(&mut self, ticket: LoadTicket, outcome: Result<Vec<Movie>>) -> bool {
        let _span = tracing::debug_span!("catalog_finish_load", ticket = ticket.0).entered();

        if ticket.0 != self.generation {
            tracing::debug!(current = self.generation, "ignoring superseded catalog load");
            return false;
        }

        match outcome {
            Ok(movies) => {
                let mut unique: Vec<Movie> = Vec::with_capacity(movies.len());
                for movie in movies {
                    if unique.iter().any(|m| m.id == movie.id) {
                        tracing::warn!(movie_id = movie.id, "dropping duplicate movie id");
                    } else {
                        unique.push(movie);
                    }
                }
                tracing::info!(count = unique.len(), "catalog loaded");
                self.movies = unique;
                self.state = LoadState::Ready;
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching movies");
                self.movies.clear();
                self.state = LoadState::Failed {
                    message: LOAD_FAILED_MESSAGE.to_string(),
                };
            }
        }
        true
    }

    /// Loads the full set from `source`, draining up to `max_pages` pages.
    ///
    /// Errors never escape: they are recorded as [`LoadState::Failed`]. Check
    /// [`error`](Self::error) afterwards.
    pub async fn load(&mut self, source: &dyn MovieSource, max_pages: u32) {
        let ticket = self.begin_load();
        let outcome = fetch_all(source, None, max_pages).await;
        self.finish_load(ticket, outcome);
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// User-facing error message of the last failed load.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// The loaded movies in load order; empty unless [`LoadState::Ready`].
    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        if self.is_ready() {
            &self.movies
        } else {
            &[]
        }
    }

    /// Looks up a movie by identifier.
    #[must_use]
    pub fn find(&self, id: MovieId) -> Option<&Movie> {
        self.movies().iter().find(|m| m.id == id)
    }

    /// Movies matching `criteria`, in load order.
    #[must_use]
    pub fn filter(&self, criteria: &Criteria) -> Vec<&Movie> {
        filter_movies(self.movies(), criteria)
    }

    /// Movies matching `criteria`, ordered by `key`.
    #[must_use]
    pub fn search(&self, criteria: &Criteria, key: SortKey) -> Vec<&Movie> {
        let mut results = self.filter(criteria);
        sort_movies(&mut results, key);
        results
    }

    /// Home-page sections over the full load order.
    #[must_use]
    pub fn sections(&self) -> Sections<'_> {
        derive_sections(self.movies())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixture::mock_movies;
    use crate::source::FixtureSource;
    use crate::MoviesError;

    #[tokio::test]
    async fn load_from_fixture() {
        let mut catalog = CatalogStore::new();
        catalog.load(&FixtureSource::default(), 1).await;

        assert!(catalog.is_ready());
        assert_eq!(catalog.movies().len(), 12);
        assert_eq!(catalog.find(9).map(|m| m.title.as_str()), Some("The Shawshank Redemption"));
    }

    #[tokio::test]
    async fn failed_load_exposes_error_state() {
        let mut catalog = CatalogStore::with_movies(mock_movies());
        catalog.load(&FixtureSource::default().failing("offline"), 1).await;

        assert_eq!(catalog.error(), Some(LOAD_FAILED_MESSAGE));
        assert!(catalog.movies().is_empty());
        assert!(catalog.sections().featured.is_none());
    }

    #[test]
    fn queries_are_empty_while_loading() {
        let mut catalog = CatalogStore::with_movies(mock_movies());
        let _ticket = catalog.begin_load();

        assert!(catalog.is_loading());
        assert!(catalog.filter(&Criteria::default()).is_empty());
        assert!(catalog.find(1).is_none());
        assert!(catalog.sections().top_rated.is_empty());
    }

    #[test]
    fn last_requested_load_wins() {
        let mut catalog = CatalogStore::new();
        let first = catalog.begin_load();
        let second = catalog.begin_load();

        assert!(catalog.finish_load(second, Ok(vec![Movie::new(2, "Second")])));
        assert!(!catalog.finish_load(first, Ok(vec![Movie::new(1, "First")])));
        assert_eq!(catalog.movies()[0].id, 2);

        assert!(!catalog.finish_load(first, Err(MoviesError::Source("late".to_string()))));
        assert!(catalog.is_ready());
    }

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let catalog = CatalogStore::with_movies(vec![Movie::new(1, "A"), Movie::new(1, "B"), Movie::new(2, "C")]);
        let titles: Vec<_> = catalog.movies().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }

    #[test]
    fn search_filters_then_sorts() {
        let catalog = CatalogStore::with_movies(mock_movies());
        let results = catalog.search(&Criteria::new("", "Drama", "all"), SortKey::Title);
        assert!(results.windows(2).all(|w| w[0].title <= w[1].title));
        assert!(results.iter().all(|m| m.genres.iter().any(|g| g == "Drama")));
    }
}
