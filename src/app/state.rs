//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the browse page: it owns the
//! catalog and watchlist stores plus every piece of transient page state
//! (filters, sort order, section, open movie, toasts). Derived collections are
//! never stored; [`AppState::visible_movies`] and
//! [`AppState::compute_viewmodel`] recompute them from a snapshot.
//!
//! # Example
//!
//! ```rust
//! use moviescorn::app::AppState;
//! use moviescorn::catalog::CatalogStore;
//! use moviescorn::source::fixture::mock_movies;
//! use moviescorn::storage::MemoryStore;
//! use moviescorn::watchlist::WatchlistStore;
//!
//! let watchlist = WatchlistStore::load(Box::new(MemoryStore::default()));
//! let mut state = AppState::new(watchlist, "http://localhost:8080");
//! state.catalog = CatalogStore::with_movies(mock_movies());
//!
//! let view = state.compute_viewmodel();
//! assert_eq!(view.results.len(), 12);
//! assert_eq!(view.heading, "All Movies");
//! ```

use super::modes::{NotificationKind, Section};
use super::viewmodel::{BrowseView, EmptyState, MovieCard, ALL_HEADING, SEARCH_HEADING, WATCHLIST_HEADING};
use crate::catalog::{CatalogStore, Criteria, SortKey};
use crate::domain::{Movie, MovieId};
use crate::watchlist::WatchlistStore;

/// Maximum number of toasts kept at once. The oldest is dropped first.
pub const MAX_NOTIFICATIONS: usize = 3;

/// A transient toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub kind: NotificationKind,
}

impl Notification {
    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NotificationKind::Info,
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            kind: NotificationKind::Error,
        }
    }
}

/// Central application state container.
///
/// Mutated only by [`handle_event`](super::handle_event); read by front ends
/// through [`compute_viewmodel`](Self::compute_viewmodel).
#[derive(Debug)]
pub struct AppState {
    /// Loaded movie set and its load lifecycle.
    pub catalog: CatalogStore,

    /// Persisted watchlist.
    pub watchlist: WatchlistStore,

    /// Current search term and genre/year selections.
    pub criteria: Criteria,

    /// Ordering of the results grid.
    pub sort_key: SortKey,

    /// Collection the results grid draws from.
    pub section: Section,

    /// Movie open in the detail modal.
    ///
    /// Always refers to a movie present in the catalog or the watchlist.
    pub selected: Option<MovieId>,

    /// Deep-linked movie waiting for the catalog to finish loading.
    pub pending_deep_link: Option<MovieId>,

    /// Active toasts, oldest first.
    pub notifications: Vec<Notification>,

    /// Origin used to build share links, e.g. `http://localhost:8080`.
    pub share_origin: String,
}

impl AppState {
    /// Creates a state with an idle catalog and default filters.
    #[must_use]
    pub fn new(watchlist: WatchlistStore, share_origin: impl Into<String>) -> Self {
        Self {
            catalog: CatalogStore::new(),
            watchlist,
            criteria: Criteria::default(),
            sort_key: SortKey::default(),
            section: Section::default(),
            selected: None,
            pending_deep_link: None,
            notifications: Vec::new(),
            share_origin: share_origin.into(),
        }
    }

    /// Finds a movie in the catalog, falling back to the watchlist snapshot.
    ///
    /// The fallback lets stale watchlist entries be opened, shared and removed
    /// even when the current catalog no longer contains them.
    #[must_use]
    pub fn find_movie(&self, id: MovieId) -> Option<&Movie> {
        self.catalog
            .find(id)
            .or_else(|| self.watchlist.entries().iter().find(|m| m.id == id))
    }

    #[must_use]
    pub fn selected_movie(&self) -> Option<&Movie> {
        self.selected.and_then(|id| self.find_movie(id))
    }

    /// Resets search, genre and year, and returns to [`Section::All`].
    pub fn clear_filters(&mut self) {
        self.criteria = Criteria::default();
        self.section = Section::All;
    }

    /// Queues a toast, evicting the oldest ones beyond [`MAX_NOTIFICATIONS`].
    pub fn notify(&mut self, notification: Notification) {
        tracing::debug!(title = %notification.title, kind = ?notification.kind, "notification");
        self.notifications.push(notification);
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let excess = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..excess);
        }
    }

    /// Results grid contents: the current section, filtered then sorted.
    ///
    /// The watchlist section keeps catalog movies that are members, so stale
    /// entries missing from the catalog are not listed.
    #[must_use]
    pub fn visible_movies(&self) -> Vec<&Movie> {
        let _span = tracing::debug_span!("visible_movies",
            section = %self.section,
            sort = %self.sort_key,
        )
        .entered();

        let mut movies = self.catalog.filter(&self.criteria);
        if self.section == Section::Watchlist {
            movies.retain(|m| self.watchlist.is_member(m.id));
        }
        crate::catalog::sort_movies(&mut movies, self.sort_key);

        tracing::debug!(count = movies.len(), "results computed");
        movies
    }

    fn card<'a>(&self, movie: &'a Movie, rank: Option<usize>) -> MovieCard<'a> {
        MovieCard {
            movie,
            rank,
            in_watchlist: self.watchlist.is_member(movie.id),
        }
    }

    fn heading(&self) -> &'static str {
        if self.section == Section::Watchlist {
            WATCHLIST_HEADING
        } else if self.criteria.is_unfiltered() {
            ALL_HEADING
        } else {
            SEARCH_HEADING
        }
    }

    /// Computes the browse-page view model.
    ///
    /// Carousels are derived from the catalog's load order and only appear in
    /// [`Section::All`]. The empty state is only offered once loading has
    /// finished without an error.
    #[must_use]
    pub fn compute_viewmodel(&self) -> BrowseView<'_> {
        let loading = self.catalog.is_loading();
        let error = self.catalog.error();

        let (featured, trending, top_rated, popular) = if self.section == Section::All {
            let sections = self.catalog.sections();
            (
                sections.featured.map(|m| self.card(m, None)),
                sections
                    .trending
                    .iter()
                    .enumerate()
                    .map(|(i, m)| self.card(m, Some(i + 1)))
                    .collect(),
                sections.top_rated.iter().map(|m| self.card(m, None)).collect(),
                sections.popular.iter().map(|m| self.card(m, None)).collect(),
            )
        } else {
            (None, Vec::new(), Vec::new(), Vec::new())
        };

        let results: Vec<MovieCard<'_>> = self.visible_movies().into_iter().map(|m| self.card(m, None)).collect();

        let empty_state = (!loading && error.is_none() && results.is_empty()).then(|| EmptyState::for_section(self.section));

        BrowseView {
            loading,
            error,
            section: self.section,
            featured,
            trending,
            top_rated,
            popular,
            heading: self.heading(),
            results,
            empty_state,
            watchlist_count: self.watchlist.len(),
            selected: self.selected_movie().map(|m| self.card(m, None)),
            notifications: &self.notifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixture::mock_movies;
    use crate::storage::MemoryStore;

    fn loaded_state() -> AppState {
        let watchlist = WatchlistStore::load(Box::new(MemoryStore::default()));
        let mut state = AppState::new(watchlist, "http://localhost:8080");
        state.catalog = CatalogStore::with_movies(mock_movies());
        state
    }

    fn result_ids(state: &AppState) -> Vec<MovieId> {
        state.visible_movies().iter().map(|m| m.id).collect()
    }

    #[test]
    fn notifications_keep_only_the_newest() {
        let mut state = loaded_state();
        for i in 0..5 {
            state.notify(Notification::info(format!("toast {i}"), ""));
        }

        let titles: Vec<&str> = state.notifications.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["toast 2", "toast 3", "toast 4"]);
    }

    #[test]
    fn all_section_shows_carousels() {
        let state = loaded_state();
        let view = state.compute_viewmodel();

        assert_eq!(view.featured.map(|c| c.movie.id), Some(1));
        assert_eq!(view.trending.len(), 10);
        assert_eq!(view.trending[0].rank, Some(1));
        assert_eq!(view.trending[9].rank, Some(10));
        assert_eq!(view.popular.len(), 1);
        assert_eq!(view.top_rated.len(), 10);
        assert!(view.empty_state.is_none());
    }

    #[test]
    fn watchlist_section_lists_members_in_catalog_order() {
        let mut state = loaded_state();
        let movies = mock_movies();
        state.watchlist.add(&movies[8]).unwrap();
        state.watchlist.add(&movies[2]).unwrap();
        state.section = Section::Watchlist;

        assert_eq!(result_ids(&state), vec![3, 9]);

        let view = state.compute_viewmodel();
        assert_eq!(view.heading, WATCHLIST_HEADING);
        assert!(view.featured.is_none());
        assert!(view.trending.is_empty());
        assert!(view.results.iter().all(|c| c.in_watchlist));
        assert_eq!(view.watchlist_count, 2);
    }

    #[test]
    fn empty_watchlist_offers_browse_action() {
        let mut state = loaded_state();
        state.section = Section::Watchlist;

        let view = state.compute_viewmodel();
        assert_eq!(view.empty_state, Some(EmptyState::for_section(Section::Watchlist)));
        assert_eq!(view.empty_state.map(|e| e.action), Some("Browse Movies"));
    }

    #[test]
    fn active_filter_switches_heading() {
        let mut state = loaded_state();
        state.criteria = Criteria::new("", "Horror", "all");

        let view = state.compute_viewmodel();
        assert_eq!(view.heading, SEARCH_HEADING);
        assert!(view.results.is_empty());
        assert_eq!(view.empty_state.map(|e| e.message), Some("No movies found matching your criteria"));
    }

    #[test]
    fn loading_hides_results_and_empty_state() {
        let mut state = loaded_state();
        let _ticket = state.catalog.begin_load();

        let view = state.compute_viewmodel();
        assert!(view.loading);
        assert!(view.results.is_empty());
        assert!(view.empty_state.is_none());
        assert!(view.featured.is_none());
    }

    #[test]
    fn clear_filters_returns_to_all() {
        let mut state = loaded_state();
        state.criteria = Criteria::new("nolan", "Drama", "2010");
        state.section = Section::Watchlist;

        state.clear_filters();
        assert!(state.criteria.is_unfiltered());
        assert_eq!(state.section, Section::All);
    }

    #[test]
    fn stale_watchlist_entry_is_still_findable() {
        let mut state = loaded_state();
        let stale = Movie::new(99, "Gone");
        state.watchlist.add(&stale).unwrap();

        assert_eq!(state.find_movie(99).map(|m| m.title.as_str()), Some("Gone"));
        state.section = Section::Watchlist;
        assert!(result_ids(&state).is_empty());
    }
}
