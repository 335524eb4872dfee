//! Renderable browse-page state.
//!
//! View models are computed by [`AppState::compute_viewmodel`](super::AppState::compute_viewmodel)
//! and borrow from the state they were computed from. They carry no behavior,
//! only display-ready data.

use super::modes::Section;
use super::state::Notification;
use crate::domain::Movie;

/// Heading of the results grid in the watchlist section.
pub const WATCHLIST_HEADING: &str = "My Watchlist";
/// Heading of the results grid when any filter is active.
pub const SEARCH_HEADING: &str = "Search Results";
/// Heading of the unfiltered results grid.
pub const ALL_HEADING: &str = "All Movies";

/// Everything a front end needs to draw the browse page.
#[derive(Debug, Clone)]
pub struct BrowseView<'a> {
    /// A catalog load is in flight; the grid shows placeholders.
    pub loading: bool,

    /// User-facing load error. When set, the page shows it with a retry button.
    pub error: Option<&'a str>,

    pub section: Section,

    /// Hero movie. Only populated in [`Section::All`].
    pub featured: Option<MovieCard<'a>>,

    /// Ranked "Trending Now" carousel. Only populated in [`Section::All`].
    pub trending: Vec<MovieCard<'a>>,

    /// "Top Rated" carousel. Only populated in [`Section::All`].
    pub top_rated: Vec<MovieCard<'a>>,

    /// "Popular Movies" carousel. Only populated in [`Section::All`].
    pub popular: Vec<MovieCard<'a>>,

    /// Results grid heading, see [`WATCHLIST_HEADING`], [`SEARCH_HEADING`]
    /// and [`ALL_HEADING`].
    pub heading: &'static str,

    /// Filtered and sorted results grid.
    pub results: Vec<MovieCard<'a>>,

    /// Shown instead of the grid when loading finished with no results.
    pub empty_state: Option<EmptyState>,

    /// Badge count in the navigation bar.
    pub watchlist_count: usize,

    /// Movie open in the detail modal.
    pub selected: Option<MovieCard<'a>>,

    /// Active toasts, oldest first.
    pub notifications: &'a [Notification],
}

/// One movie as drawn on a card or in the detail modal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovieCard<'a> {
    pub movie: &'a Movie,

    /// 1-based position in the trending carousel.
    pub rank: Option<usize>,

    pub in_watchlist: bool,
}

/// Empty-grid message and the label of its reset button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub message: &'static str,
    pub action: &'static str,
}

impl EmptyState {
    /// Empty state for `section`.
    #[must_use]
    pub const fn for_section(section: Section) -> Self {
        match section {
            Section::Watchlist => Self {
                message: "Your watchlist is empty. Start adding some movies!",
                action: "Browse Movies",
            },
            Section::All => Self {
                message: "No movies found matching your criteria",
                action: "Clear Filters",
            },
        }
    }
}
