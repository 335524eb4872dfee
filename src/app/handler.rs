//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place that mutates [`AppState`]. It applies
//! each event synchronously and returns the side effects it needs as
//! [`Action`]s, following the same unidirectional flow a UI would:
//!
//! ```text
//! UI input ─► Event ─► handle_event ─► store mutations ─► Actions ─► Runner
//!                ▲                                                     │
//!                └────────────── CatalogLoaded / ShareCompleted ───────┘
//! ```
//!
//! # Event Types
//!
//! - **Filters**: `SearchChanged`, `GenreSelected`, `YearSelected`,
//!   `SortSelected`, `ClearFilters`, `ShowSection`
//! - **Detail modal**: `OpenMovie`, `CloseMovie`, `DeepLink`
//! - **Movie actions**: `ToggleWatchlist`, `ShareMovie`
//! - **Catalog lifecycle**: `Load`, `Retry`, `CatalogLoaded`, `CatalogFailed`
//! - **Results**: `ShareCompleted`, `DismissNotification`

use super::deeplink::movie_id_from_link;
use super::modes::Section;
use super::state::Notification;
use crate::app::{Action, AppState};
use crate::catalog::{LoadTicket, Selection, SortKey};
use crate::domain::error::{MoviesError, Result};
use crate::domain::{Movie, MovieId};

/// Events triggered by user input or by completed side effects.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Starts the session's catalog load.
    Load,
    /// Reloads the catalog after a failed load. Ignored otherwise.
    Retry,

    /// Replaces the search term.
    SearchChanged(String),
    /// Selects a genre; `"all"` clears the constraint.
    GenreSelected(String),
    /// Selects a year; `"all"` clears the constraint.
    YearSelected(String),
    /// Selects a sort key; unknown keys fall back to popularity.
    SortSelected(String),
    /// Switches the results grid between all movies and the watchlist.
    ShowSection(Section),
    /// Resets search, genre and year and returns to the all-movies section.
    ClearFilters,

    /// Opens the detail modal for a movie.
    OpenMovie(MovieId),
    /// Closes the detail modal.
    CloseMovie,
    /// Opens the movie named by a `?movie=<id>` link.
    ///
    /// Resolved immediately when the catalog is ready, otherwise once it loads.
    /// Unknown or malformed identifiers are ignored.
    DeepLink(String),

    /// Adds the movie to the watchlist or removes it.
    ToggleWatchlist(MovieId),
    /// Shares a movie.
    ShareMovie(MovieId),
    /// Reports the outcome of a share attempt.
    ShareCompleted {
        movie_id: MovieId,
        success: bool,
    },

    /// Delivers a successful catalog load.
    CatalogLoaded {
        ticket: LoadTicket,
        movies: Vec<Movie>,
    },
    /// Delivers a failed catalog load.
    CatalogFailed {
        ticket: LoadTicket,
        /// Underlying cause; logged, never shown.
        reason: String,
    },

    /// Removes the toast at `index`.
    DismissNotification(usize),
}

impl Event {
    /// Variant name, used as a span field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Retry => "retry",
            Self::SearchChanged(_) => "search_changed",
            Self::GenreSelected(_) => "genre_selected",
            Self::YearSelected(_) => "year_selected",
            Self::SortSelected(_) => "sort_selected",
            Self::ShowSection(_) => "show_section",
            Self::ClearFilters => "clear_filters",
            Self::OpenMovie(_) => "open_movie",
            Self::CloseMovie => "close_movie",
            Self::DeepLink(_) => "deep_link",
            Self::ToggleWatchlist(_) => "toggle_watchlist",
            Self::ShareMovie(_) => "share_movie",
            Self::ShareCompleted { .. } => "share_completed",
            Self::CatalogLoaded { .. } => "catalog_loaded",
            Self::CatalogFailed { .. } => "catalog_failed",
            Self::DismissNotification(_) => "dismiss_notification",
        }
    }
}

fn start_load(state: &mut AppState) -> Vec<Action> {
    let ticket = state.catalog.begin_load();
    vec![Action::LoadCatalog { ticket }]
}

fn resolve_deep_link(state: &mut AppState) {
    let Some(id) = state.pending_deep_link.take() else {
        return;
    };

    if state.catalog.find(id).is_some() {
        tracing::debug!(movie_id = id, "opening deep-linked movie");
        state.selected = Some(id);
    } else {
        tracing::debug!(movie_id = id, "deep-linked movie not in catalog, ignoring");
    }
}

fn watchlist_notification(movie: &Movie, now_member: bool) -> Notification {
    if now_member {
        Notification::info("Added to Watchlist", format!("{} has been added to your watchlist.", movie.title))
    } else {
        Notification::info("Removed from Watchlist", format!("{} has been removed from your watchlist.", movie.title))
    }
}

/// Processes an event, mutates application state and returns actions to execute.
///
/// The boolean is `true` when the view model may have changed and the front end
/// should redraw.
///
/// # Errors
///
/// Returns [`MoviesError::Storage`] (or [`MoviesError::Io`]) when a watchlist
/// change cannot be persisted. The watchlist is left unchanged in that case.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    match event {
        Event::Load => Ok((true, start_load(state))),
        Event::Retry => {
            if state.catalog.error().is_none() {
                tracing::debug!("retry ignored, catalog has not failed");
                return Ok((false, vec![]));
            }
            Ok((true, start_load(state)))
        }
        Event::SearchChanged(term) => {
            if state.criteria.search == *term {
                return Ok((false, vec![]));
            }
            state.criteria.search.clone_from(term);
            Ok((true, vec![]))
        }
        Event::GenreSelected(genre) => {
            state.criteria.genre = genre.parse::<Selection>().unwrap_or_default();
            Ok((true, vec![]))
        }
        Event::YearSelected(year) => {
            state.criteria.year = year.parse::<Selection>().unwrap_or_default();
            Ok((true, vec![]))
        }
        Event::SortSelected(key) => {
            state.sort_key = key.parse::<SortKey>().unwrap_or_default();
            Ok((true, vec![]))
        }
        Event::ShowSection(section) => {
            if state.section == *section {
                return Ok((false, vec![]));
            }
            state.section = *section;
            Ok((true, vec![]))
        }
        Event::ClearFilters => {
            state.clear_filters();
            Ok((true, vec![]))
        }
        Event::OpenMovie(id) => {
            if state.find_movie(*id).is_none() {
                tracing::debug!(movie_id = id, "cannot open unknown movie");
                return Ok((false, vec![]));
            }
            state.selected = Some(*id);
            Ok((true, vec![]))
        }
        Event::CloseMovie => Ok((state.selected.take().is_some(), vec![])),
        Event::DeepLink(link) => {
            let Some(id) = movie_id_from_link(link) else {
                return Ok((false, vec![]));
            };
            state.pending_deep_link = Some(id);
            if state.catalog.is_ready() {
                resolve_deep_link(state);
                return Ok((true, vec![]));
            }
            tracing::debug!(movie_id = id, "deferring deep link until catalog loads");
            Ok((false, vec![]))
        }
        Event::ToggleWatchlist(id) => {
            let Some(movie) = state.find_movie(*id).cloned() else {
                tracing::debug!(movie_id = id, "cannot toggle unknown movie");
                return Ok((false, vec![]));
            };
            let now_member = state.watchlist.toggle(&movie)?;
            state.notify(watchlist_notification(&movie, now_member));
            Ok((true, vec![]))
        }
        Event::ShareMovie(id) => {
            let Some(movie) = state.find_movie(*id).cloned() else {
                tracing::debug!(movie_id = id, "cannot share unknown movie");
                return Ok((false, vec![]));
            };
            Ok((false, vec![Action::Share { movie }]))
        }
        Event::ShareCompleted { movie_id, success } => {
            if *success {
                let title = state.find_movie(*movie_id).map_or_else(|| "Movie".to_string(), |m| m.title.clone());
                state.notify(Notification::info("Movie Shared!", format!("{title} has been shared successfully.")));
            } else {
                state.notify(Notification::error("Share Failed", "Unable to share the movie. Please try again."));
            }
            Ok((true, vec![]))
        }
        Event::CatalogLoaded { ticket, movies } => {
            if !state.catalog.finish_load(*ticket, Ok(movies.clone())) {
                return Ok((false, vec![]));
            }
            resolve_deep_link(state);
            Ok((true, vec![]))
        }
        Event::CatalogFailed { ticket, reason } => {
            let applied = state
                .catalog
                .finish_load(*ticket, Err(MoviesError::Source(reason.clone())));
            if applied {
                state.pending_deep_link = None;
            }
            Ok((applied, vec![]))
        }
        Event::DismissNotification(index) => {
            if *index >= state.notifications.len() {
                return Ok((false, vec![]));
            }
            state.notifications.remove(*index);
            Ok((true, vec![]))
        }
    }
}
