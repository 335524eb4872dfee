//! Application layer coordinating state, events and actions.
//!
//! This layer sits between a front end (the CLI in `main.rs`, or any UI) and
//! the catalog, watchlist, source and share modules. It follows a
//! unidirectional data flow:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Runner
//!                           ↑                                         ↓
//!                           └────────────── Result Events ────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects emitted by the event handler
//! - [`deeplink`]: `?movie=<id>` link parsing
//! - [`handler`]: event processing and state transitions
//! - [`modes`]: page section and notification kinds
//! - [`runner`]: executes actions on the tokio runtime
//! - [`state`]: central state container and view model computation
//! - [`viewmodel`]: renderable browse-page types
//!
//! # Example
//!
//! ```rust
//! use moviescorn::app::{handle_event, Action, AppState, Event};
//! use moviescorn::source::fixture::mock_movies;
//! use moviescorn::storage::MemoryStore;
//! use moviescorn::watchlist::WatchlistStore;
//!
//! let watchlist = WatchlistStore::load(Box::new(MemoryStore::default()));
//! let mut state = AppState::new(watchlist, "http://localhost:8080");
//!
//! let (_, actions) = handle_event(&mut state, &Event::Load)?;
//! let Action::LoadCatalog { ticket } = actions[0].clone() else { unreachable!() };
//!
//! handle_event(&mut state, &Event::CatalogLoaded { ticket, movies: mock_movies() })?;
//! handle_event(&mut state, &Event::ToggleWatchlist(3))?;
//! assert!(state.watchlist.is_member(3));
//! # Ok::<(), moviescorn::MoviesError>(())
//! ```

pub mod actions;
pub mod deeplink;
pub mod handler;
pub mod modes;
pub mod runner;
pub mod state;
pub mod viewmodel;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{NotificationKind, Section};
pub use runner::Runner;
pub use state::{AppState, Notification};
pub use viewmodel::{BrowseView, EmptyState, MovieCard};
