//! Side effects requested by the event handler.
//!
//! [`handle_event`](super::handle_event) mutates state synchronously and
//! returns the effectful work as a `Vec<Action>`. The [`Runner`](super::Runner)
//! executes each action and feeds its outcome back as an
//! [`Event`](super::Event).

use crate::catalog::LoadTicket;
use crate::domain::Movie;

/// Commands executed by the runner.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Fetches the catalog in the background.
    ///
    /// Completes with [`Event::CatalogLoaded`](super::Event::CatalogLoaded) or
    /// [`Event::CatalogFailed`](super::Event::CatalogFailed) carrying the same
    /// ticket. Any load still in flight is aborted first.
    LoadCatalog {
        /// Ticket issued by the catalog for this load.
        ticket: LoadTicket,
    },

    /// Shares a movie through the native surface or the clipboard.
    ///
    /// Completes with [`Event::ShareCompleted`](super::Event::ShareCompleted).
    Share {
        /// Snapshot of the movie being shared.
        movie: Movie,
    },
}
