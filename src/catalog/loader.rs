//! Background catalog loading.
//!
//! [`spawn_load`] runs a full source drain on the tokio runtime and returns a
//! [`LoadTask`] handle. The handle can be awaited for the outcome or aborted.
//! Joining an aborted task yields a cancellation error. The runner drops
//! aborted tasks without joining them, but a cancelled outcome passed to
//! [`CatalogStore::finish_load`](super::CatalogStore::finish_load) under a
//! current ticket is applied like any other failure. Superseded tickets are
//! always ignored.

use super::LoadTicket;
use crate::domain::error::{MoviesError, Result};
use crate::domain::Movie;
use crate::source::{fetch_all, MovieSource};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle to an in-flight catalog load.
#[derive(Debug)]
pub struct LoadTask {
    ticket: LoadTicket,
    handle: JoinHandle<Result<Vec<Movie>>>,
}

impl LoadTask {
    /// Ticket issued by [`CatalogStore::begin_load`](super::CatalogStore::begin_load)
    /// for this load.
    #[must_use]
    pub const fn ticket(&self) -> LoadTicket {
        self.ticket
    }

    /// Cancels the load. Awaiting [`join`](Self::join) afterwards yields an error.
    pub fn abort(&self) {
        tracing::debug!(ticket = ?self.ticket, "aborting catalog load");
        self.handle.abort();
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the load and returns its ticket with the outcome.
    ///
    /// A cancelled or panicked task is reported as a
    /// [`MoviesError::Source`] outcome.
    pub async fn join(self) -> (LoadTicket, Result<Vec<Movie>>) {
        let outcome = match self.handle.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => Err(MoviesError::Source("catalog load was cancelled".to_string())),
            Err(e) => Err(MoviesError::Source(format!("catalog load task failed: {e}"))),
        };
        (self.ticket, outcome)
    }
}

/// Spawns a load of up to `max_pages` pages from `source`.
///
/// Must be called from within a tokio runtime.
#[must_use]
pub fn spawn_load(ticket: LoadTicket, source: Arc<dyn MovieSource>, max_pages: u32) -> LoadTask {
    tracing::debug!(ticket = ?ticket, source = source.name(), max_pages, "spawning catalog load");
    let handle = tokio::spawn(async move { fetch_all(source.as_ref(), None, max_pages).await });
    LoadTask { ticket, handle }
}
