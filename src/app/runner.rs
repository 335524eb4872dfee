//! Executes [`Action`]s and feeds their outcomes back into the handler.
//!
//! The runner is single-threaded: it is driven from one task on a
//! current-thread tokio runtime. Catalog loads run as spawned tasks so events
//! can still be dispatched while a load is pending; shares are awaited inline.

use super::{handle_event, Action, AppState, Event};
use crate::catalog::{spawn_load, LoadTask};
use crate::domain::error::Result;
use crate::share::{share_movie, Clipboard, ShareSurface};
use crate::source::MovieSource;
use std::collections::VecDeque;
use std::sync::Arc;

/// Drives the event loop against real collaborators.
pub struct Runner {
    source: Arc<dyn MovieSource>,
    max_pages: u32,
    share_surface: Option<Box<dyn ShareSurface>>,
    clipboard: Box<dyn Clipboard>,
    pending_load: Option<LoadTask>,
}

impl Runner {
    #[must_use]
    pub fn new(source: Arc<dyn MovieSource>, max_pages: u32, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            source,
            max_pages,
            share_surface: None,
            clipboard,
            pending_load: None,
        }
    }

    /// Uses `surface` as the preferred share channel.
    #[must_use]
    pub fn with_share_surface(mut self, surface: Box<dyn ShareSurface>) -> Self {
        self.share_surface = Some(surface);
        self
    }

    /// True while a spawned catalog load has not been collected.
    #[must_use]
    pub const fn has_pending_load(&self) -> bool {
        self.pending_load.is_some()
    }

    /// Handles `event` and every follow-up event produced by its actions.
    ///
    /// Returns whether any step asked for a redraw. Catalog loads are only
    /// started here; collect them with [`wait_for_load`](Self::wait_for_load).
    ///
    /// # Errors
    ///
    /// Propagates the first error returned by [`handle_event`]. Events queued
    /// after it are dropped.
    pub async fn dispatch(&mut self, state: &mut AppState, event: Event) -> Result<bool> {
        let mut queue = VecDeque::from([event]);
        let mut redraw = false;

        while let Some(event) = queue.pop_front() {
            let (changed, actions) = handle_event(state, &event)?;
            redraw |= changed;

            for action in actions {
                if let Some(follow_up) = self.execute(state, action).await {
                    queue.push_back(follow_up);
                }
            }
        }

        Ok(redraw)
    }

    /// Awaits the pending catalog load, if any, and dispatches its outcome.
    ///
    /// # Errors
    ///
    /// Propagates errors from dispatching the outcome event.
    pub async fn wait_for_load(&mut self, state: &mut AppState) -> Result<bool> {
        let Some(task) = self.pending_load.take() else {
            return Ok(false);
        };

        let event = match task.join().await {
            (ticket, Ok(movies)) => Event::CatalogLoaded { ticket, movies },
            (ticket, Err(e)) => Event::CatalogFailed {
                ticket,
                reason: e.to_string(),
            },
        };
        self.dispatch(state, event).await
    }

    async fn execute(&mut self, state: &AppState, action: Action) -> Option<Event> {
        match action {
            Action::LoadCatalog { ticket } => {
                if let Some(previous) = self.pending_load.take() {
                    previous.abort();
                }
                self.pending_load = Some(spawn_load(ticket, Arc::clone(&self.source), self.max_pages));
                None
            }
            Action::Share { movie } => {
                let success = share_movie(
                    &movie,
                    &state.share_origin,
                    self.share_surface.as_deref(),
                    &*self.clipboard,
                )
                .await;
                Some(Event::ShareCompleted {
                    movie_id: movie.id,
                    success,
                })
            }
        }
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("source", &self.source.name())
            .field("max_pages", &self.max_pages)
            .field("native_share", &self.share_surface.is_some())
            .field("pending_load", &self.pending_load)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::MoviesError;
    use crate::source::FixtureSource;
    use crate::storage::MemoryStore;
    use crate::watchlist::WatchlistStore;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct TestClipboard {
        texts: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    #[async_trait]
    impl Clipboard for TestClipboard {
        async fn write_text(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(MoviesError::Share("no clipboard".to_string()));
            }
            self.texts.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn new_state() -> AppState {
        AppState::new(WatchlistStore::load(Box::new(MemoryStore::default())), "http://localhost:8080")
    }

    #[tokio::test]
    async fn load_then_collect() {
        let mut state = new_state();
        let mut runner = Runner::new(Arc::new(FixtureSource::default()), 1, Box::<TestClipboard>::default());

        runner.dispatch(&mut state, Event::Load).await.unwrap();
        assert!(runner.has_pending_load());
        assert!(state.catalog.is_loading());

        assert!(runner.wait_for_load(&mut state).await.unwrap());
        assert!(!runner.has_pending_load());
        assert_eq!(state.catalog.movies().len(), 12);
    }

    #[tokio::test]
    async fn failing_source_surfaces_error_and_retry_recovers() {
        let mut state = new_state();
        let failing = FixtureSource::default().failing("503 Service Unavailable");
        let mut runner = Runner::new(Arc::new(failing), 1, Box::<TestClipboard>::default());

        runner.dispatch(&mut state, Event::Load).await.unwrap();
        runner.wait_for_load(&mut state).await.unwrap();
        assert!(state.catalog.error().is_some());
        assert!(state.compute_viewmodel().results.is_empty());

        runner.source = Arc::new(FixtureSource::default());
        runner.dispatch(&mut state, Event::Retry).await.unwrap();
        runner.wait_for_load(&mut state).await.unwrap();
        assert!(state.catalog.is_ready());
    }

    #[tokio::test]
    async fn second_load_aborts_the_first() {
        let mut state = new_state();
        let slow = FixtureSource::default().with_delay(Duration::from_millis(20));
        let mut runner = Runner::new(Arc::new(slow), 1, Box::<TestClipboard>::default());

        runner.dispatch(&mut state, Event::Load).await.unwrap();
        runner.dispatch(&mut state, Event::Load).await.unwrap();
        runner.wait_for_load(&mut state).await.unwrap();

        assert!(state.catalog.is_ready());
        assert!(!runner.has_pending_load());
    }

    #[tokio::test]
    async fn share_goes_through_clipboard_and_toasts() {
        let texts = Arc::new(Mutex::new(Vec::new()));
        let clipboard = TestClipboard {
            texts: Arc::clone(&texts),
            fail: false,
        };
        let mut state = new_state();
        let mut runner = Runner::new(Arc::new(FixtureSource::default()), 1, Box::new(clipboard));

        runner.dispatch(&mut state, Event::Load).await.unwrap();
        runner.wait_for_load(&mut state).await.unwrap();
        runner.dispatch(&mut state, Event::ShareMovie(1)).await.unwrap();

        assert!(texts.lock().unwrap()[0].ends_with("http://localhost:8080/?movie=1"));
        assert_eq!(state.notifications.last().map(|n| n.title.as_str()), Some("Movie Shared!"));
    }

    #[tokio::test]
    async fn failed_share_reports_error_toast() {
        let clipboard = TestClipboard {
            fail: true,
            ..Default::default()
        };
        let mut state = new_state();
        let mut runner = Runner::new(Arc::new(FixtureSource::default()), 1, Box::new(clipboard));

        runner.dispatch(&mut state, Event::Load).await.unwrap();
        runner.wait_for_load(&mut state).await.unwrap();
        runner.dispatch(&mut state, Event::ShareMovie(4)).await.unwrap();

        assert_eq!(state.notifications.last().map(|n| n.title.as_str()), Some("Share Failed"));
    }
}
