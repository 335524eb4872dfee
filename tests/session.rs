//! End-to-end sessions against the fixture source and an on-disk watchlist.

use async_trait::async_trait;
use moviescorn::app::NotificationKind;
use moviescorn::catalog::Criteria;
use moviescorn::share::Clipboard;
use moviescorn::source::FixtureSource;
use moviescorn::{initialize, AppState, Config, Event, MovieId, Runner, Section};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct RecordingClipboard(Arc<Mutex<Vec<String>>>);

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> moviescorn::Result<()> {
        self.0.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn config_in(dir: &Path) -> Config {
    Config {
        data_dir: Some(dir.display().to_string()),
        ..Config::default()
    }
}

fn runner_with(source: FixtureSource) -> Runner {
    Runner::new(Arc::new(source), 1, Box::new(RecordingClipboard::default()))
}

async fn loaded_session(dir: &Path) -> (AppState, Runner) {
    let mut state = initialize(&config_in(dir)).unwrap();
    let mut runner = runner_with(FixtureSource::default());
    runner.dispatch(&mut state, Event::Load).await.unwrap();
    runner.wait_for_load(&mut state).await.unwrap();
    assert!(state.catalog.is_ready());
    (state, runner)
}

fn result_ids(state: &AppState) -> Vec<MovieId> {
    state.compute_viewmodel().results.iter().map(|c| c.movie.id).collect()
}

#[tokio::test]
async fn watchlist_survives_restart_in_insertion_order() {
    let dir = TempDir::new().unwrap();

    {
        let (mut state, mut runner) = loaded_session(dir.path()).await;
        for id in [5, 2, 9] {
            runner.dispatch(&mut state, Event::ToggleWatchlist(id)).await.unwrap();
        }
    }

    let (mut state, mut runner) = loaded_session(dir.path()).await;
    assert_eq!(state.watchlist.ids().collect::<Vec<_>>(), vec![5, 2, 9]);

    runner.dispatch(&mut state, Event::ToggleWatchlist(2)).await.unwrap();
    drop(state);

    let state = initialize(&config_in(dir.path())).unwrap();
    assert_eq!(state.watchlist.ids().collect::<Vec<_>>(), vec![5, 9]);
}

#[tokio::test]
async fn stored_entries_open_before_catalog_loads() {
    let dir = TempDir::new().unwrap();
    {
        let (mut state, mut runner) = loaded_session(dir.path()).await;
        runner.dispatch(&mut state, Event::ToggleWatchlist(7)).await.unwrap();
    }

    let state = initialize(&config_in(dir.path())).unwrap();
    assert!(!state.catalog.is_ready());
    assert_eq!(state.find_movie(7).map(|m| m.title.as_str()), Some("The Godfather"));
}

#[tokio::test]
async fn corrupt_watchlist_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("watchlist.json"), "{ definitely not json").unwrap();

    let (mut state, mut runner) = loaded_session(dir.path()).await;
    assert!(state.watchlist.is_empty());
    assert!(dir.path().join("watchlist.corrupt").exists());

    runner.dispatch(&mut state, Event::ToggleWatchlist(1)).await.unwrap();
    let reopened = initialize(&config_in(dir.path())).unwrap();
    assert_eq!(reopened.watchlist.len(), 1);
}

#[test]
fn non_utf8_watchlist_file_starts_empty() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("watchlist.json"), [0xff, 0xfe, b'{', 0x80]).unwrap();

    let state = initialize(&config_in(dir.path())).unwrap();
    assert!(state.watchlist.is_empty());
    assert!(dir.path().join("watchlist.corrupt").exists());
}

#[tokio::test]
async fn deep_link_opens_movie_once_catalog_is_ready() {
    let dir = TempDir::new().unwrap();
    let mut state = initialize(&config_in(dir.path())).unwrap();
    let mut runner = runner_with(FixtureSource::default());

    runner
        .dispatch(&mut state, Event::DeepLink("http://localhost:8080/?movie=3".to_string()))
        .await
        .unwrap();
    assert!(state.selected_movie().is_none());

    runner.dispatch(&mut state, Event::Load).await.unwrap();
    runner.wait_for_load(&mut state).await.unwrap();

    assert_eq!(state.selected_movie().map(|m| m.title.as_str()), Some("Interstellar"));
}

#[tokio::test]
async fn unknown_deep_link_opens_nothing() {
    let dir = TempDir::new().unwrap();
    let (mut state, mut runner) = loaded_session(dir.path()).await;

    runner.dispatch(&mut state, Event::DeepLink("/?movie=999".to_string())).await.unwrap();
    runner.dispatch(&mut state, Event::DeepLink("/?movie=abc".to_string())).await.unwrap();

    assert!(state.selected_movie().is_none());
}

#[tokio::test]
async fn every_result_satisfies_the_active_filters() {
    let dir = TempDir::new().unwrap();
    let (mut state, mut runner) = loaded_session(dir.path()).await;

    for event in [
        Event::GenreSelected("Sci-Fi".to_string()),
        Event::SortSelected("rating".to_string()),
    ] {
        runner.dispatch(&mut state, event).await.unwrap();
    }

    let view = state.compute_viewmodel();
    assert_eq!(view.heading, "Search Results");
    let criteria = Criteria::new("", "Sci-Fi", "all");
    assert!(view.results.iter().all(|c| criteria.matches(c.movie)));

    let ratings: Vec<f64> = view.results.iter().filter_map(|c| c.movie.vote_average).collect();
    assert!(ratings.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn director_search_finds_every_nolan_film() {
    let dir = TempDir::new().unwrap();
    let (mut state, mut runner) = loaded_session(dir.path()).await;

    runner.dispatch(&mut state, Event::SearchChanged("NOLAN".to_string())).await.unwrap();
    let mut ids = result_ids(&state);
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);

    runner.dispatch(&mut state, Event::ClearFilters).await.unwrap();
    assert_eq!(result_ids(&state).len(), 12);
}

#[tokio::test]
async fn unmatched_genre_shows_the_catalog_empty_state() {
    let dir = TempDir::new().unwrap();
    let (mut state, mut runner) = loaded_session(dir.path()).await;

    runner.dispatch(&mut state, Event::GenreSelected("Horror".to_string())).await.unwrap();

    let view = state.compute_viewmodel();
    assert!(view.results.is_empty());
    let empty = view.empty_state.unwrap();
    assert_eq!(empty.action, "Clear Filters");
}

#[tokio::test]
async fn watchlist_section_lists_only_members() {
    let dir = TempDir::new().unwrap();
    let (mut state, mut runner) = loaded_session(dir.path()).await;

    runner.dispatch(&mut state, Event::ShowSection(Section::Watchlist)).await.unwrap();
    let view = state.compute_viewmodel();
    assert_eq!(view.empty_state.map(|e| e.action), Some("Browse Movies"));
    assert!(view.trending.is_empty());

    for id in [4, 8] {
        runner.dispatch(&mut state, Event::ToggleWatchlist(id)).await.unwrap();
    }
    let view = state.compute_viewmodel();
    assert_eq!(view.watchlist_count, 2);
    assert!(view.results.iter().all(|c| c.in_watchlist));
    let mut ids: Vec<MovieId> = view.results.iter().map(|c| c.movie.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![4, 8]);
}

#[tokio::test]
async fn failed_load_reports_error_without_empty_state() {
    let dir = TempDir::new().unwrap();
    let mut state = initialize(&config_in(dir.path())).unwrap();
    let mut runner = runner_with(FixtureSource::default().failing("offline"));

    runner.dispatch(&mut state, Event::Load).await.unwrap();
    runner.wait_for_load(&mut state).await.unwrap();

    let view = state.compute_viewmodel();
    assert_eq!(view.error, Some("Failed to fetch movies. Please try again later."));
    assert!(view.results.is_empty());
    assert!(view.empty_state.is_none());
}

#[tokio::test]
async fn share_without_native_surface_uses_clipboard() {
    let dir = TempDir::new().unwrap();
    let mut state = initialize(&config_in(dir.path())).unwrap();
    let clipboard = RecordingClipboard::default();
    let mut runner = Runner::new(Arc::new(FixtureSource::default()), 1, Box::new(clipboard.clone()));
    runner.dispatch(&mut state, Event::Load).await.unwrap();
    runner.wait_for_load(&mut state).await.unwrap();

    runner.dispatch(&mut state, Event::ShareMovie(3)).await.unwrap();

    let written = clipboard.0.lock().unwrap().clone();
    assert_eq!(written.len(), 1);
    assert!(written[0].starts_with("Check out \"Interstellar\" on MoviesCorn\n"));
    assert!(written[0].ends_with("http://localhost:8080/?movie=3"));

    let last = state.notifications.last().unwrap();
    assert_eq!(last.title, "Movie Shared!");
    assert_eq!(last.kind, NotificationKind::Info);
}
