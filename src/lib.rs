//! MoviesCorn: the state-management core of a movie browsing interface.
//!
//! The crate provides:
//! - A catalog store that loads a movie set once per session and derives
//!   filtered, sorted and sectioned views from it
//! - A persisted watchlist with fail-soft loading and rollback on write failure
//! - Movie sources for a built-in fixture catalog and the TMDB API
//! - Sharing through a native surface or the clipboard, plus social intent links
//! - An event-driven application layer that any front end can drive
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI front end (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Event handler
//! │  - Event handling and actions                       │  ← View models
//! │  - Runner (async side effects)                      │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Catalog       │   │ Watchlist     │   │ Share         │
//! │ (catalog/)    │   │ (watchlist/)  │   │ (share/)      │
//! │ - Filter/sort │   │ - Membership  │   │ - Payloads    │
//! │ - Sections    │   │ - Persistence │   │ - Fallbacks   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │
//! ┌───────────────┐   ┌───────────────┐
//! │ Sources       │   │ Storage       │
//! │ (source/)     │   │ (storage/)    │
//! │ - Fixture     │   │ - JSON file   │
//! │ - TMDB        │   │ - Memory      │
//! └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: application state, events, actions, runner and view models
//! - [`catalog`]: catalog store, filtering, sorting and sections
//! - [`domain`]: movie model and error types
//! - [`infrastructure`]: platform paths
//! - [`observability`]: tracing subscriber and span export
//! - [`share`]: share payloads and channels
//! - [`source`]: movie sources
//! - [`storage`]: key-value persistence backends
//! - [`watchlist`]: persisted watchlist store
//!
//! # Example
//!
//! ```rust
//! use moviescorn::catalog::{CatalogStore, Criteria, SortKey};
//! use moviescorn::source::FixtureSource;
//!
//! # tokio_test_block_on(async {
//! let mut catalog = CatalogStore::new();
//! catalog.load(&FixtureSource::default(), 1).await;
//!
//! let nolan = catalog.search(&Criteria::new("nolan", "all", "all"), SortKey::Rating);
//! assert_eq!(nolan[0].title, "The Dark Knight");
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(f)
//! # }
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod share;
pub mod source;
pub mod storage;
pub mod watchlist;

pub use app::{handle_event, Action, AppState, BrowseView, Event, Runner, Section};
pub use domain::{Movie, MovieId, MoviesError, Result};

use serde::{Deserialize, Serialize};
use source::{FixtureSource, MovieSource, TmdbSource};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use storage::JsonFileStore;
use watchlist::WatchlistStore;

/// Environment variable that supplies the TMDB API key.
pub const TMDB_API_KEY_ENV: &str = "MOVIESCORN_TMDB_API_KEY";

/// Where the catalog comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// The twelve built-in movies.
    #[default]
    Fixture,
    /// The TMDB popular-movies listing.
    Tmdb,
}

impl std::str::FromStr for SourceKind {
    type Err = MoviesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixture" | "mock" => Ok(Self::Fixture),
            "tmdb" => Ok(Self::Tmdb),
            other => Err(MoviesError::Config(format!("unknown source: {other}"))),
        }
    }
}

/// Runtime configuration.
///
/// Read from `config.toml` in the platform config directory; every field is
/// optional.
///
/// ```toml
/// source = "tmdb"
/// tmdb_api_key = "..."
/// language = "en-US"
/// max_pages = 5
/// data_dir = "~/.local/share/moviescorn"
/// share_origin = "https://moviescorn.example"
/// trace_level = "debug"
/// trace_export = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog source. Default: `fixture`
    pub source: SourceKind,

    /// TMDB API key. Overridden by the `MOVIESCORN_TMDB_API_KEY` variable.
    pub tmdb_api_key: Option<String>,

    /// TMDB API base URL. Default: `https://api.themoviedb.org/3`
    pub tmdb_base_url: Option<String>,

    /// Response language sent to TMDB. Default: `"en-US"`
    pub language: String,

    /// Maximum number of pages drained from a paginated source. Default: 5
    pub max_pages: u32,

    /// Simulated latency of the fixture source in milliseconds. Default: 0
    pub fixture_delay_ms: u64,

    /// Directory for the watchlist and trace files. `~` is expanded.
    /// Default: the platform data directory.
    pub data_dir: Option<String>,

    /// Origin used to build share links. Default: `"http://localhost:8080"`
    pub share_origin: String,

    /// Log filter when `RUST_LOG` is unset, e.g. `"debug"`. Default: `"warn"`
    pub trace_level: Option<String>,

    /// Export spans as JSON lines to the data directory. Default: `false`
    pub trace_export: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceKind::Fixture,
            tmdb_api_key: None,
            tmdb_base_url: None,
            language: "en-US".to_string(),
            max_pages: 5,
            fixture_delay_ms: 0,
            data_dir: None,
            share_origin: "http://localhost:8080".to_string(),
            trace_level: None,
            trace_export: false,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Config {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`MoviesError::Config`] when the document is not valid TOML or
    /// a field has the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| MoviesError::Config(e.to_string()))
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    ///
    /// The `MOVIESCORN_TMDB_API_KEY` variable is applied on top.
    ///
    /// # Errors
    ///
    /// Returns [`MoviesError::Io`] if the file exists but cannot be read, or
    /// [`MoviesError::Config`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            tracing::debug!(path = %path.display(), "loading config file");
            Self::from_toml_str(&std::fs::read_to_string(path)?)?
        } else {
            Self::default()
        };

        if let Ok(key) = std::env::var(TMDB_API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.tmdb_api_key = Some(key);
            }
        }

        Ok(config)
    }

    /// Applies `key=value` overrides, e.g. from the command line.
    ///
    /// Unknown keys and unparsable values leave the configured value in place.
    /// Their keys are returned so callers can report them once logging is up.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use moviescorn::{Config, SourceKind};
    ///
    /// let mut overrides = BTreeMap::new();
    /// overrides.insert("source".to_string(), "tmdb".to_string());
    /// overrides.insert("max_pages".to_string(), "2".to_string());
    ///
    /// let mut config = Config::default();
    /// assert!(config.apply_overrides(&overrides).is_empty());
    /// assert_eq!(config.source, SourceKind::Tmdb);
    /// assert_eq!(config.max_pages, 2);
    /// ```
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) -> Vec<String> {
        let mut rejected = Vec::new();
        for (key, value) in overrides {
            let value = value.trim();
            let applied = match key.as_str() {
                "source" => value.parse::<SourceKind>().map(|s| self.source = s).is_ok(),
                "tmdb_api_key" => {
                    self.tmdb_api_key = Some(value.to_string());
                    true
                }
                "tmdb_base_url" => {
                    self.tmdb_base_url = Some(value.to_string());
                    true
                }
                "language" => {
                    self.language = value.to_string();
                    true
                }
                "max_pages" => value.parse::<u32>().map(|n| self.max_pages = n).is_ok(),
                "fixture_delay_ms" => value.parse::<u64>().map(|n| self.fixture_delay_ms = n).is_ok(),
                "data_dir" => {
                    self.data_dir = Some(value.to_string());
                    true
                }
                "share_origin" => {
                    self.share_origin = value.to_string();
                    true
                }
                "trace_level" => {
                    self.trace_level = Some(value.to_string());
                    true
                }
                "trace_export" => parse_flag(value).map(|b| self.trace_export = b).is_some(),
                _ => false,
            };

            if !applied {
                tracing::debug!(key = %key, value = %value, "ignoring config override");
                rejected.push(key.clone());
            }
        }
        rejected
    }

    /// Resolved data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .as_deref()
            .map_or_else(infrastructure::default_data_dir, infrastructure::expand_tilde)
    }

    /// Builds the configured movie source.
    ///
    /// # Errors
    ///
    /// Returns [`MoviesError::Config`] when the TMDB source is selected without
    /// an API key, or the HTTP client cannot be built.
    pub fn build_source(&self) -> Result<Arc<dyn MovieSource>> {
        match self.source {
            SourceKind::Fixture => {
                let fixture = FixtureSource::default().with_delay(Duration::from_millis(self.fixture_delay_ms));
                Ok(Arc::new(fixture))
            }
            SourceKind::Tmdb => {
                let key = self
                    .tmdb_api_key
                    .clone()
                    .ok_or_else(|| MoviesError::Config(format!("tmdb source requires {TMDB_API_KEY_ENV}")))?;
                let source = match &self.tmdb_base_url {
                    Some(base_url) => TmdbSource::with_base_url(key, self.language.clone(), base_url.clone())?,
                    None => TmdbSource::new(key, self.language.clone())?,
                };
                Ok(Arc::new(source))
            }
        }
    }
}

/// Creates the application state for `config`.
///
/// Opens (or creates) the watchlist file in the data directory and loads the
/// watchlist from it. The catalog starts idle; dispatch [`Event::Load`] to
/// fetch it.
///
/// # Errors
///
/// Returns [`MoviesError::Io`] when the data directory cannot be created.
pub fn initialize(config: &Config) -> Result<AppState> {
    let data_dir = config.data_dir();
    let _span = tracing::debug_span!("initialize", data_dir = %data_dir.display()).entered();

    let store = JsonFileStore::open(infrastructure::watchlist_file(&data_dir))?;
    let watchlist = WatchlistStore::load(Box::new(store));
    tracing::debug!(entries = watchlist.len(), "watchlist loaded");

    Ok(AppState::new(watchlist, config.share_origin.clone()))
}
