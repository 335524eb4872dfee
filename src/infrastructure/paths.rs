//! Platform directory resolution.
//!
//! Data (the watchlist file and trace exports) lives under the platform data
//! directory, configuration under the platform config directory, both in a
//! `moviescorn` subdirectory:
//!
//! | Platform | Data                                        | Config                                  |
//! |----------|---------------------------------------------|-----------------------------------------|
//! | Linux    | `~/.local/share/moviescorn`                 | `~/.config/moviescorn`                  |
//! | macOS    | `~/Library/Application Support/moviescorn`  | `~/Library/Application Support/moviescorn` |
//! | Windows  | `%APPDATA%\moviescorn`                      | `%APPDATA%\moviescorn`                  |

use std::path::{Path, PathBuf};

const APP_DIR: &str = "moviescorn";

/// Name of the watchlist file inside the data directory.
pub const WATCHLIST_FILE: &str = "watchlist.json";

/// Name of the trace export file inside the data directory.
pub const TRACE_FILE: &str = "moviescorn-traces.jsonl";

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Returns the default data directory.
///
/// Falls back to `./moviescorn` when the platform has no data directory.
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

/// Returns the default configuration file path.
#[must_use]
pub fn default_config_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a tilde, or when no home directory is known, are returned
/// unchanged.
///
/// ```
/// use moviescorn::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/var/lib/movies"), PathBuf::from("/var/lib/movies"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = dirs::home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}

/// Watchlist file path under `data_dir`.
#[must_use]
pub fn watchlist_file(data_dir: &Path) -> PathBuf {
    data_dir.join(WATCHLIST_FILE)
}
