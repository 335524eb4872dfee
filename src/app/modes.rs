//! Page section and notification kinds.
//!
//! The browse page shows one of two sections:
//! - **All**: the home carousels followed by the full filtered catalog
//! - **Watchlist**: only watchlist members, with the same filters applied

use std::fmt;
use std::str::FromStr;

/// Which movie collection the results grid draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    /// Every catalog movie. Carousels are visible.
    #[default]
    All,

    /// Watchlist members only. Carousels are hidden.
    Watchlist,
}

impl FromStr for Section {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.trim().eq_ignore_ascii_case("watchlist") {
            Self::Watchlist
        } else {
            Self::All
        })
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Watchlist => "watchlist",
        })
    }
}

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Info,
    /// Rendered as a destructive toast.
    Error,
}
