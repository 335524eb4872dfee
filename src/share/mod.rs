//! Movie sharing.
//!
//! A share first goes through a native [`ShareSurface`] when one is available
//! and falls back to copying a plain-text rendering to a [`Clipboard`]. Social
//! intent links for a few platforms are built by [`social_share_url`].

use crate::domain::error::{MoviesError, Result};
use crate::domain::Movie;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use tracing::Instrument;

/// Brand name used in share titles.
pub const APP_NAME: &str = "MoviesCorn";

/// Number of overview characters included in the share text.
pub const OVERVIEW_EXCERPT_CHARS: usize = 100;

/// Link that reopens the app on `movie`, e.g. `http://localhost:8080/?movie=3`.
#[must_use]
pub fn share_url(origin: &str, movie: &Movie) -> String {
    format!("{}/?movie={}", origin.trim_end_matches('/'), movie.id)
}

fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Title, text and URL of a share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    /// Builds the payload for `movie`.
    ///
    /// ```
    /// use moviescorn::share::SharePayload;
    /// use moviescorn::Movie;
    ///
    /// let mut movie = Movie::new(3, "Interstellar");
    /// movie.release_date = Some("2014-11-07".to_string());
    /// movie.overview = Some("A team of explorers.".to_string());
    ///
    /// let payload = SharePayload::for_movie(&movie, "http://localhost:8080");
    /// assert_eq!(payload.title, "Check out \"Interstellar\" on MoviesCorn");
    /// assert_eq!(payload.text, "Interstellar (2014) - A team of explorers....");
    /// assert_eq!(payload.url, "http://localhost:8080/?movie=3");
    /// ```
    #[must_use]
    pub fn for_movie(movie: &Movie, origin: &str) -> Self {
        let year = movie
            .release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .filter(|y| !y.is_empty());
        let overview = excerpt(movie.overview.as_deref().unwrap_or_default(), OVERVIEW_EXCERPT_CHARS);

        let text = match year {
            Some(year) => format!("{} ({year}) - {overview}...", movie.title),
            None => format!("{} - {overview}...", movie.title),
        };

        Self {
            title: format!("Check out \"{}\" on {APP_NAME}", movie.title),
            text,
            url: share_url(origin, movie),
        }
    }

    /// Clipboard rendering: title, text and URL on separate lines.
    #[must_use]
    pub fn clipboard_text(&self) -> String {
        format!("{}\n{}\n{}", self.title, self.text, self.url)
    }
}

/// A platform share sheet.
#[async_trait]
pub trait ShareSurface: Send + Sync {
    async fn share(&self, payload: &SharePayload) -> Result<()>;
}

/// Text clipboard used when no share surface exists or it fails.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Writes the clipboard text to stdout. Used by the command-line front end.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutClipboard;

#[async_trait]
impl Clipboard for StdoutClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        use std::io::Write;

        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}")?;
        stdout.flush()?;
        Ok(())
    }
}

/// Shares `movie`, returning whether any channel succeeded.
///
/// Failures are logged and never propagated.
pub async fn share_movie(movie: &Movie, origin: &str, native: Option<&dyn ShareSurface>, clipboard: &dyn Clipboard) -> bool {
    let payload = SharePayload::for_movie(movie, origin);

    async {
        if let Some(surface) = native {
            match surface.share(&payload).await {
                Ok(()) => return true,
                Err(e) => tracing::info!(error = %e, "native share failed, falling back to clipboard"),
            }
        }

        match clipboard.write_text(&payload.clipboard_text()).await {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, "error copying share text to clipboard");
                false
            }
        }
    }
    .instrument(tracing::debug_span!("share_movie", movie_id = movie.id))
    .await
}

/// Social networks with a share intent URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Twitter,
    Facebook,
    Reddit,
}

impl FromStr for Platform {
    type Err = MoviesError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "twitter" | "x" => Ok(Self::Twitter),
            "facebook" => Ok(Self::Facebook),
            "reddit" => Ok(Self::Reddit),
            other => Err(MoviesError::Share(format!("unknown share platform: {other}"))),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Twitter => "twitter",
            Self::Facebook => "facebook",
            Self::Reddit => "reddit",
        })
    }
}

/// Intent URL that shares `movie` on `platform`.
#[must_use]
pub fn social_share_url(movie: &Movie, origin: &str, platform: Platform) -> String {
    let payload = SharePayload::for_movie(movie, origin);
    let url = urlencoding::encode(&payload.url);
    let title = urlencoding::encode(&payload.title);

    match platform {
        Platform::Twitter => format!("https://twitter.com/intent/tweet?text={title}&url={url}"),
        Platform::Facebook => format!("https://www.facebook.com/sharer/sharer.php?u={url}"),
        Platform::Reddit => format!("https://reddit.com/submit?url={url}&title={title}"),
    }
}
