//! Movie domain model and display helpers.
//!
//! A [`Movie`] is immutable once loaded into the catalog. Every optional field
//! degrades gracefully: helpers return `None` instead of panicking, so callers can
//! render "N/A" or skip the value.

use serde::{Deserialize, Serialize};

/// Identifier of a movie, unique within a catalog.
pub type MovieId = u64;

/// Base URL for poster and backdrop images.
const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Image size used for poster thumbnails.
const POSTER_SIZE: &str = "w500";

/// Image size used for hero and modal backdrops.
const BACKDROP_SIZE: &str = "original";

/// A movie record as produced by a movie source.
///
/// Field names match the JSON records persisted in the watchlist so existing
/// stored data round-trips without migration. Only `id` is required when
/// deserializing; everything else falls back to an empty value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,

    /// ISO `YYYY-MM-DD` date as delivered by the source. Kept raw because the
    /// year filter matches on the string itself.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    /// Average rating on a 0-10 scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f64>,

    #[serde(default)]
    pub genres: Vec<String>,

    /// Runtime in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,

    #[serde(default)]
    pub cast: Vec<String>,

    #[serde(default)]
    pub production_companies: Vec<String>,
}

impl Movie {
    /// Creates a movie with only an identifier and title set.
    ///
    /// # Examples
    ///
    /// ```
    /// use moviescorn::Movie;
    ///
    /// let movie = Movie::new(7, "The Godfather");
    /// assert_eq!(movie.id, 7);
    /// assert!(movie.genres.is_empty());
    /// assert!(movie.release_year().is_none());
    /// ```
    #[must_use]
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: None,
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            vote_average: None,
            genres: Vec::new(),
            runtime: None,
            director: None,
            cast: Vec::new(),
            production_companies: Vec::new(),
        }
    }

    /// Returns the release year parsed from the leading digits of `release_date`.
    ///
    /// ```
    /// use moviescorn::Movie;
    ///
    /// let mut movie = Movie::new(1, "Inception");
    /// movie.release_date = Some("2010-07-16".to_string());
    /// assert_eq!(movie.release_year(), Some(2010));
    /// ```
    #[must_use]
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        date.split('-').next()?.trim().parse().ok()
    }

    /// Returns the rating on a five-star scale, rounded to one decimal.
    ///
    /// A missing or zero average yields `None`, which the UI shows as "N/A".
    #[must_use]
    pub fn star_rating(&self) -> Option<f64> {
        self.vote_average
            .filter(|v| v.is_finite() && *v > 0.0)
            .map(|v| (v / 2.0 * 10.0).round() / 10.0)
    }

    /// Formats the runtime as hours and minutes, e.g. `"2h 28m"`.
    #[must_use]
    pub fn formatted_runtime(&self) -> Option<String> {
        let minutes = self.runtime.filter(|m| *m > 0)?;
        Some(format!("{}h {}m", minutes / 60, minutes % 60))
    }

    /// Returns the absolute poster URL, if the movie has a poster.
    #[must_use]
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_deref()
            .map(|path| image_url(POSTER_SIZE, path))
    }

    /// Returns the absolute backdrop URL, if the movie has a backdrop.
    #[must_use]
    pub fn backdrop_url(&self) -> Option<String> {
        self.backdrop_path
            .as_deref()
            .map(|path| image_url(BACKDROP_SIZE, path))
    }
}

fn image_url(size: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{IMAGE_BASE_URL}/{size}{path}")
    } else {
        format!("{IMAGE_BASE_URL}/{size}/{path}")
    }
}
