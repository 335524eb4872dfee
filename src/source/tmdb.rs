//! TMDB v3 movie source.
//!
//! Fetches the popular-movies list, or search results when a query is given,
//! one page at a time. TMDB list endpoints only carry genre ids, so they are
//! mapped to names through the static table below; runtime, director, cast and
//! companies are not part of list results and stay empty.

use super::{MoviePage, MovieSource};
use crate::domain::error::{MoviesError, Result};
use crate::domain::Movie;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

/// Default API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB movie genre ids and their display names.
const GENRE_NAMES: &[(u32, &str)] = &[
    (28, "Action"),
    (12, "Adventure"),
    (16, "Animation"),
    (35, "Comedy"),
    (80, "Crime"),
    (99, "Documentary"),
    (18, "Drama"),
    (10751, "Family"),
    (14, "Fantasy"),
    (36, "History"),
    (27, "Horror"),
    (10402, "Music"),
    (9648, "Mystery"),
    (10749, "Romance"),
    (878, "Sci-Fi"),
    (10770, "TV Movie"),
    (53, "Thriller"),
    (10752, "War"),
    (37, "Western"),
];

#[derive(Debug, Deserialize)]
struct TmdbPage {
    #[serde(default)]
    page: u32,
    #[serde(default)]
    results: Vec<TmdbMovie>,
    #[serde(default)]
    total_pages: u32,
}

#[derive(Debug, Deserialize)]
struct TmdbMovie {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    overview: Option<String>,
    #[serde(default)]
    poster_path: Option<String>,
    #[serde(default)]
    backdrop_path: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
    #[serde(default)]
    vote_average: Option<f64>,
    #[serde(default)]
    genre_ids: Vec<u32>,
}

impl From<TmdbMovie> for Movie {
    fn from(raw: TmdbMovie) -> Self {
        let mut movie = Self::new(raw.id, raw.title.unwrap_or_default());
        movie.overview = raw.overview.filter(|s| !s.is_empty());
        movie.poster_path = raw.poster_path;
        movie.backdrop_path = raw.backdrop_path;
        movie.release_date = raw.release_date.filter(|s| !s.is_empty());
        movie.vote_average = raw.vote_average;
        movie.genres = raw.genre_ids.iter().filter_map(|id| genre_name(*id)).map(String::from).collect();
        movie
    }
}

fn genre_name(id: u32) -> Option<&'static str> {
    GENRE_NAMES
        .iter()
        .find_map(|(genre_id, name)| (*genre_id == id).then_some(*name))
}

/// HTTP client for TMDB list and search endpoints.
#[derive(Clone)]
pub struct TmdbSource {
    client: Client,
    api_key: String,
    base_url: String,
    language: String,
}

impl TmdbSource {
    /// Creates a source against [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`MoviesError::Config`] if `api_key` is empty.
    pub fn new(api_key: impl Into<String>, language: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, language, DEFAULT_BASE_URL)
    }

    /// Creates a source against a custom API root, e.g. a local mirror.
    ///
    /// # Errors
    ///
    /// Returns [`MoviesError::Config`] if `api_key` is empty.
    pub fn with_base_url(
        api_key: impl Into<String>,
        language: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(MoviesError::Config("TMDB API key is empty".to_string()));
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: language.into(),
        })
    }

    fn endpoint(&self, query: Option<&str>) -> String {
        if query.is_some() {
            format!("{}/search/movie", self.base_url)
        } else {
            format!("{}/movie/popular", self.base_url)
        }
    }
}

impl std::fmt::Debug for TmdbSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbSource")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl MovieSource for TmdbSource {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn fetch_page(&self, page: u32, query: Option<&str>) -> Result<MoviePage> {
        let query = query.map(str::trim).filter(|q| !q.is_empty());
        let url = self.endpoint(query);
        let page_param = page.to_string();

        let mut params: Vec<(&str, &str)> = vec![
            ("api_key", self.api_key.as_str()),
            ("language", self.language.as_str()),
            ("page", page_param.as_str()),
        ];
        if let Some(q) = query {
            params.push(("query", q));
        }

        tracing::debug!(url = %url, page, has_query = query.is_some(), "requesting TMDB page");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| MoviesError::Source(format!("request to TMDB failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MoviesError::Source(format!("TMDB returned HTTP {status}")));
        }

        let body: TmdbPage = response
            .json()
            .await
            .map_err(|e| MoviesError::Source(format!("failed to decode TMDB response: {e}")))?;

        Ok(page_from_response(body, page))
    }
}

fn page_from_response(body: TmdbPage, requested: u32) -> MoviePage {
    MoviePage {
        page: if body.page == 0 { requested } else { body.page },
        total_pages: body.total_pages,
        movies: body.results.into_iter().map(Movie::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "page": 1,
        "results": [
            {
                "id": 27205,
                "title": "Inception",
                "overview": "Cobb steals secrets.",
                "poster_path": "/poster.jpg",
                "backdrop_path": null,
                "release_date": "2010-07-15",
                "vote_average": 8.4,
                "genre_ids": [28, 878, 12, 424242]
            },
            {
                "id": 1,
                "title": "Untitled",
                "overview": "",
                "release_date": ""
            }
        ],
        "total_pages": 500,
        "total_results": 10000
    }"#;

    #[test]
    fn maps_list_results_to_movies() {
        let body: TmdbPage = serde_json::from_str(SAMPLE).unwrap();
        let page = page_from_response(body, 1);

        assert_eq!(page.total_pages, 500);
        assert_eq!(page.movies.len(), 2);

        let inception = &page.movies[0];
        assert_eq!(inception.id, 27205);
        assert_eq!(inception.genres, vec!["Action", "Sci-Fi", "Adventure"]);
        assert_eq!(inception.release_year(), Some(2010));
        assert!(inception.backdrop_path.is_none());
        assert!(inception.cast.is_empty());
    }

    #[test]
    fn empty_strings_become_absent() {
        let body: TmdbPage = serde_json::from_str(SAMPLE).unwrap();
        let page = page_from_response(body, 1);
        let untitled = &page.movies[1];
        assert!(untitled.overview.is_none());
        assert!(untitled.release_date.is_none());
    }

    #[test]
    fn rejects_empty_api_key() {
        assert!(matches!(TmdbSource::new("  ", "en-US"), Err(MoviesError::Config(_))));
    }

    #[test]
    fn search_uses_search_endpoint() {
        let source = TmdbSource::with_base_url("key", "en-US", "http://localhost:9/3/").unwrap();
        assert_eq!(source.endpoint(None), "http://localhost:9/3/movie/popular");
        assert_eq!(source.endpoint(Some("nolan")), "http://localhost:9/3/search/movie");
    }
}
