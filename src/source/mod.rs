//! Movie sources feeding the catalog.
//!
//! A [`MovieSource`] is an async producer of movie pages. The catalog does not
//! care whether movies come from the built-in fixture or from the TMDB API; it
//! drains pages through [`fetch_all`] and treats the result as one sequence.
//!
//! # Implementations
//!
//! - [`FixtureSource`]: static mock catalog, no network
//! - [`TmdbSource`]: paginated HTTP client for the TMDB v3 API

pub mod fixture;
pub mod tmdb;

pub use fixture::FixtureSource;
pub use tmdb::TmdbSource;

use crate::domain::error::Result;
use crate::domain::{Movie, MovieId};
use async_trait::async_trait;
use std::collections::HashSet;

/// One page of results from a movie source.
#[derive(Debug, Clone, PartialEq)]
pub struct MoviePage {
    pub movies: Vec<Movie>,
    /// 1-based page number this page represents.
    pub page: u32,
    /// Total pages the source reports for the same query.
    pub total_pages: u32,
}

/// Async producer of movie pages.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Fetches one page, optionally restricted by a free-text `query`.
    ///
    /// # Errors
    ///
    /// Returns [`MoviesError::Source`](crate::MoviesError::Source) when the
    /// source is unreachable or returns something that cannot be decoded.
    async fn fetch_page(&self, page: u32, query: Option<&str>) -> Result<MoviePage>;
}

/// Drains pages `1..=min(total_pages, max_pages)` into a single list.
///
/// Either every requested page loads or the first error is returned; partial
/// results are never handed back. Movies whose identifier already appeared on
/// an earlier page are dropped.
///
/// # Errors
///
/// Returns the first page error.
pub async fn fetch_all(source: &dyn MovieSource, query: Option<&str>, max_pages: u32) -> Result<Vec<Movie>> {
    let max_pages = max_pages.max(1);
    let mut movies = Vec::new();
    let mut seen: HashSet<MovieId> = HashSet::new();
    let mut page = 1;

    loop {
        tracing::debug!(source = source.name(), page, "fetching page");
        let result = source.fetch_page(page, query).await?;
        let fetched = result.movies.len();

        for movie in result.movies {
            if seen.insert(movie.id) {
                movies.push(movie);
            } else {
                tracing::debug!(movie_id = movie.id, "dropping duplicate movie");
            }
        }

        tracing::debug!(page, fetched, total_pages = result.total_pages, "page fetched");

        if page >= result.total_pages.min(max_pages) {
            break;
        }
        page += 1;
    }

    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MoviesError;
    use std::sync::Mutex;

    struct PagedSource {
        pages: Vec<Vec<MovieId>>,
        fail_on: Option<u32>,
        requested: Mutex<Vec<u32>>,
    }

    #[async_trait]
    impl MovieSource for PagedSource {
        fn name(&self) -> &str {
            "paged"
        }

        async fn fetch_page(&self, page: u32, _query: Option<&str>) -> Result<MoviePage> {
            self.requested.lock().unwrap().push(page);
            if self.fail_on == Some(page) {
                return Err(MoviesError::Source("boom".to_string()));
            }
            let ids = &self.pages[(page - 1) as usize];
            Ok(MoviePage {
                movies: ids.iter().map(|id| Movie::new(*id, format!("Movie {id}"))).collect(),
                page,
                total_pages: u32::try_from(self.pages.len()).unwrap(),
            })
        }
    }

    fn source(pages: Vec<Vec<MovieId>>, fail_on: Option<u32>) -> PagedSource {
        PagedSource {
            pages,
            fail_on,
            requested: Mutex::new(Vec::new()),
        }
    }

    #[tokio::test]
    async fn drains_pages_and_drops_duplicates() {
        let source = source(vec![vec![1, 2], vec![2, 3]], None);
        let movies = fetch_all(&source, None, 10).await.unwrap();
        let ids: Vec<_> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn respects_page_cap() {
        let source = source(vec![vec![1], vec![2], vec![3]], None);
        let movies = fetch_all(&source, None, 2).await.unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(*source.requested.lock().unwrap(), vec![1, 2]);
    }

    #[tokio::test]
    async fn any_page_failure_fails_the_whole_load() {
        let source = source(vec![vec![1], vec![2]], Some(2));
        assert!(fetch_all(&source, None, 5).await.is_err());
    }
}
