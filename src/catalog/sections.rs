//! Fixed home-page sections derived from the catalog's load order.

use crate::domain::Movie;

/// Movies per carousel section.
pub const SECTION_SIZE: usize = 10;

/// Minimum average rating (0-10 scale) for the top-rated section.
pub const TOP_RATED_THRESHOLD: f64 = 8.5;

/// Views over the loaded movie list.
///
/// Slices are taken by position in load order, never from filtered or sorted
/// results: `featured` is item 0, `trending` items 1-10, `popular` items 11-20.
/// `top_rated` scans the whole list in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sections<'a> {
    pub featured: Option<&'a Movie>,
    pub trending: &'a [Movie],
    pub popular: &'a [Movie],
    pub top_rated: Vec<&'a Movie>,
}

fn window(movies: &[Movie], start: usize) -> &[Movie] {
    let start = start.min(movies.len());
    let end = (start + SECTION_SIZE).min(movies.len());
    &movies[start..end]
}

/// Derives the home-page sections from `movies`.
///
/// Short lists produce short or empty sections rather than errors.
#[must_use]
pub fn derive_sections(movies: &[Movie]) -> Sections<'_> {
    let top_rated = movies
        .iter()
        .filter(|m| m.vote_average.is_some_and(|v| v >= TOP_RATED_THRESHOLD))
        .take(SECTION_SIZE)
        .collect();

    Sections {
        featured: movies.first(),
        trending: window(movies, 1),
        popular: window(movies, 1 + SECTION_SIZE),
        top_rated,
    }
}
