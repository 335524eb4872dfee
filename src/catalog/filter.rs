//! Search, genre and year filtering.
//!
//! Matching rules:
//!
//! - **Search**: case-insensitive substring of the title, overview, director or
//!   any cast member. An empty term matches everything.
//! - **Genre**: exact membership in the movie's genre list.
//! - **Year**: substring of the raw release date string. `"199"` therefore
//!   matches every release in the 1990s; this is intentional and kept.

use crate::domain::Movie;
use std::fmt;
use std::str::FromStr;

/// Sentinel that disables a genre or year constraint.
pub const ALL: &str = "all";

/// Genres offered in the filter menu.
pub const GENRES: [&str; 10] = [
    "Action",
    "Comedy",
    "Drama",
    "Horror",
    "Sci-Fi",
    "Romance",
    "Thriller",
    "Adventure",
    "Fantasy",
    "Crime",
];

/// Number of years offered in the year menu.
pub const YEAR_OPTION_COUNT: i32 = 30;

/// Year menu entries, newest first, ending `YEAR_OPTION_COUNT` years back.
///
/// ```
/// use moviescorn::catalog::filter::year_options;
///
/// let years = year_options(2024);
/// assert_eq!(years.first(), Some(&2024));
/// assert_eq!(years.last(), Some(&1995));
/// ```
#[must_use]
pub fn year_options(latest: i32) -> Vec<i32> {
    (0..YEAR_OPTION_COUNT).map(|offset| latest - offset).collect()
}

/// A menu selection that is either the `all` wildcard or one concrete value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl FromStr for Selection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            Ok(Self::All)
        } else {
            Ok(Self::Only(s.to_string()))
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL),
            Self::Only(value) => f.write_str(value),
        }
    }
}

/// Current search term plus genre and year selections.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Criteria {
    pub search: String,
    pub genre: Selection,
    pub year: Selection,
}

impl Criteria {
    /// Builds criteria from raw menu strings, treating `"all"` as the wildcard.
    ///
    /// ```
    /// use moviescorn::catalog::Criteria;
    ///
    /// let criteria = Criteria::new("nolan", "all", "2010");
    /// assert!(criteria.genre.is_all());
    /// assert!(!criteria.is_unfiltered());
    /// ```
    #[must_use]
    pub fn new(search: &str, genre: &str, year: &str) -> Self {
        let parse = |s: &str| s.parse::<Selection>().unwrap_or_default();
        Self {
            search: search.to_string(),
            genre: parse(genre),
            year: parse(year),
        }
    }

    /// True when no constraint is active, i.e. every movie matches.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.search.is_empty() && self.genre.is_all() && self.year.is_all()
    }

    /// Tests a single movie against all three constraints.
    #[must_use]
    pub fn matches(&self, movie: &Movie) -> bool {
        matches_search(movie, &self.search) && matches_genre(movie, &self.genre) && matches_year(movie, &self.year)
    }
}

fn matches_search(movie: &Movie, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let needle = term.to_lowercase();
    let contains = |text: &str| text.to_lowercase().contains(&needle);

    contains(&movie.title)
        || movie.overview.as_deref().is_some_and(contains)
        || movie.director.as_deref().is_some_and(contains)
        || movie.cast.iter().any(|actor| contains(actor))
}

fn matches_genre(movie: &Movie, genre: &Selection) -> bool {
    match genre {
        Selection::All => true,
        Selection::Only(name) => movie.genres.iter().any(|g| g == name),
    }
}

fn matches_year(movie: &Movie, year: &Selection) -> bool {
    match year {
        Selection::All => true,
        Selection::Only(value) => movie
            .release_date
            .as_deref()
            .is_some_and(|date| date.contains(value.as_str())),
    }
}

/// Returns the movies matching `criteria`, preserving input order.
#[must_use]
pub fn filter_movies<'a>(movies: &'a [Movie], criteria: &Criteria) -> Vec<&'a Movie> {
    movies.iter().filter(|m| criteria.matches(m)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixture::mock_movies;

    fn ids(movies: &[&Movie]) -> Vec<u64> {
        movies.iter().map(|m| m.id).collect()
    }

    #[test]
    fn unfiltered_returns_everything_in_order() {
        let movies = mock_movies();
        let result = filter_movies(&movies, &Criteria::new("", "all", "all"));
        assert_eq!(ids(&result), movies.iter().map(|m| m.id).collect::<Vec<_>>());
    }

    #[test]
    fn search_matches_director() {
        let movies = mock_movies();
        let result = filter_movies(&movies, &Criteria::new("nolan", ALL, ALL));
        assert_eq!(ids(&result), vec![1, 2, 3]);
        assert!(result.iter().all(|m| !m.title.to_lowercase().contains("nolan")));
    }

    #[test]
    fn search_matches_cast_and_overview() {
        let movies = mock_movies();
        assert_eq!(ids(&filter_movies(&movies, &Criteria::new("DICAPRIO", ALL, ALL))), vec![1, 8]);
        assert_eq!(ids(&filter_movies(&movies, &Criteria::new("wormhole", ALL, ALL))), vec![3]);
    }

    #[test]
    fn genre_requires_exact_membership() {
        let movies = mock_movies();
        let result = filter_movies(&movies, &Criteria::new("", "Romance", ALL));
        assert_eq!(ids(&result), vec![8, 10]);
        assert!(filter_movies(&movies, &Criteria::new("", "romance", ALL)).is_empty());
    }

    #[test]
    fn year_is_a_substring_of_the_release_date() {
        let movies = mock_movies();
        assert_eq!(ids(&filter_movies(&movies, &Criteria::new("", ALL, "1994"))), vec![5, 9, 10]);
        assert_eq!(ids(&filter_movies(&movies, &Criteria::new("", ALL, "199"))), vec![4, 5, 8, 9, 10, 12]);
    }

    #[test]
    fn missing_fields_never_match_but_never_panic() {
        let bare = vec![Movie::new(1, "Bare")];
        assert!(filter_movies(&bare, &Criteria::new("someone", ALL, ALL)).is_empty());
        assert!(filter_movies(&bare, &Criteria::new("", "Drama", ALL)).is_empty());
        assert!(filter_movies(&bare, &Criteria::new("", ALL, "2010")).is_empty());
        assert_eq!(filter_movies(&bare, &Criteria::new("bare", ALL, ALL)).len(), 1);
    }

    #[test]
    fn selection_parses_wildcard_case_insensitively() {
        assert_eq!("All".parse::<Selection>().unwrap(), Selection::All);
        assert_eq!("".parse::<Selection>().unwrap(), Selection::All);
        assert_eq!("Drama".parse::<Selection>().unwrap(), Selection::Only("Drama".to_string()));
        assert_eq!(Selection::Only("2010".to_string()).to_string(), "2010");
    }
}
