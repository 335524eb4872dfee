//! Result ordering.
//!
//! All orderings use a stable sort, so movies that compare equal keep their
//! relative input order.

use crate::domain::Movie;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Ordering applied to filtered results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Input order, i.e. the order the source delivered.
    #[default]
    Popularity,
    /// Highest rating first; unrated movies count as 0.
    Rating,
    /// Newest release first; undated movies last.
    Year,
    /// Title ascending.
    Title,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popularity => "popularity",
            Self::Rating => "rating",
            Self::Year => "year",
            Self::Title => "title",
        }
    }
}

impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    /// Unknown keys fall back to [`SortKey::Popularity`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "rating" => Self::Rating,
            "year" | "release" | "release_date" => Self::Year,
            "title" => Self::Title,
            _ => Self::Popularity,
        })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full dates sort exactly; a bare year sorts as January 1st of that year.
fn release_date(movie: &Movie) -> Option<NaiveDate> {
    movie
        .release_date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
        .or_else(|| movie.release_year().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)))
}

fn compare(a: &Movie, b: &Movie, key: SortKey) -> Ordering {
    match key {
        SortKey::Popularity => Ordering::Equal,
        SortKey::Rating => {
            let rating = |m: &Movie| m.vote_average.filter(|v| v.is_finite()).unwrap_or(0.0);
            rating(b).total_cmp(&rating(a))
        }
        SortKey::Year => match (release_date(a), release_date(b)) {
            (Some(da), Some(db)) => db.cmp(&da),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::Title => a.title.cmp(&b.title),
    }
}

/// Sorts `movies` in place by `key`.
///
/// ```
/// use moviescorn::catalog::{sort_movies, SortKey};
/// use moviescorn::Movie;
///
/// let b = Movie::new(1, "B");
/// let a = Movie::new(2, "A");
/// let mut movies = vec![&b, &a];
/// sort_movies(&mut movies, SortKey::Title);
/// assert_eq!(movies[0].title, "A");
/// ```
pub fn sort_movies(movies: &mut [&Movie], key: SortKey) {
    if key == SortKey::Popularity {
        return;
    }
    movies.sort_by(|a, b| compare(a, b, key));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::fixture::mock_movies;

    fn sorted_ids(movies: &[Movie], key: SortKey) -> Vec<u64> {
        let mut refs: Vec<&Movie> = movies.iter().collect();
        sort_movies(&mut refs, key);
        refs.iter().map(|m| m.id).collect()
    }

    #[test]
    fn popularity_keeps_input_order() {
        let movies = mock_movies();
        assert_eq!(sorted_ids(&movies, SortKey::Popularity), (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn title_order_is_non_decreasing() {
        let movies = mock_movies();
        let mut refs: Vec<&Movie> = movies.iter().collect();
        sort_movies(&mut refs, SortKey::Title);
        assert!(refs.windows(2).all(|w| w[0].title <= w[1].title));
    }

    #[test]
    fn rating_ties_keep_input_order() {
        let movies = mock_movies();
        let ids = sorted_ids(&movies, SortKey::Rating);
        assert_eq!(&ids[..3], &[9, 7, 2]);
        // 9.0: The Dark Knight (2) before Return of the King (11)
        let pos = |id| ids.iter().position(|x| *x == id).unwrap();
        assert!(pos(2) < pos(11));
        // 8.8 three-way tie in input order
        assert!(pos(1) < pos(10) && pos(10) < pos(12));
    }

    #[test]
    fn unrated_movies_sort_as_zero() {
        let mut rated = Movie::new(1, "Rated");
        rated.vote_average = Some(1.0);
        let movies = vec![Movie::new(2, "Unrated"), rated];
        assert_eq!(sorted_ids(&movies, SortKey::Rating), vec![1, 2]);
    }

    #[test]
    fn year_puts_undated_last() {
        let mut old = Movie::new(1, "Old");
        old.release_date = Some("1972-03-24".to_string());
        let mut new = Movie::new(2, "New");
        new.release_date = Some("2014-11-07".to_string());
        let mut broken = Movie::new(3, "Broken");
        broken.release_date = Some("someday".to_string());

        let movies = vec![Movie::new(4, "Undated"), old, broken, new];
        assert_eq!(sorted_ids(&movies, SortKey::Year), vec![2, 1, 4, 3]);
    }

    #[test]
    fn year_only_dates_sort_by_year() {
        let mut early = Movie::new(1, "Early");
        early.release_date = Some("2010-07-16".to_string());
        let mut bare = Movie::new(2, "Bare year");
        bare.release_date = Some("2012".to_string());
        let mut late = Movie::new(3, "Late");
        late.release_date = Some("2014-11-07".to_string());

        let movies = vec![Movie::new(4, "Undated"), early, bare, late];
        assert_eq!(sorted_ids(&movies, SortKey::Year), vec![3, 2, 1, 4]);
    }

    #[test]
    fn unknown_key_falls_back_to_popularity() {
        assert_eq!("shuffle".parse::<SortKey>().unwrap(), SortKey::Popularity);
        assert_eq!("Rating".parse::<SortKey>().unwrap(), SortKey::Rating);
    }
}
