//! Built-in mock catalog.
//!
//! Serves a fixed set of well-known movies without touching the network. Used
//! as the default source and throughout the tests.

use super::{MoviePage, MovieSource};
use crate::domain::error::{MoviesError, Result};
use crate::domain::Movie;
use async_trait::async_trait;
use std::time::Duration;

/// Static movie source.
///
/// Always reports a single page containing the whole fixture. A `query`
/// narrows the page to titles containing it, case-insensitively.
#[derive(Debug, Clone)]
pub struct FixtureSource {
    movies: Vec<Movie>,
    delay: Duration,
    failure: Option<String>,
}

impl Default for FixtureSource {
    fn default() -> Self {
        Self::new(mock_movies())
    }
}

impl FixtureSource {
    /// Creates a source serving `movies` in the given order.
    #[must_use]
    pub fn new(movies: Vec<Movie>) -> Self {
        Self {
            movies,
            delay: Duration::ZERO,
            failure: None,
        }
    }

    /// Simulates network latency before each page is returned.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Makes every fetch fail with `message`.
    #[must_use]
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }
}

#[async_trait]
impl MovieSource for FixtureSource {
    fn name(&self) -> &str {
        "fixture"
    }

    async fn fetch_page(&self, page: u32, query: Option<&str>) -> Result<MoviePage> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if let Some(message) = &self.failure {
            return Err(MoviesError::Source(message.clone()));
        }

        let movies = if page > 1 {
            Vec::new()
        } else {
            match query.map(str::trim).filter(|q| !q.is_empty()) {
                Some(q) => {
                    let q = q.to_lowercase();
                    self.movies
                        .iter()
                        .filter(|m| m.title.to_lowercase().contains(&q))
                        .cloned()
                        .collect()
                }
                None => self.movies.clone(),
            }
        };

        Ok(MoviePage {
            movies,
            page,
            total_pages: 1,
        })
    }
}

#[allow(clippy::too_many_arguments)]
fn fixture_movie(
    id: u64,
    title: &str,
    overview: &str,
    poster_path: &str,
    backdrop_path: &str,
    release_date: &str,
    vote_average: f64,
    genres: &[&str],
    runtime: u32,
    director: &str,
    cast: &[&str],
    production_companies: &[&str],
) -> Movie {
    let to_vec = |items: &[&str]| items.iter().map(ToString::to_string).collect::<Vec<_>>();
    Movie {
        id,
        title: title.to_string(),
        overview: Some(overview.to_string()),
        poster_path: Some(poster_path.to_string()),
        backdrop_path: Some(backdrop_path.to_string()),
        release_date: Some(release_date.to_string()),
        vote_average: Some(vote_average),
        genres: to_vec(genres),
        runtime: Some(runtime),
        director: Some(director.to_string()),
        cast: to_vec(cast),
        production_companies: to_vec(production_companies),
    }
}

/// The twelve movies of the built-in catalog, in load order.
#[must_use]
pub fn mock_movies() -> Vec<Movie> {
    vec![
        fixture_movie(
            1,
            "Inception",
            "A thief who steals corporate secrets through the use of dream-sharing technology is given the inverse task of planting an idea into the mind of a C.E.O.",
            "/qmDpIHrmpJINaRKAfWQfftjCdyi.jpg",
            "/s3TBrRGB1iav7gFOCNx3H31MoES.jpg",
            "2010-07-16",
            8.8,
            &["Action", "Sci-Fi", "Thriller"],
            148,
            "Christopher Nolan",
            &["Leonardo DiCaprio", "Marion Cotillard", "Tom Hardy"],
            &["Warner Bros.", "Legendary Entertainment"],
        ),
        fixture_movie(
            2,
            "The Dark Knight",
            "When the menace known as the Joker wreaks havoc and chaos on the people of Gotham, Batman must accept one of the greatest psychological and physical tests of his ability to fight injustice.",
            "/qJ2tW6WMUDux911r6m7haRef0WH.jpg",
            "/hqkIcbrOHL86UncnHIsHVcVmzue.jpg",
            "2008-07-18",
            9.0,
            &["Action", "Crime", "Drama"],
            152,
            "Christopher Nolan",
            &["Christian Bale", "Heath Ledger", "Aaron Eckhart"],
            &["Warner Bros.", "DC Comics"],
        ),
        fixture_movie(
            3,
            "Interstellar",
            "A team of explorers travel through a wormhole in space in an attempt to ensure humanity's survival.",
            "/gEU2QniE6E77NI6lCU6MxlNBvIx.jpg",
            "/xu9zaAevzQ5nnrsXN6JcahLnG4i.jpg",
            "2014-11-07",
            8.6,
            &["Adventure", "Drama", "Sci-Fi"],
            169,
            "Christopher Nolan",
            &["Matthew McConaughey", "Anne Hathaway", "Jessica Chastain"],
            &["Paramount Pictures", "Warner Bros."],
        ),
        fixture_movie(
            4,
            "The Matrix",
            "A computer programmer is led to fight an underground war against powerful computers who have constructed his entire reality with a system called the Matrix.",
            "/f89U3ADr1oiB1s9GkdPOEpXUk5H.jpg",
            "/fNG7i7RqMErkcqhohV2a6cV1Ehy.jpg",
            "1999-03-31",
            8.7,
            &["Action", "Sci-Fi"],
            136,
            "The Wachowskis",
            &["Keanu Reeves", "Laurence Fishburne", "Carrie-Anne Moss"],
            &["Warner Bros.", "Village Roadshow Pictures"],
        ),
        fixture_movie(
            5,
            "Pulp Fiction",
            "The lives of two mob hitmen, a boxer, a gangster and his wife, and a pair of diner bandits intertwine in four tales of violence and redemption.",
            "/d5iIlFn5s0ImszYzBPb8JPIfbXD.jpg",
            "/4cDFJr4HnXN5AdPw4AKrmLlMWdO.jpg",
            "1994-10-14",
            8.9,
            &["Crime", "Drama"],
            154,
            "Quentin Tarantino",
            &["John Travolta", "Uma Thurman", "Samuel L. Jackson"],
            &["Miramax Films", "A Band Apart"],
        ),
        fixture_movie(
            6,
            "Avatar",
            "A paraplegic Marine dispatched to the moon Pandora on a unique mission becomes torn between following his orders and protecting the world he feels is his home.",
            "/jRXYjXNq0Cs2TcJjLkki24MLp7u.jpg",
            "/Yc9q6QuWrMp9nuDm5R8ExNqbEWU.jpg",
            "2009-12-18",
            7.8,
            &["Action", "Adventure", "Fantasy", "Sci-Fi"],
            162,
            "James Cameron",
            &["Sam Worthington", "Zoe Saldana", "Sigourney Weaver"],
            &["20th Century Fox", "Lightstorm Entertainment"],
        ),
        fixture_movie(
            7,
            "The Godfather",
            "An organized crime dynasty's aging patriarch transfers control of his clandestine empire to his reluctant son.",
            "/3bhkrj58Vtu7enYsRolD1fZdja1.jpg",
            "/tmU7GeKVybMWFButWEGl2M4GeiP.jpg",
            "1972-03-24",
            9.2,
            &["Crime", "Drama"],
            175,
            "Francis Ford Coppola",
            &["Marlon Brando", "Al Pacino", "James Caan"],
            &["Paramount Pictures", "Alfran Productions"],
        ),
        fixture_movie(
            8,
            "Titanic",
            "A seventeen-year-old aristocrat falls in love with a kind but poor artist aboard the luxurious, ill-fated R.M.S. Titanic.",
            "/9xjZS2rlVxm8SFx8kPC3aIGCOYQ.jpg",
            "/fVQeZIhus4d5r1LK1BjOuqKYhfE.jpg",
            "1997-12-19",
            7.9,
            &["Drama", "Romance"],
            194,
            "James Cameron",
            &["Leonardo DiCaprio", "Kate Winslet", "Billy Zane"],
            &["20th Century Fox", "Paramount Pictures"],
        ),
        fixture_movie(
            9,
            "The Shawshank Redemption",
            "Two imprisoned men bond over a number of years, finding solace and eventual redemption through acts of common decency.",
            "/q6y0Go1tsGEsmtFryDOJo3dEmqu.jpg",
            "/j9XKiZrVeaIzCDqGUsb3y7SRdLp.jpg",
            "1994-09-23",
            9.3,
            &["Drama"],
            142,
            "Frank Darabont",
            &["Tim Robbins", "Morgan Freeman", "Bob Gunton"],
            &["Columbia Pictures", "Castle Rock Entertainment"],
        ),
        fixture_movie(
            10,
            "Forrest Gump",
            "The presidencies of Kennedy and Johnson, the events of Vietnam, Watergate and other historical events unfold from the perspective of an Alabama man with an IQ of 75.",
            "/arw2vcBveWOVZr6pxd9XTd1TdQa.jpg",
            "/7c8oTLGqVdpZ0e3r2FpW4JFIHkA.jpg",
            "1994-07-06",
            8.8,
            &["Drama", "Romance"],
            142,
            "Robert Zemeckis",
            &["Tom Hanks", "Robin Wright", "Gary Sinise"],
            &["Paramount Pictures", "The Steve Tisch Company"],
        ),
        fixture_movie(
            11,
            "The Lord of the Rings: The Return of the King",
            "Gandalf and Aragorn lead the World of Men against Sauron's army to draw his gaze from Frodo and Sam as they approach Mount Doom with the One Ring.",
            "/rCzpDGLbOoPwLjy3OAm5NUPOTrC.jpg",
            "/2u7zbn8EudG6kLlBzUYqP8RyFU4.jpg",
            "2003-12-17",
            9.0,
            &["Action", "Adventure", "Drama", "Fantasy"],
            201,
            "Peter Jackson",
            &["Elijah Wood", "Viggo Mortensen", "Ian McKellen"],
            &["New Line Cinema", "WingNut Films"],
        ),
        fixture_movie(
            12,
            "Fight Club",
            "An insomniac office worker and a devil-may-care soapmaker form an underground fight club that evolves into an anarchist organization.",
            "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            "/hZkgoQYus5vegHoetLkCJzb17zJ.jpg",
            "1999-10-15",
            8.8,
            &["Drama"],
            139,
            "David Fincher",
            &["Brad Pitt", "Edward Norton", "Helena Bonham Carter"],
            &["20th Century Fox", "Regency Enterprises"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fixture_ids_are_unique() {
        let movies = mock_movies();
        let ids: HashSet<_> = movies.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), movies.len());
        assert_eq!(movies.len(), 12);
    }

    #[tokio::test]
    async fn query_narrows_by_title() {
        let page = FixtureSource::default().fetch_page(1, Some("the")).await.unwrap();
        assert!(page.movies.iter().all(|m| m.title.to_lowercase().contains("the")));
        assert!(!page.movies.is_empty());
    }

    #[tokio::test]
    async fn pages_past_the_first_are_empty() {
        let page = FixtureSource::default().fetch_page(2, None).await.unwrap();
        assert!(page.movies.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn failing_source_reports_error() {
        let result = FixtureSource::default().failing("offline").fetch_page(1, None).await;
        assert!(matches!(result, Err(MoviesError::Source(msg)) if msg == "offline"));
    }
}
