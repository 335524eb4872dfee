//! `?movie=<id>` deep links.

use crate::domain::MovieId;
use url::Url;

/// Query parameter carrying the movie identifier.
pub const MOVIE_PARAM: &str = "movie";

/// Extracts the movie identifier from a link.
///
/// Accepts a full URL (`http://host/?movie=3`), a relative link (`/?movie=3`),
/// a bare query (`?movie=3`) or a single pair (`movie=3`). Missing or non-numeric values yield `None`.
///
/// ```
/// use moviescorn::app::deeplink::movie_id_from_link;
///
/// assert_eq!(movie_id_from_link("http://localhost:8080/?movie=3"), Some(3));
/// assert_eq!(movie_id_from_link("?movie=12"), Some(12));
/// assert_eq!(movie_id_from_link("movie=abc"), None);
/// ```
#[must_use]
pub fn movie_id_from_link(link: &str) -> Option<MovieId> {
    let link = link.trim();
    let query = match Url::parse(link) {
        Ok(url) => url.query().map(str::to_owned)?,
        Err(_) => {
            let query = link.split_once('?').map_or(link, |(_, query)| query);
            query.split('#').next().unwrap_or_default().to_owned()
        }
    };

    let value = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == MOVIE_PARAM)
        .map(|(_, value)| value.into_owned())?;

    match value.trim().parse::<MovieId>() {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::debug!(value = %value, "ignoring unparsable movie deep link");
            None
        }
    }
}
