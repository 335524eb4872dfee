//! Domain layer: the movie model and the crate error type.
//!
//! Nothing in here touches storage, the network or the UI.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie record and display helpers
//!
//! # Examples
//!
//! ```
//! use moviescorn::domain::{Movie, Result};
//!
//! fn featured() -> Result<Movie> {
//!     Ok(Movie::new(1, "Inception"))
//! }
//! ```

pub mod error;
pub mod movie;

pub use error::{MoviesError, Result};
pub use movie::{Movie, MovieId};
