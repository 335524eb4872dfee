//! Error types for the movie browsing core.
//!
//! This module defines the centralized error type [`MoviesError`] and a type alias
//! [`Result`] used throughout the crate. Errors from external crates (serde, reqwest,
//! toml) are folded into string-carrying variants at the call site so that callers
//! only ever match on the categories below.

use thiserror::Error;

/// The main error type for catalog, watchlist and sharing operations.
///
/// Every variant is locally recoverable: a load failure becomes an error state in
/// the catalog, a storage failure rolls back the watchlist mutation, and a share
/// failure becomes a transient notification.
///
/// # Examples
///
/// ```
/// use moviescorn::MoviesError;
///
/// fn read_watchlist() -> Result<(), MoviesError> {
///     Err(MoviesError::Storage("backing file is read-only".to_string()))
/// }
///
/// assert!(read_watchlist().is_err());
/// ```
#[derive(Debug, Error)]
pub enum MoviesError {
    /// Reading from or writing to the persistence backend failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The movie source could not produce a page of results.
    ///
    /// Covers transport failures, non-success HTTP statuses and undecodable
    /// response bodies.
    #[error("Source error: {0}")]
    Source(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Neither the native share surface nor the clipboard accepted the payload.
    #[error("Share error: {0}")]
    Share(String),
}

/// A specialized `Result` type for crate operations.
pub type Result<T> = std::result::Result<T, MoviesError>;
