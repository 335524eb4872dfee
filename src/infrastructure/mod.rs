//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{default_config_file, default_data_dir, expand_tilde, watchlist_file};
