//! Storage layer for the persisted watchlist.
//!
//! The watchlist is the only persisted entity. It is written through a small
//! key-value abstraction so the same store logic runs against a JSON file or an
//! in-memory map.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: in-memory implementation

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::KeyValueStore;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
