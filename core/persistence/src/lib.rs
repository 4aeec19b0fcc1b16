//! FILENAME: core/persistence/src/lib.rs
//! Trivium Persistence Module
//!
//! Keeps the saved-results history in a JSON file. The engine crates never
//! persist anything themselves; callers decide what goes in here.

mod error;
mod history;

pub use error::PersistenceError;
pub use history::{HistoryData, HistoryEntry, HistoryKind, HistoryStore};

pub type Result<T> = std::result::Result<T, PersistenceError>;
