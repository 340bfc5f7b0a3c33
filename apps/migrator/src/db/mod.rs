//! SQLite access to the Anki collection and the Pleco database.

pub mod anki;
pub mod error;
pub mod pleco;
pub mod repository;
pub mod schema;

pub use anki::AnkiStore;
pub use error::DbError;
pub use pleco::{PlecoStore, StoredScore};
pub use repository::{SourceStore, TargetStore};
