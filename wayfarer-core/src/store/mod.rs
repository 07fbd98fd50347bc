//! Persistent place sources.
//!
//! The SQLite source reads a single `pois` table into memory when opened and
//! answers searches from that snapshot until [`SqlitePlaceSource::refresh`]
//! reloads it.

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqlitePlaceSource, SqlitePlaceSourceError, write_places_database};
