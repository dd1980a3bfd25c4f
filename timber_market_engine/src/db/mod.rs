//! The database backends for the market gateway.
//!
//! The [`traits`] module defines the interfaces the rest of the crate programs against. The [`sqlite`] module is
//! the SQLite implementation of those interfaces, selected with the `sqlite` feature.

#[cfg(feature = "sqlite")]
pub mod sqlite;
pub mod traits;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDatabase;
