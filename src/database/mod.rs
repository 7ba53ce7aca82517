//! Database module

pub mod operations;
pub mod schema;

// Re-export for convenience
pub use operations::{SettingsRecord, SqliteStore};
pub use schema::{initialize_database, initialize_in_memory};
