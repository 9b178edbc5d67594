/*!
 * Persistent key/value storage for the translation cache and request log.
 *
 * This module provides:
 * - `KeyValueStore`: the capability the translation core depends on
 * - `SqliteStore`: SQLite-backed persistence shared across runs
 * - `MemoryStore`: process-local storage for tests and dry runs
 */

pub mod schema;
pub mod connection;
pub mod store;

// Re-export main types
pub use connection::DatabaseConnection;
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
