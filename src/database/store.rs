/*!
 * Key/value store implementations.
 *
 * The translation cache and the request log only ever see the
 * `KeyValueStore` trait, so tests can swap in `MemoryStore`.
 */

use anyhow::Result;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;

use super::connection::DatabaseConnection;

/// Process-wide string storage used by the cache and the rate limiter
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// SQLite-backed store that survives between runs
#[derive(Clone)]
pub struct SqliteStore {
    db: DatabaseConnection,
}

impl SqliteStore {
    /// Wrap an open database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open (or create) the store at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new(path)?))
    }

    /// Open the store at the platform data directory
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new_default()?))
    }

    /// Create a store with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self> {
        Ok(Self::new(DatabaseConnection::new_in_memory()?))
    }

    /// Underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.db.get_value(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db.set_value(key, value)
    }
}
