/*!
 * SQLite connection holding the key/value table.
 *
 * One connection per store, shared behind a mutex so the cache and the
 * request log never write to the file concurrently.
 */

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::schema;

/// Database file name under the data directory
const DEFAULT_DB_FILENAME: &str = "jsonbabel.db";

/// Application folder under the platform data directory
const DEFAULT_DB_DIRNAME: &str = "jsonbabel";

/// Shared handle to the key/value database
#[derive(Clone)]
pub struct DatabaseConnection {
    db_path: PathBuf,
    connection: Arc<Mutex<Connection>>,
}

impl DatabaseConnection {
    /// Open the database at the platform data directory
    pub fn new_default() -> Result<Self> {
        Self::new(Self::default_database_path()?)
    }

    /// Open (or create) the database at `db_path`, creating missing folders
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create database directory: {:?}", parent))?;
        }

        info!("Opening database at: {:?}", db_path);
        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open database: {:?}", db_path))?;

        Self::from_connection(conn, db_path)
    }

    /// Database that lives only as long as the handle
    pub fn new_in_memory() -> Result<Self> {
        debug!("Creating in-memory database");
        let conn = Connection::open_in_memory().context("Failed to create in-memory database")?;

        Self::from_connection(conn, PathBuf::from(":memory:"))
    }

    fn from_connection(conn: Connection, db_path: PathBuf) -> Result<Self> {
        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(conn)),
        })
    }

    /// `<data_local_dir>/jsonbabel/jsonbabel.db`
    pub fn default_database_path() -> Result<PathBuf> {
        let base_dir = dirs::data_local_dir()
            .or_else(dirs::data_dir)
            .ok_or_else(|| anyhow!("Could not determine data directory"))?;

        Ok(base_dir.join(DEFAULT_DB_DIRNAME).join(DEFAULT_DB_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Value stored under `key`
    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        let conn = self.connection.lock();
        conn.query_row(
            "SELECT value FROM kv_store WHERE key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        )
        .optional()
        .with_context(|| format!("Failed to read key ({} bytes)", key.len()))
    }

    /// Insert or replace the value under `key`
    pub fn set_value(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.connection.lock();
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )
        .context("Failed to write key/value entry")?;

        debug!("Stored key ({} bytes)", value.len());
        Ok(())
    }

    /// Number of stored keys
    pub fn entry_count(&self) -> Result<i64> {
        let conn = self.connection.lock();
        Ok(conn.query_row("SELECT COUNT(*) FROM kv_store", [], |row| row.get(0))?)
    }
}
