//! SQLite-backed key-value storage for entries and goals.
//!
//! The store mirrors a browser-style key-value layout: each collection is a
//! JSON array kept under one key. Connections are pooled through r2d2.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `kv`: Get/put/delete on the key-value table
//!
//! # Example
//!
//! ```no_run
//! use til_insights::db::Database;
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/til.db"))?;
//! db.initialize_schema()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod kv;
pub mod schema;

use crate::constants::DB_POOL_MAX_SIZE;
use crate::errors::{AppResult, DatabaseError};
use crate::store::KeyValueBackend;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database handle with connection pooling.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
}

impl Database {
    /// Opens or creates the SQLite database at `db_path`.
    ///
    /// Missing parent directories are created. The schema is not touched; call
    /// [`Database::initialize_schema`] before first use.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The parent directory cannot be created
    /// - The file is not a SQLite database
    /// - The connection pool cannot be initialized
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(DB_POOL_MAX_SIZE)
            .connection_customizer(Box::new(ConnectionSettings))
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        // Fail early on files that are not databases
        let conn = pool.get().map_err(DatabaseError::Pool)?;
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(DatabaseError::Sqlite)?;
        drop(conn);

        info!("Database opened successfully");
        Ok(Database { pool })
    }

    /// Gets a connection from the pool.
    ///
    /// # Errors
    ///
    /// Returns an error if no connection is available or the pool is exhausted.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Initializes the database schema.
    ///
    /// Idempotent and safe to call on every start.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        let version = schema::get_schema_version(&conn)?;
        info!("Database schema initialized (version {:?})", version);
        Ok(())
    }
}

impl KeyValueBackend for Database {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        let conn = self.get_conn()?;
        kv::get_value(&conn, key)
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let conn = self.get_conn()?;
        kv::put_value(&conn, key, value)
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        let conn = self.get_conn()?;
        kv::delete_value(&conn, key).map(|_| ())
    }

    fn remove_all(&self, keys: &[&str]) -> AppResult<()> {
        let mut conn = self.get_conn()?;
        kv::delete_values(&mut conn, keys).map(|_| ())
    }
}

/// Per-connection settings applied when the pool hands out a connection.
#[derive(Debug)]
struct ConnectionSettings;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionSettings {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(())
    }

    fn on_release(&self, _conn: Connection) {}
}
