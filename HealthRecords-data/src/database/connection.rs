//! Database connection module for the Health Records store
//!
//! The store is a single SQLite file reached through an r2d2 pool. A
//! [`Database`] value owns the pool; every repository call checks out one
//! connection for the duration of that call and hands it back on drop.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::OpenFlags;
use tracing::{debug, error, info};

use super::migrations::run_sqlite_migrations;
use super::DatabaseError;

/// Pooled SQLite connection handed out by [`Database::conn`]
pub type SqliteConnection = PooledConnection<SqliteConnectionManager>;

/// Default location of the database file, relative to the working directory
pub const DEFAULT_SQLITE_PATH: &str = "data/health_records.db";

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// Path to SQLite database file
    pub sqlite_path: PathBuf,
    /// Maximum number of pooled connections
    pub max_connections: u32,
    /// Connection checkout timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: PathBuf::from(DEFAULT_SQLITE_PATH),
            max_connections: 10,
            timeout_seconds: 30,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database configuration from environment variables
    ///
    /// Reads `DB_SQLITE_PATH`, `DB_MAX_CONNECTIONS` and `DB_TIMEOUT_SECONDS`.
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Result<Self, DatabaseError> {
        let defaults = Self::default();

        let sqlite_path = match env::var("DB_SQLITE_PATH") {
            Ok(path) if path.trim().is_empty() => {
                return Err(DatabaseError::ConfigError(
                    "DB_SQLITE_PATH is set but empty".to_string(),
                ));
            }
            Ok(path) => {
                info!("Using SQLite database at: {}", path);
                PathBuf::from(path)
            }
            Err(_) => {
                info!("No DB_SQLITE_PATH provided, will use default path: {}", DEFAULT_SQLITE_PATH);
                defaults.sqlite_path
            }
        };

        let max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.max_connections);

        let timeout_seconds = env::var("DB_TIMEOUT_SECONDS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(defaults.timeout_seconds);

        info!(
            "Database configuration: max_connections={}, timeout={}s",
            max_connections, timeout_seconds
        );

        Ok(DatabaseConfig {
            sqlite_path,
            max_connections,
            timeout_seconds,
        })
    }
}

/// Owned handle to the record store
#[derive(Debug, Clone)]
pub struct Database {
    pool: Arc<r2d2::Pool<SqliteConnectionManager>>,
}

impl Database {
    /// Open (or create) the database file described by `config` and run migrations
    pub fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let path = config.sqlite_path.as_path();
        info!("Initializing SQLite database at: {}", path.display());

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                info!("Creating parent directory: {:?}", parent);
                fs::create_dir_all(parent).map_err(|e| {
                    DatabaseError::ConfigError(format!(
                        "Failed to create directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let manager = SqliteConnectionManager::file(path)
            .with_flags(OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE)
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

        let pool = r2d2::Pool::builder()
            .max_size(config.max_connections)
            .connection_timeout(Duration::from_secs(config.timeout_seconds))
            .build(manager)
            .map_err(|e| {
                error!("Failed to create SQLite connection pool: {}", e);
                DatabaseError::SqlitePoolError(e)
            })?;

        let database = Self { pool: Arc::new(pool) };
        database.migrate()?;

        info!("SQLite connection pool created successfully");
        Ok(database)
    }

    /// Open a private in-memory database with migrations applied
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to one long-lived connection.
    pub fn in_memory() -> Result<Self, DatabaseError> {
        debug!("Initializing in-memory SQLite database");

        let manager = SqliteConnectionManager::memory()
            .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

        let pool = r2d2::Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_timeout(Duration::from_secs(30))
            .build(manager)?;

        let database = Self { pool: Arc::new(pool) };
        database.migrate()?;
        Ok(database)
    }

    /// Check out a connection for the duration of one operation
    pub fn conn(&self) -> Result<SqliteConnection, DatabaseError> {
        Ok(self.pool.get()?)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        info!("Running database migrations");
        let conn = self.conn()?;
        run_sqlite_migrations(&conn).map_err(DatabaseError::MigrationError)?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Describe the backing database and the pool state
    pub fn connection_info(&self) -> Result<String, DatabaseError> {
        let conn = self.conn()?;
        let file: String = conn.query_row("PRAGMA database_list", [], |row| row.get(2))?;
        drop(conn);

        let location = if file.is_empty() || file == ":memory:" {
            "SQLite in-memory database".to_string()
        } else {
            format!("SQLite database at {}", Path::new(&file).display())
        };

        let state = self.pool.state();
        Ok(format!(
            "{} (connections: active={}, idle={})",
            location, state.connections, state.idle_connections
        ))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_database_config_default() {
        let config = DatabaseConfig::default();
        assert_eq!(config.sqlite_path, PathBuf::from(DEFAULT_SQLITE_PATH));
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_in_memory_database_has_schema() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
                 AND name IN ('patients', 'reports', 'diseases', 'reminders', 'hospitals')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 5);
    }

    #[test]
    fn test_connection_info_in_memory() {
        let db = Database::in_memory().unwrap();
        let info = db.connection_info().unwrap();
        assert!(info.starts_with("SQLite in-memory database"), "unexpected info: {}", info);
    }

    #[test]
    fn test_open_file_database_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("records.db");
        let config = DatabaseConfig {
            sqlite_path: path.clone(),
            max_connections: 2,
            timeout_seconds: 5,
        };

        let db = Database::open(&config).unwrap();
        assert!(path.exists());
        assert!(db.connection_info().unwrap().contains("records.db"));

        // Migrations are idempotent, opening again must not reseed
        drop(db);
        let db = Database::open(&config).unwrap();
        let conn = db.conn().unwrap();
        let hospitals: i64 = conn
            .query_row("SELECT COUNT(*) FROM hospitals", [], |row| row.get(0))
            .unwrap();
        assert_eq!(hospitals, 4);
    }
}
