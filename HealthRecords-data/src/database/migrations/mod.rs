// Database migrations module
// Schema creation first, then reference data for empty tables

mod seed;
mod sqlite;

pub use seed::{DEFAULT_DISEASES, DEFAULT_HOSPITALS};

use rusqlite::Connection;

/// Run SQLite migrations and seed reference data
pub fn run_sqlite_migrations(conn: &Connection) -> Result<(), String> {
    sqlite::run_migrations(conn)?;
    seed::seed_reference_data(conn)?;
    Ok(())
}
