use rusqlite::Connection;
use tracing::info;

/// Run SQLite migrations
pub fn run_migrations(conn: &Connection) -> Result<(), String> {
    info!("Running SQLite migrations");

    create_patients_table(conn)?;
    create_reports_table(conn)?;
    create_diseases_table(conn)?;
    create_reminders_table(conn)?;
    create_hospitals_table(conn)?;
    create_indexes(conn)?;

    info!("SQLite migrations completed successfully");
    Ok(())
}

fn create_patients_table(conn: &Connection) -> Result<(), String> {
    info!("Creating patients table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS patients (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            age INTEGER,
            gender TEXT,
            contact TEXT,
            created_at TEXT NOT NULL
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

/// Monthly reports. `month` is stored as `YYYY-MM` so it sorts lexically.
fn create_reports_table(conn: &Connection) -> Result<(), String> {
    info!("Creating reports table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS reports (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            patient_id INTEGER NOT NULL,
            month TEXT NOT NULL,
            bp_systolic INTEGER,
            bp_diastolic INTEGER,
            sugar REAL,
            uric_acid REAL,
            created_at TEXT NOT NULL,
            FOREIGN KEY (patient_id) REFERENCES patients (id) ON DELETE CASCADE
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

fn create_diseases_table(conn: &Connection) -> Result<(), String> {
    info!("Creating diseases table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS diseases (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE COLLATE NOCASE,
            details TEXT NOT NULL DEFAULT '',
            symptoms TEXT NOT NULL DEFAULT '',
            treatable INTEGER NOT NULL DEFAULT 0,
            medicines TEXT NOT NULL DEFAULT '',
            hospitals TEXT NOT NULL DEFAULT '',
            notes TEXT NOT NULL DEFAULT ''
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

fn create_reminders_table(conn: &Connection) -> Result<(), String> {
    info!("Creating reminders table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS reminders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            patient_id INTEGER,
            medicine TEXT NOT NULL,
            remind_at TEXT NOT NULL,
            done INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            FOREIGN KEY (patient_id) REFERENCES patients (id) ON DELETE SET NULL
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

fn create_hospitals_table(conn: &Connection) -> Result<(), String> {
    info!("Creating hospitals table if not exists");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS hospitals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            city TEXT NOT NULL DEFAULT '',
            contact TEXT NOT NULL DEFAULT ''
        )",
        [],
    ).map_err(|e| e.to_string())?;

    Ok(())
}

/// Create indexes for the per-patient and due-reminder lookups
fn create_indexes(conn: &Connection) -> Result<(), String> {
    info!("Creating indexes");

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_reports_patient_month
            ON reports (patient_id, month DESC);
         CREATE INDEX IF NOT EXISTS idx_reminders_due
            ON reminders (done, remind_at);",
    ).map_err(|e| format!("Failed to create index: {}", e))?;

    Ok(())
}
