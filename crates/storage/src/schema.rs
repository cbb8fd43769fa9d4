// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Database connection setup and schema bootstrap

use crate::error::StorageError;
use rusqlite::{params, Connection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub const SCHEMA_VERSION: i64 = 1;

/// How long a statement waits on another connection's lock before failing busy
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Open the shared database file with the settings every connection needs
pub fn open(path: &Path) -> Result<Connection, StorageError> {
    let conn = Connection::open(path)?;
    configure(&conn)?;
    Ok(conn)
}

pub(crate) fn configure(conn: &Connection) -> Result<(), StorageError> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    // Rollback journal: WAL needs shared memory, which network shares do not provide
    conn.pragma_update_and_check(None, "journal_mode", "DELETE", |row| row.get::<_, String>(0))?;
    conn.pragma_update(None, "foreign_keys", true)?;
    Ok(())
}

/// Create or upgrade the schema; safe to run on every open
pub fn bootstrap(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
          version INTEGER PRIMARY KEY,
          applied_at_ms INTEGER NOT NULL
        );
        "#,
    )?;
    let current = current_version(conn)?;
    if current > SCHEMA_VERSION {
        return Err(StorageError::SchemaTooNew {
            found: current,
            supported: SCHEMA_VERSION,
        });
    }
    if current < 1 {
        apply_v1(conn)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at_ms) VALUES (?1, ?2)",
            params![1, chrono::Utc::now().timestamp_millis()],
        )?;
        info!(version = 1, "database schema created");
    }
    Ok(())
}

pub fn current_version(conn: &Connection) -> Result<i64, StorageError> {
    Ok(conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?)
}

fn apply_v1(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS write_lock (
          id INTEGER PRIMARY KEY CHECK (id = 1),
          owner_host TEXT NOT NULL,
          owner_user TEXT NULL,
          owner_pid INTEGER NOT NULL,
          acquired_at_ms INTEGER NOT NULL,
          heartbeat_at_ms INTEGER NOT NULL,
          CHECK (heartbeat_at_ms >= acquired_at_ms)
        );
        CREATE TABLE IF NOT EXISTS employees (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          first_name TEXT NOT NULL,
          last_name TEXT NOT NULL,
          hired_on TEXT NULL,
          active INTEGER NOT NULL DEFAULT 1
        );
        CREATE TABLE IF NOT EXISTS certifications (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          employee_id INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
          kind TEXT NOT NULL,
          obtained_on TEXT NOT NULL,
          expires_on TEXT NULL
        );
        CREATE TABLE IF NOT EXISTS medical_visits (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          employee_id INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
          visit_kind TEXT NOT NULL,
          visited_on TEXT NOT NULL,
          fitness TEXT NOT NULL,
          expires_on TEXT NULL
        );
        CREATE TABLE IF NOT EXISTS trainings (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          employee_id INTEGER NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
          title TEXT NOT NULL,
          completed_on TEXT NOT NULL,
          expires_on TEXT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_certifications_employee ON certifications(employee_id);
        CREATE INDEX IF NOT EXISTS idx_medical_visits_employee ON medical_visits(employee_id);
        CREATE INDEX IF NOT EXISTS idx_trainings_employee ON trainings(employee_id);
        "#,
    )?;
    Ok(())
}
