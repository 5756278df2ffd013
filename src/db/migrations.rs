//! Database migrations
//!
//! Schema creation and migration logic for the capture history.

use rusqlite::Connection;

use super::connection::DbResult;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> DbResult<()> {
    // Create migrations table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    // Get current version
    let current_version: i32 = get_schema_version(conn)?;

    // Run migrations
    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Get the current schema version
pub fn get_schema_version(conn: &Connection) -> DbResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Check if the database needs migration
pub fn needs_migration(conn: &Connection) -> DbResult<bool> {
    let current = get_schema_version(conn)?;
    Ok(current < SCHEMA_VERSION)
}

/// Migration v1: Initial schema
fn migrate_v1(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- CAPTURES
        -- Append-only history of estimate captures
        -- ============================================
        CREATE TABLE captures (
            session_id TEXT PRIMARY KEY,              -- UUID of the capture session
            json_path TEXT NOT NULL,                  -- envelope file on disk
            photo_path TEXT NOT NULL,                 -- cropped JPEG on disk
            timestamp TEXT NOT NULL,                  -- RFC 3339, capture instant
            is_submitted INTEGER NOT NULL DEFAULT 0,  -- boolean, flips once
            initial_weight REAL NOT NULL DEFAULT 0    -- user-entered grams, plate included
        );

        CREATE INDEX idx_captures_timestamp ON captures(timestamp);
        CREATE INDEX idx_captures_submitted ON captures(is_submitted);
        "#,
    )?;
    Ok(())
}
