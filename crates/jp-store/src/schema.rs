use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA_VERSION: i64 = 1;

pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS days (
            user_id    TEXT NOT NULL,
            day_number INTEGER NOT NULL,
            id         TEXT NOT NULL,
            date       TEXT NOT NULL,
            status     TEXT NOT NULL,
            photo_ref  TEXT,
            PRIMARY KEY (user_id, day_number)
        );

        CREATE TABLE IF NOT EXISTS content (
            id       TEXT PRIMARY KEY,
            title    TEXT NOT NULL DEFAULT '',
            category TEXT,
            tags     TEXT NOT NULL DEFAULT '[]'
        );

        CREATE INDEX IF NOT EXISTS idx_days_user ON days(user_id);
        ",
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;

    tracing::debug!("schema initialized (v{SCHEMA_VERSION})");
    Ok(())
}
