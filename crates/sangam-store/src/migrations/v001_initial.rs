//! v001 -- Initial schema creation.
//!
//! A single key/value table mirrors the web client's browser storage: each
//! row is one fixed storage key holding a JSON-encoded value.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Local storage (key -> JSON value)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS local_storage (
    key        TEXT PRIMARY KEY NOT NULL,    -- fixed storage key
    value      TEXT NOT NULL,                -- JSON-encoded payload
    updated_at TEXT NOT NULL                 -- ISO-8601 / RFC-3339
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
