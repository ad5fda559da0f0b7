//! The SQLite handle behind the local store.
//!
//! [`Database`] wraps one [`rusqlite::Connection`]; opening it brings the
//! schema up to date, so every handle a caller can obtain is already
//! migrated.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use rusqlite::Connection;

use crate::error::{Result, StoreError};
use crate::migrations;

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) `sangam.db` in the platform data directory, e.g.
    /// `~/.local/share/sangam/` on Linux.
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "sangam", "sangam").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("sangam.db");

        tracing::info!(path = %db_path.display(), "opening database");

        Self::open_at(&db_path)
    }

    /// Open (or create) a database at an explicit path.  Tests point this
    /// at a tempdir.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run_migrations(&conn)?;

        Ok(Self { conn })
    }

    /// The underlying connection, for the typed helpers in the sibling
    /// modules.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Filesystem path of the open database, if it is file-backed.
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }
}
