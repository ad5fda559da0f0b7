//! Schema upgrades, keyed off SQLite's `user_version` pragma.
//!
//! Opening a database runs every step above its recorded version, then
//! stamps the new version, so a step applies exactly once per file.

pub mod v001_initial;

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Version the schema ends up at after [`run_migrations`].
const CURRENT_VERSION: u32 = 1;

/// Bring the connection's schema up to [`CURRENT_VERSION`].
pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current: u32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;

    tracing::info!(
        current_version = current,
        target_version = CURRENT_VERSION,
        "checking database migrations"
    );

    if current < 1 {
        tracing::info!("applying migration v001_initial");
        v001_initial::up(conn).map_err(|e| StoreError::Migration(e.to_string()))?;
        conn.pragma_update(None, "user_version", 1)?;
    }

    Ok(())
}
