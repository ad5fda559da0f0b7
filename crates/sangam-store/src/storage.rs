//! Raw key/value access to the `local_storage` table.

use chrono::Utc;
use rusqlite::params;

use crate::database::Database;
use crate::error::Result;

impl Database {
    /// Read the raw JSON value under a storage key, if present.
    pub fn storage_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT value FROM local_storage WHERE key = ?1")?;

        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// Write (or replace) the value under a storage key.
    pub fn storage_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO local_storage (key, value, updated_at)
             VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Delete a storage key.  Returns `true` if a row was removed.
    pub fn storage_remove(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM local_storage WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("t.db")).unwrap();
        (db, dir)
    }

    #[test]
    fn set_get_remove() {
        let (db, _dir) = open();
        assert!(db.storage_get("k").unwrap().is_none());

        db.storage_set("k", r#"{"a":1}"#).unwrap();
        assert_eq!(db.storage_get("k").unwrap().unwrap(), r#"{"a":1}"#);

        db.storage_set("k", r#"{"a":2}"#).unwrap();
        assert_eq!(db.storage_get("k").unwrap().unwrap(), r#"{"a":2}"#);

        assert!(db.storage_remove("k").unwrap());
        assert!(!db.storage_remove("k").unwrap());
    }
}
