//! The saved-search list: named filter snapshots under a single storage
//! key, stored as a flat JSON array.  The list is unbounded by design.

use tracing::warn;
use uuid::Uuid;

use sangam_shared::constants::STORAGE_KEY_SAVED_SEARCHES;
use sangam_shared::SavedSearch;

use crate::database::Database;
use crate::error::Result;

impl Database {
    /// All saved searches in insertion order.  A missing key is an empty
    /// list.
    pub fn list_saved_searches(&self) -> Result<Vec<SavedSearch>> {
        match self.storage_get(STORAGE_KEY_SAVED_SEARCHES)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Lossy variant for callers that degrade rather than surface errors.
    pub fn list_saved_searches_or_default(&self) -> Vec<SavedSearch> {
        match self.list_saved_searches() {
            Ok(list) => list,
            Err(e) => {
                warn!(error = %e, "failed to load saved searches, using empty list");
                Vec::new()
            }
        }
    }

    /// Append one saved search to the list.
    pub fn append_saved_search(&self, saved: &SavedSearch) -> Result<()> {
        let mut list = self.list_saved_searches()?;
        list.push(saved.clone());
        self.write_saved_searches(&list)
    }

    /// Remove a saved search by id.  Returns `true` if an entry was removed;
    /// the order of the remaining entries is unchanged.
    pub fn delete_saved_search(&self, id: Uuid) -> Result<bool> {
        let mut list = self.list_saved_searches()?;
        let before = list.len();
        list.retain(|s| s.id != id);

        if list.len() == before {
            return Ok(false);
        }
        self.write_saved_searches(&list)?;
        Ok(true)
    }

    /// Look up one saved search by id.
    pub fn get_saved_search(&self, id: Uuid) -> Result<Option<SavedSearch>> {
        Ok(self
            .list_saved_searches()?
            .into_iter()
            .find(|s| s.id == id))
    }

    fn write_saved_searches(&self, list: &[SavedSearch]) -> Result<()> {
        let json = serde_json::to_string(list)?;
        self.storage_set(STORAGE_KEY_SAVED_SEARCHES, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sangam_shared::SearchFilters;

    fn open() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("t.db")).unwrap();
        (db, dir)
    }

    fn saved(name: &str, city: &str) -> SavedSearch {
        SavedSearch::new(
            name,
            SearchFilters::default().with_change(|f| f.city = city.into()),
        )
    }

    #[test]
    fn save_then_load_restores_filters() {
        let (db, _dir) = open();

        let shortlist = saved("Shortlist A", "Pune");
        db.append_saved_search(&shortlist).unwrap();

        let loaded = db.get_saved_search(shortlist.id).unwrap().unwrap();
        assert_eq!(loaded.name, "Shortlist A");
        assert_eq!(loaded.filters.city, "Pune");
        assert_eq!(loaded.filters.page, 1);
    }

    #[test]
    fn delete_removes_exactly_one_and_keeps_order() {
        let (db, _dir) = open();

        let a = saved("A", "Pune");
        let b = saved("B", "Mumbai");
        let c = saved("C", "Nagpur");
        for s in [&a, &b, &c] {
            db.append_saved_search(s).unwrap();
        }

        assert!(db.delete_saved_search(b.id).unwrap());

        let remaining = db.list_saved_searches().unwrap();
        let ids: Vec<_> = remaining.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let (db, _dir) = open();
        db.append_saved_search(&saved("A", "Pune")).unwrap();

        assert!(!db.delete_saved_search(Uuid::new_v4()).unwrap());
        assert_eq!(db.list_saved_searches().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_list_degrades_to_empty() {
        let (db, _dir) = open();
        db.storage_set(STORAGE_KEY_SAVED_SEARCHES, "[not json")
            .unwrap();
        assert!(db.list_saved_searches_or_default().is_empty());
    }
}
