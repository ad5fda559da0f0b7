//! Persistence of the last-used search filter set.
//!
//! Written on every filter change (the page field is excluded by the
//! filter type's own serialization) and read back on the next visit, merged
//! with defaults.  Failures never propagate past the `*_or_default` variant;
//! the feature silently degrades to defaults.

use tracing::warn;

use sangam_shared::constants::STORAGE_KEY_SEARCH_PREFERENCES;
use sangam_shared::SearchFilters;

use crate::database::Database;
use crate::error::Result;

impl Database {
    /// Persist the current filter set (minus pagination).
    pub fn save_search_preferences(&self, filters: &SearchFilters) -> Result<()> {
        let json = serde_json::to_string(filters)?;
        self.storage_set(STORAGE_KEY_SEARCH_PREFERENCES, &json)
    }

    /// Load the stored filter set, if any.
    pub fn load_search_preferences(&self) -> Result<Option<SearchFilters>> {
        match self.storage_get(STORAGE_KEY_SEARCH_PREFERENCES)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    /// Load the stored filter set, degrading to defaults on any failure.
    pub fn load_search_preferences_or_default(&self) -> SearchFilters {
        match self.load_search_preferences() {
            Ok(Some(filters)) => filters,
            Ok(None) => SearchFilters::default(),
            Err(e) => {
                warn!(error = %e, "failed to load search preferences, using defaults");
                SearchFilters::default()
            }
        }
    }

    /// Persist the filter set, logging instead of surfacing failures.
    pub fn save_search_preferences_lossy(&self, filters: &SearchFilters) {
        if let Err(e) = self.save_search_preferences(filters) {
            warn!(error = %e, "failed to save search preferences");
        }
    }
}
