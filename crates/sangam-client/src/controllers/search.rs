//! Search screen controller.
//!
//! Filters live in memory and are mirrored to the local store on every
//! change, minus the page number, so a fresh session reopens the last
//! filter set on page 1.  Saved searches are named snapshots of the same
//! filter set.

use std::sync::Arc;

use tracing::warn;
use uuid::Uuid;

use sangam_api::{Result as ApiResult, SearchPage};
use sangam_shared::{SavedSearch, SearchFilters, ValidationError};

use crate::cache::QueryKey;
use crate::state::AppState;

pub struct SearchController {
    state: Arc<AppState>,
    filters: SearchFilters,
}

impl SearchController {
    /// Mount the screen, restoring the persisted filter set (or defaults
    /// when nothing was stored or the snapshot no longer parses).
    pub fn mount(state: Arc<AppState>) -> Self {
        let filters = match state.db.lock() {
            Ok(db) => db.load_search_preferences_or_default(),
            Err(_) => SearchFilters::default(),
        };
        Self { state, filters }
    }

    pub fn filters(&self) -> &SearchFilters {
        &self.filters
    }

    /// Apply a filter change.  Resets to page 1 and persists the new set.
    pub fn set_filter<F: FnOnce(&mut SearchFilters)>(&mut self, change: F) {
        self.filters = self.filters.clone().with_change(change);
        if let Ok(db) = self.state.db.lock() {
            db.save_search_preferences_lossy(&self.filters);
        }
    }

    /// Move to another results page.  Paging is navigation, not a filter
    /// change, so nothing is persisted.
    pub fn set_page(&mut self, page: u32) {
        self.filters.page = page.max(1);
    }

    /// Run the search.  Returns `Ok(None)` when the gate blocks the screen;
    /// the matching modal has already been emitted.
    pub async fn run(&self) -> ApiResult<Option<SearchPage>> {
        if !self.state.gate.enforce(&self.state.events) {
            return Ok(None);
        }

        match self.state.api.search_profiles(&self.filters).await {
            Ok(page) => {
                self.state.cache.put(QueryKey::SearchResults, &page);
                Ok(Some(page))
            }
            Err(e) => {
                // a gated rejection here means the cached subscription
                // state is stale; flip the gate input so the UI locks
                if e.is_subscription_required() {
                    self.state.gate.set_subscription_active(false);
                }
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    /// Snapshot the current filters under a name.
    pub fn save_search(&self, name: &str) -> Result<SavedSearch, ValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptySearchName);
        }

        let saved = SavedSearch::new(name, self.filters.clone());
        match self.state.db.lock() {
            Ok(db) => {
                if let Err(e) = db.append_saved_search(&saved) {
                    warn!(error = %e, "failed to persist saved search");
                }
            }
            Err(_) => warn!("store unavailable, saved search not persisted"),
        }

        self.state.events.toast(format!("Saved search \"{name}\""));
        Ok(saved)
    }

    /// All saved searches, oldest first.
    pub fn saved_searches(&self) -> Vec<SavedSearch> {
        match self.state.db.lock() {
            Ok(db) => db.list_saved_searches_or_default(),
            Err(_) => Vec::new(),
        }
    }

    /// Replace the active filters with a saved snapshot.  Returns whether
    /// the id was found.  The restored set starts on page 1.
    pub fn load_saved_search(&mut self, id: Uuid) -> bool {
        let saved = match self.state.db.lock() {
            Ok(db) => db.get_saved_search(id).unwrap_or_default(),
            Err(_) => None,
        };

        match saved {
            Some(saved) => {
                self.filters = saved.filters;
                self.filters.page = 1;
                if let Ok(db) = self.state.db.lock() {
                    db.save_search_preferences_lossy(&self.filters);
                }
                true
            }
            None => false,
        }
    }

    /// Delete a saved search.  Returns whether the id existed.
    pub fn delete_saved_search(&self, id: Uuid) -> bool {
        match self.state.db.lock() {
            Ok(db) => db.delete_saved_search(id).unwrap_or(false),
            Err(_) => false,
        }
    }
}
