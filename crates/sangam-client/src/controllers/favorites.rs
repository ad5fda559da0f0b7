//! Favorites (shortlist) screen controller.

use std::sync::Arc;

use sangam_api::{favorites_to_csv, Favorite, Result as ApiResult};
use sangam_shared::ProfileId;

use crate::cache::QueryKey;
use crate::state::AppState;

pub struct FavoritesController {
    state: Arc<AppState>,
}

impl FavoritesController {
    pub fn mount(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Refetch the shortlist.  Returns `Ok(false)` when the gate blocks the
    /// screen.
    pub async fn refresh(&self) -> ApiResult<bool> {
        if !self.state.gate.enforce(&self.state.events) {
            return Ok(false);
        }

        let favorites = self.state.api.list_favorites().await?;
        self.state.cache.put(QueryKey::Favorites, &favorites);
        Ok(true)
    }

    pub fn favorites(&self) -> Vec<Favorite> {
        self.state.cache.get(&QueryKey::Favorites).unwrap_or_default()
    }

    pub async fn add(&self, profile_id: &ProfileId) -> ApiResult<()> {
        match self.state.api.add_favorite(profile_id).await {
            Ok(()) => {
                self.state.events.toast("Added to favorites");
                self.refetch_after_mutation().await;
                Ok(())
            }
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    pub async fn remove(&self, profile_id: &ProfileId) -> ApiResult<()> {
        match self.state.api.remove_favorite(profile_id).await {
            Ok(()) => {
                self.refetch_after_mutation().await;
                Ok(())
            }
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    /// Render the cached shortlist as CSV for export.
    pub fn export_csv(&self) -> String {
        favorites_to_csv(&self.favorites())
    }

    async fn refetch_after_mutation(&self) {
        if let Err(e) = self.refresh().await {
            tracing::debug!(error = %e, "favorites refetch after mutation failed");
        }
    }
}
