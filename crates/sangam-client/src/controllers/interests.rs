//! Interests screen controller.
//!
//! No poll here; the lists are refetched on mount and after every
//! mutation.  All three tabs (received, sent, history) share one refresh
//! so a response taken on the received tab is reflected everywhere.

use std::sync::Arc;

use sangam_api::{Interest, Result as ApiResult};
use sangam_shared::{InterestId, ProfileId};

use crate::cache::QueryKey;
use crate::state::AppState;

pub struct InterestsController {
    state: Arc<AppState>,
}

impl InterestsController {
    pub fn mount(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Refetch all three lists.  Returns `Ok(false)` when the gate blocks
    /// the screen.
    pub async fn refresh(&self) -> ApiResult<bool> {
        if !self.state.gate.enforce(&self.state.events) {
            return Ok(false);
        }

        let received = self.state.api.received_interests().await?;
        self.state.cache.put(QueryKey::ReceivedInterests, &received);

        let sent = self.state.api.sent_interests().await?;
        self.state.cache.put(QueryKey::SentInterests, &sent);

        let history = self.state.api.interest_history().await?;
        self.state.cache.put(QueryKey::InterestHistory, &history);

        Ok(true)
    }

    pub fn received(&self) -> Vec<Interest> {
        self.state
            .cache
            .get(&QueryKey::ReceivedInterests)
            .unwrap_or_default()
    }

    pub fn sent(&self) -> Vec<Interest> {
        self.state
            .cache
            .get(&QueryKey::SentInterests)
            .unwrap_or_default()
    }

    pub fn history(&self) -> Vec<Interest> {
        self.state
            .cache
            .get(&QueryKey::InterestHistory)
            .unwrap_or_default()
    }

    /// Express interest in a profile.
    pub async fn send(&self, profile_id: &ProfileId) -> ApiResult<Interest> {
        match self.state.api.send_interest(profile_id).await {
            Ok(interest) => {
                self.state.events.toast("Interest sent");
                self.refetch_after_mutation().await;
                Ok(interest)
            }
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    pub async fn accept(&self, id: &InterestId) -> ApiResult<Interest> {
        self.respond(self.state.api.accept_interest(id).await).await
    }

    pub async fn reject(&self, id: &InterestId) -> ApiResult<Interest> {
        self.respond(self.state.api.reject_interest(id).await).await
    }

    pub async fn withdraw(&self, id: &InterestId) -> ApiResult<Interest> {
        self.respond(self.state.api.withdraw_interest(id).await).await
    }

    pub async fn bulk_accept(&self, ids: &[InterestId]) -> ApiResult<()> {
        match self.state.api.bulk_accept_interests(ids).await {
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

    pub async fn bulk_reject(&self, ids: &[InterestId]) -> ApiResult<()> {
        match self.state.api.bulk_reject_interests(ids).await {
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

    async fn respond(&self, result: ApiResult<Interest>) -> ApiResult<Interest> {
        match result {
            Ok(interest) => {
                self.refetch_after_mutation().await;
                Ok(interest)
            }
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    /// Best-effort refetch; a failure here leaves stale lists that the next
    /// manual refresh repairs.
    async fn refetch_after_mutation(&self) {
        if let Err(e) = self.refresh().await {
            tracing::debug!(error = %e, "interest refetch after mutation failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testutil::{offline_state, unlocked_state};
    use crate::events::UiEvent;
    use sangam_api::ApiError;

    #[tokio::test]
    async fn gate_blocks_refresh() {
        let (state, _dir) = offline_state();
        let mut rx = state.events.subscribe();

        let interests = InterestsController::mount(state);
        assert!(!interests.refresh().await.unwrap());
        assert!(matches!(rx.recv().await.unwrap(), UiEvent::SubscriptionModal));
    }

    #[tokio::test]
    async fn empty_cache_renders_empty_tabs() {
        let (state, _dir) = unlocked_state();
        let interests = InterestsController::mount(state);

        assert!(interests.received().is_empty());
        assert!(interests.sent().is_empty());
        assert!(interests.history().is_empty());
    }

    #[tokio::test]
    async fn failed_accept_reports_a_toast() {
        let (state, _dir) = unlocked_state();
        let mut rx = state.events.subscribe();

        let interests = InterestsController::mount(state);
        let err = interests.accept(&InterestId("i1".into())).await.unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
        assert!(matches!(rx.recv().await.unwrap(), UiEvent::Toast { .. }));
    }
}
