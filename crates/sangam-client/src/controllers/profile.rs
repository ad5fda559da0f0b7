//! Own-profile screen controller.
//!
//! Never gated: the profile editor is exactly where a member with an
//! incomplete profile is sent.  Every mutation returns the refreshed
//! profile, which re-derives the gate inputs, so completing the checklist
//! unlocks the rest of the app without a separate refetch.

use std::sync::Arc;

use sangam_api::{ProfileUpdate, Result as ApiResult, UploadFile};
use sangam_shared::{completion_percentage, Profile, ProfileId};

use crate::cache::QueryKey;
use crate::state::AppState;

pub struct ProfileController {
    state: Arc<AppState>,
}

impl ProfileController {
    pub fn mount(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// The cached own profile.
    pub fn profile(&self) -> Option<Profile> {
        self.state.cache.get(&QueryKey::OwnProfile)
    }

    /// Weighted completion percentage for the checklist widget.
    pub fn completion(&self) -> u8 {
        self.profile()
            .map(|p| completion_percentage(&p))
            .unwrap_or(0)
    }

    pub async fn refresh(&self) -> ApiResult<Profile> {
        match self.state.refresh_own_profile().await {
            Ok(profile) => Ok(profile),
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    pub async fn update(&self, update: &ProfileUpdate) -> ApiResult<Profile> {
        self.apply(self.state.api.update_profile(update).await)
    }

    pub async fn upload_photo(&self, file: UploadFile) -> ApiResult<Profile> {
        self.apply(self.state.api.upload_photo(file).await)
    }

    pub async fn delete_photo(&self, url: &str) -> ApiResult<Profile> {
        self.apply(self.state.api.delete_photo(url).await)
    }

    /// View another member's profile.
    pub async fn view(&self, id: &ProfileId) -> ApiResult<Profile> {
        match self.state.api.profile(id).await {
            Ok(profile) => Ok(profile),
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    fn apply(&self, result: ApiResult<Profile>) -> ApiResult<Profile> {
        match result {
            Ok(profile) => {
                self.state.apply_own_profile(&profile);
                Ok(profile)
            }
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testutil::offline_state;
    use crate::events::UiEvent;
    use chrono::NaiveDate;
    use sangam_api::ApiError;
    use sangam_shared::GateDecision;

    fn complete_profile() -> Profile {
        Profile {
            first_name: "Asha".into(),
            last_name: "Patil".into(),
            city: "Pune".into(),
            state: "Maharashtra".into(),
            religion: "Hindu".into(),
            caste: "Maratha".into(),
            date_of_birth: NaiveDate::from_ymd_opt(1995, 4, 2),
            photos: vec!["a.jpg".into(), "b.jpg".into(), "c.jpg".into()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn applied_profile_unlocks_the_completeness_gate() {
        let (state, _dir) = offline_state();
        state.gate.set_subscription_active(true);
        assert_eq!(state.gate.decision(), GateDecision::ProfileIncomplete);

        let controller = ProfileController::mount(Arc::clone(&state));
        state.apply_own_profile(&complete_profile());

        assert_eq!(state.gate.decision(), GateDecision::Allowed);
        assert_eq!(controller.profile().unwrap().first_name, "Asha");
        // education, occupation, and family details are still empty, so
        // only 70 of the weighted 100 points are earned
        assert_eq!(controller.completion(), 70);
    }

    #[tokio::test]
    async fn empty_cache_means_zero_completion() {
        let (state, _dir) = offline_state();
        let controller = ProfileController::mount(state);
        assert!(controller.profile().is_none());
        assert_eq!(controller.completion(), 0);
    }

    #[tokio::test]
    async fn failed_refresh_reports_a_toast() {
        let (state, _dir) = offline_state();
        let mut rx = state.events.subscribe();

        let controller = ProfileController::mount(state);
        let err = controller.refresh().await.unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
        assert!(matches!(rx.recv().await.unwrap(), UiEvent::Toast { .. }));
    }
}
