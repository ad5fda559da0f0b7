//! One controller per screen.
//!
//! Controllers own the polls and mutations for their screen, publish
//! fetched state into the query cache, and surface failures on the event
//! bus.  They hold `Arc<AppState>` and nothing else, so a UI shell can
//! mount and drop them freely.

pub mod chat;
pub mod favorites;
pub mod interests;
pub mod notifications;
pub mod profile;
pub mod search;
pub mod subscription;

pub use chat::{ChatListController, ConversationController};
pub use favorites::FavoritesController;
pub use interests::InterestsController;
pub use notifications::NotificationsController;
pub use profile::ProfileController;
pub use search::SearchController;
pub use subscription::SubscriptionController;

#[cfg(test)]
pub(crate) mod testutil {
    use std::sync::Arc;

    use sangam_shared::UserRole;
    use sangam_store::Database;

    use crate::config::ClientConfig;
    use crate::state::AppState;

    /// State over a throwaway database and an unroutable API endpoint.
    /// Requests fail fast with a transport error, which is exactly what the
    /// error-path tests want.
    pub fn offline_state() -> (Arc<AppState>, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("tempdir");
        let db = Database::open_at(&dir.path().join("test.db")).expect("open db");

        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..ClientConfig::default()
        };

        (AppState::with_database(config, db), dir)
    }

    /// Same state but with the gate fully open.
    pub fn unlocked_state() -> (Arc<AppState>, tempfile::TempDir) {
        let (state, dir) = offline_state();
        state.gate.set_role(UserRole::Admin);
        (state, dir)
    }
}
