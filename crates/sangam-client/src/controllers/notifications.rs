//! Notifications screen controller.
//!
//! The list poll honours whatever filters the screen has set; changing the
//! filters refetches immediately and the poll picks the new filters up on
//! its next tick.  Opening a notification marks it read and navigates by
//! its kind.

use std::sync::{Arc, Mutex};

use tracing::debug;

use sangam_api::{Notification, NotificationPreferences, NotificationQuery, Result as ApiResult};
use sangam_shared::{NavTarget, NotificationId};

use crate::cache::QueryKey;
use crate::events::UiEvent;
use crate::poller::{spawn_poll, PollErrorPolicy, PollHandle};
use crate::state::AppState;

pub struct NotificationsController {
    state: Arc<AppState>,
    query: Arc<Mutex<NotificationQuery>>,
    _poll: Option<PollHandle>,
}

impl NotificationsController {
    pub fn mount(state: Arc<AppState>) -> Self {
        let query = Arc::new(Mutex::new(NotificationQuery::default()));
        let poll = state
            .gate
            .enforce(&state.events)
            .then(|| spawn_notification_poll(&state, Arc::clone(&query)));
        Self {
            state,
            query,
            _poll: poll,
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.state
            .cache
            .get(&QueryKey::Notifications)
            .unwrap_or_default()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications().iter().filter(|n| !n.is_read).count()
    }

    /// Change the list filters and refetch with them right away.
    pub async fn set_query(&self, query: NotificationQuery) -> ApiResult<()> {
        if let Ok(mut current) = self.query.lock() {
            *current = query;
        }
        self.refetch().await
    }

    pub async fn mark_read(&self, id: &NotificationId) -> ApiResult<()> {
        self.mutate(self.state.api.mark_notification_read(id).await)
            .await
    }

    pub async fn mark_all_read(&self) -> ApiResult<()> {
        self.mutate(self.state.api.mark_all_notifications_read().await)
            .await
    }

    pub async fn delete(&self, id: &NotificationId) -> ApiResult<()> {
        self.mutate(self.state.api.delete_notification(id).await)
            .await
    }

    pub async fn delete_all(&self) -> ApiResult<()> {
        self.mutate(self.state.api.delete_all_notifications().await)
            .await
    }

    /// Open a notification: mark it read (best effort) and navigate to the
    /// screen its kind points at.
    pub async fn open(&self, notification: &Notification) -> NavTarget {
        if !notification.is_read {
            if let Err(e) = self.state.api.mark_notification_read(&notification.id).await {
                debug!(error = %e, "mark-read on open failed");
            }
        }

        let target = notification.kind.navigation_target();
        self.state.events.emit(UiEvent::Navigate(target));
        target
    }

    pub async fn preferences(&self) -> ApiResult<NotificationPreferences> {
        let prefs = self.state.api.notification_preferences().await?;
        self.state
            .cache
            .put(QueryKey::NotificationPreferences, &prefs);
        Ok(prefs)
    }

    /// Push changed delivery toggles; the server echoes the saved set,
    /// which is what the cache keeps.
    pub async fn update_preferences(
        &self,
        prefs: &NotificationPreferences,
    ) -> ApiResult<NotificationPreferences> {
        match self.state.api.update_notification_preferences(prefs).await {
            Ok(saved) => {
                self.state
                    .cache
                    .put(QueryKey::NotificationPreferences, &saved);
                Ok(saved)
            }
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    async fn mutate(&self, result: ApiResult<()>) -> ApiResult<()> {
        match result {
            Ok(()) => {
                if let Err(e) = self.refetch().await {
                    debug!(error = %e, "notification refetch failed, next poll retries");
                }
                Ok(())
            }
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    async fn refetch(&self) -> ApiResult<()> {
        let query = self.query.lock().map(|q| *q).unwrap_or_default();
        let notifications = self.state.api.list_notifications(query).await?;
        self.state.cache.put(QueryKey::Notifications, &notifications);
        Ok(())
    }
}

fn spawn_notification_poll(
    state: &Arc<AppState>,
    query: Arc<Mutex<NotificationQuery>>,
) -> PollHandle {
    let state = Arc::clone(state);
    spawn_poll(
        "notifications",
        state.config.notification_poll,
        PollErrorPolicy::WarnAndRetry,
        move || {
            let state = Arc::clone(&state);
            let query = query.lock().map(|q| *q).unwrap_or_default();
            async move {
                let notifications = state.api.list_notifications(query).await?;
                state.cache.put(QueryKey::Notifications, &notifications);
                Ok(())
            }
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::testutil::{offline_state, unlocked_state};
    use chrono::Utc;
    use sangam_shared::NotificationKind;

    fn notification(kind: NotificationKind) -> Notification {
        Notification {
            id: NotificationId("n1".into()),
            kind,
            title: "title".into(),
            body: String::new(),
            is_read: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn blocked_mount_starts_no_poll() {
        let (state, _dir) = offline_state();
        let mut rx = state.events.subscribe();

        let notifications = NotificationsController::mount(state);
        assert!(matches!(rx.recv().await.unwrap(), UiEvent::SubscriptionModal));
        assert!(notifications._poll.is_none());
    }

    #[tokio::test]
    async fn unread_count_reads_from_cache() {
        let (state, _dir) = unlocked_state();
        state.cache.put(
            QueryKey::Notifications,
            &vec![
                notification(NotificationKind::Message),
                Notification {
                    is_read: true,
                    ..notification(NotificationKind::Interest)
                },
            ],
        );

        let notifications = NotificationsController::mount(state);
        assert_eq!(notifications.unread_count(), 1);
    }

    #[tokio::test]
    async fn failed_preferences_update_toasts_and_keeps_cache() {
        let (state, _dir) = unlocked_state();
        let mut rx = state.events.subscribe();

        let cached = NotificationPreferences::default();
        state
            .cache
            .put(QueryKey::NotificationPreferences, &cached);

        let controller = NotificationsController::mount(Arc::clone(&state));
        let err = controller
            .update_preferences(&NotificationPreferences {
                email_digest: true,
                ..NotificationPreferences::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, sangam_api::ApiError::Transport(_)));
        loop {
            if let UiEvent::Toast { .. } = rx.recv().await.unwrap() {
                break;
            }
        }
        // the unsaved toggles never reach the cache
        let kept: NotificationPreferences = state
            .cache
            .get(&QueryKey::NotificationPreferences)
            .unwrap();
        assert_eq!(kept, cached);
    }

    #[tokio::test]
    async fn open_navigates_by_kind() {
        let (state, _dir) = unlocked_state();
        let mut rx = state.events.subscribe();

        let controller = NotificationsController::mount(Arc::clone(&state));
        let target = controller
            .open(&notification(NotificationKind::Message))
            .await;

        assert_eq!(target, NavTarget::Chat);
        loop {
            if let UiEvent::Navigate(nav) = rx.recv().await.unwrap() {
                assert_eq!(nav, NavTarget::Chat);
                break;
            }
        }
    }
}
