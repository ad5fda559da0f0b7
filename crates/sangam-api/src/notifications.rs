//! Notification listing, read/delete actions, and delivery preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sangam_shared::{NotificationId, NotificationKind};

use crate::client::ApiClient;
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// List filters; both default to "everything".
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationQuery {
    pub unread_only: bool,
    pub kind: Option<NotificationKind>,
}

/// Per-category delivery toggles, server-persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPreferences {
    pub interests: bool,
    pub messages: bool,
    pub profile_views: bool,
    pub subscriptions: bool,
    pub email_digest: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            interests: true,
            messages: true,
            profile_views: true,
            subscriptions: true,
            email_digest: false,
        }
    }
}

impl ApiClient {
    pub async fn list_notifications(
        &self,
        query: NotificationQuery,
    ) -> Result<Vec<Notification>> {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if query.unread_only {
            pairs.push(("unreadOnly", "true".to_string()));
        }
        if let Some(kind) = query.kind {
            // reuse the wire name of the enum variant
            let name = serde_json::to_value(kind)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string))
                .unwrap_or_default();
            pairs.push(("type", name));
        }
        self.get_json_with_query("/api/notifications", &pairs).await
    }

    pub async fn mark_notification_read(&self, id: &NotificationId) -> Result<()> {
        self.post_empty(&format!("/api/notifications/{id}/read")).await
    }

    pub async fn mark_all_notifications_read(&self) -> Result<()> {
        self.post_empty("/api/notifications/read-all").await
    }

    pub async fn delete_notification(&self, id: &NotificationId) -> Result<()> {
        self.delete(&format!("/api/notifications/{id}")).await
    }

    pub async fn delete_all_notifications(&self) -> Result<()> {
        self.delete("/api/notifications").await
    }

    pub async fn notification_preferences(&self) -> Result<NotificationPreferences> {
        self.get_json("/api/notifications/preferences").await
    }

    pub async fn update_notification_preferences(
        &self,
        prefs: &NotificationPreferences,
    ) -> Result<NotificationPreferences> {
        self.put_json("/api/notifications/preferences", prefs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notification_decodes_with_kind() {
        let n: Notification = serde_json::from_str(
            r#"{
                "id": "n1",
                "type": "interest_accepted",
                "title": "Asha accepted your interest",
                "createdAt": "2026-03-01T10:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(n.kind, NotificationKind::InterestAccepted);
        assert!(!n.is_read);
    }

    #[test]
    fn preferences_merge_with_defaults() {
        let prefs: NotificationPreferences =
            serde_json::from_str(r#"{"emailDigest":true}"#).unwrap();
        assert!(prefs.email_digest);
        assert!(prefs.messages);
    }
}
