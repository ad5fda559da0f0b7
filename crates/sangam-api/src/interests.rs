//! Interest lifecycle: send, respond, withdraw, bulk actions, history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sangam_shared::{InterestId, InterestStatus, ProfileId};

use crate::client::ApiClient;
use crate::error::Result;

/// One interest as returned by the list/history endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interest {
    pub id: InterestId,
    pub from_profile_id: ProfileId,
    pub to_profile_id: ProfileId,
    pub status: InterestStatus,
    /// Server-computed compatibility score in percent.
    #[serde(default)]
    pub compatibility: u8,
    /// Shared hobbies/preferences, server-computed.
    #[serde(default)]
    pub mutual_interests: Vec<String>,
    #[serde(default)]
    pub days_until_expiry: i64,
    #[serde(default)]
    pub is_expired: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendInterest<'a> {
    profile_id: &'a ProfileId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkIds<'a> {
    ids: &'a [InterestId],
}

impl ApiClient {
    /// Express interest in another member's profile.
    pub async fn send_interest(&self, profile_id: &ProfileId) -> Result<Interest> {
        self.post_json("/api/interests", &SendInterest { profile_id })
            .await
    }

    pub async fn accept_interest(&self, id: &InterestId) -> Result<Interest> {
        self.post_json(&format!("/api/interests/{id}/accept"), &())
            .await
    }

    pub async fn reject_interest(&self, id: &InterestId) -> Result<Interest> {
        self.post_json(&format!("/api/interests/{id}/reject"), &())
            .await
    }

    pub async fn withdraw_interest(&self, id: &InterestId) -> Result<Interest> {
        self.post_json(&format!("/api/interests/{id}/withdraw"), &())
            .await
    }

    pub async fn bulk_accept_interests(&self, ids: &[InterestId]) -> Result<()> {
        self.post_json_empty("/api/interests/bulk-accept", &BulkIds { ids })
            .await
    }

    pub async fn bulk_reject_interests(&self, ids: &[InterestId]) -> Result<()> {
        self.post_json_empty("/api/interests/bulk-reject", &BulkIds { ids })
            .await
    }

    /// Interests received by the signed-in member, newest first.
    pub async fn received_interests(&self) -> Result<Vec<Interest>> {
        self.get_json("/api/interests/received").await
    }

    /// Interests sent by the signed-in member, newest first.
    pub async fn sent_interests(&self) -> Result<Vec<Interest>> {
        self.get_json("/api/interests/sent").await
    }

    /// Full interest history, both directions.
    pub async fn interest_history(&self) -> Result<Vec<Interest>> {
        self.get_json("/api/interests/history").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_item_decodes() {
        let interest: Interest = serde_json::from_str(
            r#"{
                "id": "i1",
                "fromProfileId": "p1",
                "toProfileId": "p2",
                "status": "pending",
                "compatibility": 82,
                "mutualInterests": ["travel", "music"],
                "daysUntilExpiry": 5,
                "isExpired": false,
                "createdAt": "2026-02-20T08:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(interest.status, InterestStatus::Pending);
        assert_eq!(interest.compatibility, 82);
        assert_eq!(interest.mutual_interests, vec!["travel", "music"]);
        assert!(!interest.is_expired);
    }

    #[test]
    fn optional_scoring_fields_default() {
        let interest: Interest = serde_json::from_str(
            r#"{
                "id": "i2",
                "fromProfileId": "p1",
                "toProfileId": "p2",
                "status": "withdrawn",
                "createdAt": "2026-02-20T08:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(interest.compatibility, 0);
        assert!(interest.mutual_interests.is_empty());
    }
}
