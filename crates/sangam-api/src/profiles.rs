//! Profile CRUD and photo management.

use serde::Serialize;

use sangam_shared::{Profile, ProfileId};

use crate::client::ApiClient;
use crate::error::Result;

/// Partial profile update; unset fields are left untouched server-side.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<chrono::NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub religion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caste: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_income: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family_details: Option<String>,
}

#[derive(Debug, Serialize)]
struct PhotoRef<'a> {
    url: &'a str,
}

impl ApiClient {
    /// Fetch the signed-in member's own profile.
    pub async fn my_profile(&self) -> Result<Profile> {
        self.get_json("/api/profile").await
    }

    /// Apply a partial update and return the refreshed profile.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Profile> {
        self.put_json("/api/profile", update).await
    }

    /// Fetch another member's profile by id.
    pub async fn profile(&self, id: &ProfileId) -> Result<Profile> {
        self.get_json(&format!("/api/profiles/{id}")).await
    }

    /// Remove one photo by its server URL; returns the refreshed profile.
    pub async fn delete_photo(&self, url: &str) -> Result<Profile> {
        self.post_json("/api/profile/photos/delete", &PhotoRef { url })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_update_fields_omitted() {
        let update = ProfileUpdate {
            city: Some("Pune".into()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"city":"Pune"}"#);
    }
}
