//! Favorites (shortlist) endpoints plus client-side CSV export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sangam_shared::{Profile, ProfileId};

use crate::client::ApiClient;
use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    pub profile: Profile,
    pub added_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteRef<'a> {
    profile_id: &'a ProfileId,
}

impl ApiClient {
    pub async fn list_favorites(&self) -> Result<Vec<Favorite>> {
        self.get_json("/api/favorites").await
    }

    pub async fn add_favorite(&self, profile_id: &ProfileId) -> Result<()> {
        self.post_json_empty("/api/favorites", &FavoriteRef { profile_id })
            .await
    }

    pub async fn remove_favorite(&self, profile_id: &ProfileId) -> Result<()> {
        self.delete(&format!("/api/favorites/{profile_id}")).await
    }
}

/// Render a fetched favorites list as CSV for export.
///
/// Column set matches the shortlist screen; values containing separators or
/// quotes are quoted per RFC 4180.
pub fn favorites_to_csv(favorites: &[Favorite]) -> String {
    let mut out = String::from("name,city,state,religion,caste,occupation,addedAt\n");
    for fav in favorites {
        let p = &fav.profile;
        let name = format!("{} {}", p.first_name, p.last_name);
        let row = [
            name.as_str(),
            p.city.as_str(),
            p.state.as_str(),
            p.religion.as_str(),
            p.caste.as_str(),
            p.occupation.as_str(),
        ];
        for field in row {
            out.push_str(&csv_field(field));
            out.push(',');
        }
        out.push_str(&fav.added_at.to_rfc3339());
        out.push('\n');
    }
    out
}

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn favorite(first: &str, city: &str) -> Favorite {
        Favorite {
            profile: Profile {
                first_name: first.into(),
                last_name: "Patil".into(),
                city: city.into(),
                state: "Maharashtra".into(),
                religion: "Hindu".into(),
                caste: "Maratha".into(),
                occupation: "Engineer".into(),
                ..Default::default()
            },
            added_at: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn csv_has_header_and_rows() {
        let csv = favorites_to_csv(&[favorite("Asha", "Pune")]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "name,city,state,religion,caste,occupation,addedAt"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("Asha Patil,Pune,Maharashtra,"));
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let csv = favorites_to_csv(&[favorite("Asha", "Pune, Kothrud")]);
        assert!(csv.contains("\"Pune, Kothrud\""));
    }
}
