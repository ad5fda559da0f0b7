//! Search filters and saved searches.
//!
//! The filter set is persisted to device storage on every change (minus the
//! page field) and re-applied on the next visit, so the struct doubles as
//! the storage schema: every field defaults, and `page` is skipped when
//! serializing so stored snapshots always reopen on page 1.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result ordering requested from the search endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Newest,
    AgeAsc,
    AgeDesc,
    IncomeDesc,
}

impl SortKey {
    /// Value sent in the `sort` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::AgeAsc => "ageAsc",
            SortKey::AgeDesc => "ageDesc",
            SortKey::IncomeDesc => "incomeDesc",
        }
    }
}

/// The full search filter set.
///
/// Deserializing a stored snapshot merges it with defaults field by field:
/// missing fields default, unknown fields are ignored, so an older stored
/// shape never breaks a newer schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchFilters {
    pub name: String,
    pub age_min: Option<u8>,
    pub age_max: Option<u8>,
    pub city: String,
    pub state: String,
    pub education: String,
    pub occupation: String,
    pub religion: String,
    pub caste: String,
    pub verified_only: bool,
    pub income_min: Option<u32>,
    pub income_max: Option<u32>,
    pub sort: SortKey,
    /// Current result page. Never persisted; always reopens at 1.
    #[serde(skip_serializing)]
    pub page: u32,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            name: String::new(),
            age_min: None,
            age_max: None,
            city: String::new(),
            state: String::new(),
            education: String::new(),
            occupation: String::new(),
            religion: String::new(),
            caste: String::new(),
            verified_only: false,
            income_min: None,
            income_max: None,
            sort: SortKey::default(),
            page: 1,
        }
    }
}

impl SearchFilters {
    /// Apply a filter change and reset pagination.
    ///
    /// Every filter edit other than paging goes through here so the page
    /// reset cannot be forgotten at a call site.
    pub fn with_change<F: FnOnce(&mut Self)>(mut self, change: F) -> Self {
        change(&mut self);
        self.page = 1;
        self
    }

    /// Query parameters for the search endpoint. Empty/unset filters are
    /// omitted entirely rather than sent as empty strings.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if !self.name.is_empty() {
            pairs.push(("name", self.name.clone()));
        }
        if let Some(min) = self.age_min {
            pairs.push(("ageMin", min.to_string()));
        }
        if let Some(max) = self.age_max {
            pairs.push(("ageMax", max.to_string()));
        }
        if !self.city.is_empty() {
            pairs.push(("city", self.city.clone()));
        }
        if !self.state.is_empty() {
            pairs.push(("state", self.state.clone()));
        }
        if !self.education.is_empty() {
            pairs.push(("education", self.education.clone()));
        }
        if !self.occupation.is_empty() {
            pairs.push(("occupation", self.occupation.clone()));
        }
        if !self.religion.is_empty() {
            pairs.push(("religion", self.religion.clone()));
        }
        if !self.caste.is_empty() {
            pairs.push(("caste", self.caste.clone()));
        }
        if self.verified_only {
            pairs.push(("verified", "true".to_string()));
        }
        if let Some(min) = self.income_min {
            pairs.push(("incomeMin", min.to_string()));
        }
        if let Some(max) = self.income_max {
            pairs.push(("incomeMax", max.to_string()));
        }
        pairs.push(("sort", self.sort.as_query_value().to_string()));
        pairs.push(("page", self.page.to_string()));

        pairs
    }
}

/// A named snapshot of a filter set, stored device-local.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedSearch {
    /// Client-generated identifier.
    pub id: Uuid,
    pub name: String,
    pub filters: SearchFilters,
    pub created_at: DateTime<Utc>,
}

impl SavedSearch {
    pub fn new(name: impl Into<String>, filters: SearchFilters) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            filters,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_resets_page() {
        let filters = SearchFilters {
            page: 7,
            ..Default::default()
        };
        let filters = filters.with_change(|f| f.city = "Pune".into());
        assert_eq!(filters.city, "Pune");
        assert_eq!(filters.page, 1);
    }

    #[test]
    fn page_not_serialized() {
        let filters = SearchFilters {
            city: "Pune".into(),
            page: 4,
            ..Default::default()
        };
        let json = serde_json::to_string(&filters).unwrap();
        assert!(!json.contains("\"page\""));

        let restored: SearchFilters = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.city, "Pune");
        assert_eq!(restored.page, 1);
    }

    #[test]
    fn stale_stored_shape_merges_with_defaults() {
        // An old snapshot missing most fields and carrying an unknown one.
        let restored: SearchFilters =
            serde_json::from_str(r#"{"city":"Mumbai","legacyField":true}"#).unwrap();
        assert_eq!(restored.city, "Mumbai");
        assert_eq!(restored.sort, SortKey::Newest);
        assert_eq!(restored.page, 1);
    }

    #[test]
    fn empty_filters_omitted_from_query() {
        let pairs = SearchFilters::default().to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("sort", "newest".to_string()),
                ("page", "1".to_string()),
            ]
        );
    }

    #[test]
    fn set_filters_appear_in_query() {
        let filters = SearchFilters {
            city: "Pune".into(),
            age_min: Some(25),
            verified_only: true,
            page: 3,
            ..Default::default()
        };
        let pairs = filters.to_query_pairs();
        assert!(pairs.contains(&("city", "Pune".to_string())));
        assert!(pairs.contains(&("ageMin", "25".to_string())));
        assert!(pairs.contains(&("verified", "true".to_string())));
        assert!(pairs.contains(&("page", "3".to_string())));
    }

    #[test]
    fn saved_search_round_trip() {
        let saved = SavedSearch::new(
            "Shortlist A",
            SearchFilters::default().with_change(|f| f.city = "Pune".into()),
        );
        let json = serde_json::to_string(&saved).unwrap();
        let restored: SavedSearch = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.id, saved.id);
        assert_eq!(restored.filters.city, "Pune");
        assert_eq!(restored.filters.page, 1);
    }
}
