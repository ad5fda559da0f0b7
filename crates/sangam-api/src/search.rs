//! Profile search with filter query parameters.

use serde::{Deserialize, Serialize};

use sangam_shared::{Profile, SearchFilters};

use crate::client::ApiClient;
use crate::error::Result;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
}

/// One page of search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub profiles: Vec<Profile>,
    pub pagination: Pagination,
}

impl ApiClient {
    /// Run a search with the given filter set.
    pub async fn search_profiles(&self, filters: &SearchFilters) -> Result<SearchPage> {
        let query = filters.to_query_pairs();
        self.get_json_with_query("/api/search", &query).await
    }
}
