//! The HTTP client wrapper: base URL handling, bearer auth, JSON helpers,
//! and central error mapping.

use std::sync::RwLock;

use reqwest::{multipart::Form, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{ApiError, Result};

/// Authenticated client for the platform REST API.
///
/// Cheap to share behind an `Arc`; the session token is interior-mutable so
/// login/logout does not require rebuilding controllers.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client for the given API base URL (trailing slash ignored).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
            token: RwLock::new(None),
        }
    }

    /// Install the bearer token used on every subsequent request.
    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.into());
        }
    }

    /// Drop the session token.
    pub fn clear_token(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve a server-relative media path against the API origin.
    /// Absolute URLs pass through untouched.
    pub fn resolve_media_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let token = self.token.read().ok().and_then(|g| g.clone());
        match token {
            Some(t) => builder.bearer_auth(t),
            None => builder,
        }
    }

    // ------------------------------------------------------------------
    // JSON helpers
    // ------------------------------------------------------------------

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self.authorize(self.http.get(self.url(path))).send().await?;
        Self::decode(resp).await
    }

    pub(crate) async fn get_json_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let resp = self
            .authorize(self.http.get(self.url(path)).query(query))
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self
            .authorize(self.http.post(self.url(path)).json(body))
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub(crate) async fn post_empty(&self, path: &str) -> Result<()> {
        let resp = self.authorize(self.http.post(self.url(path))).send().await?;
        Self::check(resp).await
    }

    pub(crate) async fn post_json_empty<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let resp = self
            .authorize(self.http.post(self.url(path)).json(body))
            .send()
            .await?;
        Self::check(resp).await
    }

    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self
            .authorize(self.http.put(self.url(path)).json(body))
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let resp = self
            .authorize(self.http.delete(self.url(path)))
            .send()
            .await?;
        Self::check(resp).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T> {
        let resp = self
            .authorize(self.http.post(self.url(path)).multipart(form))
            .send()
            .await?;
        Self::decode(resp).await
    }

    pub(crate) async fn post_multipart_empty(&self, path: &str, form: Form) -> Result<()> {
        let resp = self
            .authorize(self.http.post(self.url(path)).multipart(form))
            .send()
            .await?;
        Self::check(resp).await
    }

    // ------------------------------------------------------------------
    // Response handling
    // ------------------------------------------------------------------

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }
        Err(Self::error_from(status.as_u16(), resp).await)
    }

    async fn check(resp: Response) -> Result<()> {
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::error_from(status.as_u16(), resp).await)
    }

    async fn error_from(status: u16, resp: Response) -> ApiError {
        let body = resp.text().await.unwrap_or_default();
        debug!(status, body = %body, "API request failed");
        ApiError::from_response(status, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_trimmed() {
        let client = ApiClient::new("https://api.sangam.example/");
        assert_eq!(client.base_url(), "https://api.sangam.example");
        assert_eq!(
            client.url("/api/chats"),
            "https://api.sangam.example/api/chats"
        );
    }

    #[test]
    fn media_paths_resolve_against_origin() {
        let client = ApiClient::new("https://api.sangam.example");
        assert_eq!(
            client.resolve_media_url("/uploads/p1/a.jpg"),
            "https://api.sangam.example/uploads/p1/a.jpg"
        );
        assert_eq!(
            client.resolve_media_url("uploads/p1/a.jpg"),
            "https://api.sangam.example/uploads/p1/a.jpg"
        );
    }

    #[test]
    fn absolute_media_urls_pass_through() {
        let client = ApiClient::new("https://api.sangam.example");
        assert_eq!(
            client.resolve_media_url("https://cdn.example/a.jpg"),
            "https://cdn.example/a.jpg"
        );
    }

    #[test]
    fn token_replace_and_clear() {
        let client = ApiClient::new("https://api.sangam.example");
        client.set_token("abc");
        client.set_token("def");
        client.clear_token();
        assert!(client.token.read().unwrap().is_none());
    }
}
