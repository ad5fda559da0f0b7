use serde::Deserialize;
use thiserror::Error;

use sangam_shared::ValidationError;

/// Fallback toast text when the server sent no usable message.
const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Errors produced by the API layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, body decode).
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint is gated and the account has no active subscription
    /// (403, or a `requiresSubscription` flag in the error body).
    #[error("Active subscription required")]
    SubscriptionRequired,

    /// Any other non-success response.
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Request rejected client-side before anything was sent.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Error body shape the server uses for non-success responses.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ErrorBody {
    message: Option<String>,
    requires_subscription: bool,
}

impl ApiError {
    /// Map a non-success status and raw body to an error.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();

        if status == 403 || parsed.requires_subscription {
            return ApiError::SubscriptionRequired;
        }

        ApiError::Status {
            status,
            message: parsed
                .message
                .unwrap_or_else(|| GENERIC_FAILURE.to_string()),
        }
    }

    /// Text suitable for a user-facing toast: the server's message where one
    /// exists, a generic fallback otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } => message.clone(),
            ApiError::SubscriptionRequired => "Active subscription required".to_string(),
            ApiError::Invalid(e) => e.to_string(),
            ApiError::Transport(_) => GENERIC_FAILURE.to_string(),
        }
    }

    pub fn is_subscription_required(&self) -> bool {
        matches!(self, ApiError::SubscriptionRequired)
    }

    /// Whether this is a 401/404 status, which the current-subscription
    /// probe treats as "no active subscription" rather than a failure.
    pub(crate) fn is_missing_subscription_probe(&self) -> bool {
        matches!(self, ApiError::Status { status: 401 | 404, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_maps_to_subscription_required() {
        let err = ApiError::from_response(403, "{}");
        assert!(err.is_subscription_required());
    }

    #[test]
    fn requires_subscription_flag_maps_regardless_of_status() {
        let err = ApiError::from_response(400, r#"{"requiresSubscription":true}"#);
        assert!(err.is_subscription_required());
    }

    #[test]
    fn server_message_surfaces() {
        let err = ApiError::from_response(422, r#"{"message":"Interest already sent"}"#);
        assert_eq!(err.user_message(), "Interest already sent");
    }

    #[test]
    fn garbage_body_gets_generic_message() {
        let err = ApiError::from_response(500, "<html>oops</html>");
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[test]
    fn probe_statuses() {
        assert!(ApiError::from_response(404, "{}").is_missing_subscription_probe());
        assert!(ApiError::from_response(401, "{}").is_missing_subscription_probe());
        assert!(!ApiError::from_response(500, "{}").is_missing_subscription_probe());
    }
}
