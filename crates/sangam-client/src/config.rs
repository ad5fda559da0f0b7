//! Client configuration loaded from environment variables.
//!
//! All settings except the API base URL have defaults, so a client can start
//! with just `SANGAM_API_URL` set.

use std::time::Duration;

use sangam_shared::constants::{
    CHAT_LIST_POLL_SECS, CONVERSATION_POLL_SECS, NOTIFICATION_POLL_SECS,
    SUBSCRIPTION_POLL_SECS, TYPING_POLL_SECS,
};

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the platform REST API.
    /// Env: `SANGAM_API_URL`
    /// Default: `http://localhost:8080`
    pub api_base_url: String,

    /// Chat list refetch interval.
    /// Env: `CHAT_LIST_POLL_SECS`
    pub chat_list_poll: Duration,

    /// Open conversation refetch interval.
    /// Env: `CONVERSATION_POLL_SECS`
    pub conversation_poll: Duration,

    /// Typing-state refetch interval.
    /// Env: `TYPING_POLL_SECS`
    pub typing_poll: Duration,

    /// Notification refetch interval.
    /// Env: `NOTIFICATION_POLL_SECS`
    pub notification_poll: Duration,

    /// Subscription-status refetch interval.
    /// Env: `SUBSCRIPTION_POLL_SECS`
    pub subscription_poll: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080".to_string(),
            chat_list_poll: Duration::from_secs(CHAT_LIST_POLL_SECS),
            conversation_poll: Duration::from_secs(CONVERSATION_POLL_SECS),
            typing_poll: Duration::from_secs(TYPING_POLL_SECS),
            notification_poll: Duration::from_secs(NOTIFICATION_POLL_SECS),
            subscription_poll: Duration::from_secs(SUBSCRIPTION_POLL_SECS),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SANGAM_API_URL") {
            if !url.is_empty() {
                config.api_base_url = url;
            }
        }

        config.chat_list_poll = poll_from_env("CHAT_LIST_POLL_SECS", config.chat_list_poll);
        config.conversation_poll =
            poll_from_env("CONVERSATION_POLL_SECS", config.conversation_poll);
        config.typing_poll = poll_from_env("TYPING_POLL_SECS", config.typing_poll);
        config.notification_poll =
            poll_from_env("NOTIFICATION_POLL_SECS", config.notification_poll);
        config.subscription_poll =
            poll_from_env("SUBSCRIPTION_POLL_SECS", config.subscription_poll);

        // RUST_LOG is handled directly by tracing-subscriber's EnvFilter,
        // so we do not store it here.

        config
    }
}

fn poll_from_env(var: &str, default: Duration) -> Duration {
    match std::env::var(var) {
        Ok(val) => match val.parse::<u64>() {
            Ok(secs) if secs > 0 => Duration::from_secs(secs),
            _ => {
                tracing::warn!(var, value = %val, "invalid poll interval, using default");
                default
            }
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_intervals() {
        let config = ClientConfig::default();
        assert_eq!(config.chat_list_poll, Duration::from_secs(5));
        assert_eq!(config.conversation_poll, Duration::from_secs(3));
        assert_eq!(config.typing_poll, Duration::from_secs(1));
        assert_eq!(config.notification_poll, Duration::from_secs(5));
        assert_eq!(config.subscription_poll, Duration::from_secs(10));
    }
}
