//! UI event bus.
//!
//! Controllers publish [`UiEvent`]s; whatever shell hosts the client
//! subscribes and renders toasts, modals, and navigation.  Built on a tokio
//! broadcast channel so any number of views can listen.

use tokio::sync::broadcast;

use sangam_api::ApiError;
use sangam_shared::{ChatId, NavTarget};

const EVENT_CAPACITY: usize = 64;

/// Events the UI shell reacts to.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Transient user-facing notification.
    Toast { message: String },
    /// Blocking modal: an active subscription is required.
    SubscriptionModal,
    /// Blocking modal: the profile checklist is incomplete.
    ProfileIncompleteModal,
    /// Navigate to a screen (notification taps).
    Navigate(NavTarget),
    /// A conversation gained new messages since the last poll.
    NewMessages { chat_id: ChatId },
}

/// Cloneable handle to the broadcast bus.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<UiEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(EVENT_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.tx.subscribe()
    }

    /// Publish an event.  No subscribers is normal during startup and is
    /// not an error.
    pub fn emit(&self, event: UiEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("UI event dropped, no subscribers");
        }
    }

    pub fn toast(&self, message: impl Into<String>) {
        self.emit(UiEvent::Toast {
            message: message.into(),
        });
    }

    /// Surface an API failure per the error policy: gated-endpoint
    /// rejections raise the subscription modal, everything else becomes a
    /// toast with the server's message or a generic fallback.
    pub fn report_api_error(&self, err: &ApiError) {
        if err.is_subscription_required() {
            self.emit(UiEvent::SubscriptionModal);
        } else {
            self.toast(err.user_message());
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
