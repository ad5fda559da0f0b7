//! Chat screen controllers.
//!
//! [`ChatListController`] keeps the conversation list fresh;
//! [`ConversationController`] runs the message and typing polls for one
//! open conversation.  Both screens are gated: mounting while blocked
//! emits the modal and starts no polls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::debug;

use sangam_api::{ChatSummary, MediaItem, Result as ApiResult, UploadFile};
use sangam_shared::{ChatId, ChatMessage, MessageId};

use crate::cache::QueryKey;
use crate::events::UiEvent;
use crate::poller::{spawn_poll, PollErrorPolicy, PollHandle};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// chat list
// ---------------------------------------------------------------------------

pub struct ChatListController {
    state: Arc<AppState>,
    _poll: Option<PollHandle>,
}

impl ChatListController {
    pub fn mount(state: Arc<AppState>) -> Self {
        let poll = state
            .gate
            .enforce(&state.events)
            .then(|| spawn_list_poll(&state));
        Self { state, _poll: poll }
    }

    /// The cached conversation list, most recent first.
    pub fn chats(&self) -> Vec<ChatSummary> {
        self.state.cache.get(&QueryKey::ChatList).unwrap_or_default()
    }

    pub fn total_unread(&self) -> u32 {
        self.chats().iter().map(|c| c.unread_count).sum()
    }

    pub async fn block(&self, chat_id: &ChatId) -> ApiResult<()> {
        self.mutate(self.state.api.block_chat(chat_id).await).await
    }

    pub async fn unblock(&self, chat_id: &ChatId) -> ApiResult<()> {
        self.mutate(self.state.api.unblock_chat(chat_id).await).await
    }

    /// Apply a mutation result: refetch the list on success, report on
    /// failure.
    async fn mutate(&self, result: ApiResult<()>) -> ApiResult<()> {
        match result {
            Ok(()) => {
                refetch_list(&self.state).await;
                Ok(())
            }
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }
}

fn spawn_list_poll(state: &Arc<AppState>) -> PollHandle {
    let state = Arc::clone(state);
    spawn_poll(
        "chat-list",
        state.config.chat_list_poll,
        PollErrorPolicy::WarnAndRetry,
        move || {
            let state = Arc::clone(&state);
            async move {
                let chats = state.api.list_chats().await?;
                state.cache.put(QueryKey::ChatList, &chats);
                Ok(())
            }
        },
    )
}

async fn refetch_list(state: &Arc<AppState>) {
    match state.api.list_chats().await {
        Ok(chats) => state.cache.put(QueryKey::ChatList, &chats),
        Err(e) => debug!(error = %e, "chat list refetch failed, next poll retries"),
    }
}

// ---------------------------------------------------------------------------
// open conversation
// ---------------------------------------------------------------------------

pub struct ConversationController {
    state: Arc<AppState>,
    chat_id: ChatId,
    _message_poll: Option<PollHandle>,
    _typing_poll: Option<PollHandle>,
}

impl ConversationController {
    pub fn mount(state: Arc<AppState>, chat_id: ChatId) -> Self {
        let (message_poll, typing_poll) = if state.gate.enforce(&state.events) {
            (
                Some(spawn_message_poll(&state, chat_id.clone())),
                Some(spawn_typing_poll(&state, chat_id.clone())),
            )
        } else {
            (None, None)
        };

        Self {
            state,
            chat_id,
            _message_poll: message_poll,
            _typing_poll: typing_poll,
        }
    }

    pub fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    pub fn messages(&self) -> Vec<ChatMessage> {
        self.state
            .cache
            .get(&QueryKey::Conversation(self.chat_id.clone()))
            .unwrap_or_default()
    }

    pub fn partner_typing(&self) -> bool {
        self.state
            .cache
            .get::<sangam_api::TypingStatus>(&QueryKey::TypingState(self.chat_id.clone()))
            .map(|t| t.is_typing)
            .unwrap_or(false)
    }

    pub async fn send_message(&self, content: &str) -> ApiResult<ChatMessage> {
        match self.state.api.send_text_message(&self.chat_id, content).await {
            Ok(message) => {
                // the send response is not applied locally; the refetch is
                // the single source of message state
                self.refetch_messages().await;
                self.state.cache.invalidate(&QueryKey::ChatList);
                Ok(message)
            }
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    /// Fire a typing signal, one per keystroke.  Failures are invisible to
    /// the member.
    pub fn on_keystroke(&self) {
        let api = Arc::clone(&self.state.api);
        let chat_id = self.chat_id.clone();
        tokio::spawn(async move {
            if let Err(e) = api.send_typing(&chat_id).await {
                debug!(chat = %chat_id, error = %e, "typing signal failed");
            }
        });
    }

    pub async fn delete_message(&self, message_id: &MessageId) -> ApiResult<()> {
        match self
            .state
            .api
            .delete_chat_message(&self.chat_id, message_id)
            .await
        {
            Ok(()) => {
                self.refetch_messages().await;
                Ok(())
            }
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    pub async fn toggle_reaction(&self, message_id: &MessageId, emoji: &str) -> ApiResult<()> {
        match self
            .state
            .api
            .toggle_reaction(&self.chat_id, message_id, emoji)
            .await
        {
            Ok(()) => {
                self.refetch_messages().await;
                Ok(())
            }
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    pub async fn send_attachment(&self, file: UploadFile) -> ApiResult<ChatMessage> {
        match self
            .state
            .api
            .upload_chat_attachment(&self.chat_id, file)
            .await
        {
            Ok(message) => {
                self.refetch_messages().await;
                Ok(message)
            }
            Err(e) => {
                self.state.events.report_api_error(&e);
                Err(e)
            }
        }
    }

    /// Fetch the shared-media gallery for this conversation.
    pub async fn load_media_gallery(&self) -> ApiResult<Vec<MediaItem>> {
        let media = self.state.api.media_gallery(&self.chat_id).await?;
        self.state
            .cache
            .put(QueryKey::MediaGallery(self.chat_id.clone()), &media);
        Ok(media)
    }

    async fn refetch_messages(&self) {
        match self.state.api.chat_messages(&self.chat_id).await {
            Ok(messages) => self
                .state
                .cache
                .put(QueryKey::Conversation(self.chat_id.clone()), &messages),
            Err(e) => debug!(error = %e, "message refetch failed, next poll retries"),
        }
    }
}

fn spawn_message_poll(state: &Arc<AppState>, chat_id: ChatId) -> PollHandle {
    let state = Arc::clone(state);
    let seen = Arc::new(AtomicUsize::new(0));

    spawn_poll(
        "conversation",
        state.config.conversation_poll,
        PollErrorPolicy::WarnAndRetry,
        move || {
            let state = Arc::clone(&state);
            let seen = Arc::clone(&seen);
            let chat_id = chat_id.clone();
            async move {
                let messages = state.api.chat_messages(&chat_id).await?;

                let previous = seen.swap(messages.len(), Ordering::SeqCst);
                if messages.len() > previous && previous > 0 {
                    state.events.emit(UiEvent::NewMessages {
                        chat_id: chat_id.clone(),
                    });
                }

                state
                    .cache
                    .put(QueryKey::Conversation(chat_id), &messages);
                Ok(())
            }
        },
    )
}

fn spawn_typing_poll(state: &Arc<AppState>, chat_id: ChatId) -> PollHandle {
    let state = Arc::clone(state);
    spawn_poll(
        "typing",
        state.config.typing_poll,
        PollErrorPolicy::Silent,
        move || {
            let state = Arc::clone(&state);
            let chat_id = chat_id.clone();
            async move {
                let typing = state.api.typing_status(&chat_id).await?;
                state.cache.put(QueryKey::TypingState(chat_id), &typing);
                Ok(())
            }
        },
    )
}
