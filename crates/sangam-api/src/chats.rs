//! Chat endpoints: conversations, messages, typing signals, blocking,
//! reactions, and the per-conversation media gallery.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sangam_shared::{ChatId, ChatMessage, MessageId, MessageKind, ProfileId};

use crate::client::ApiClient;
use crate::error::Result;

/// One row in the chat list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub id: ChatId,
    pub partner_id: ProfileId,
    pub partner_name: String,
    #[serde(default)]
    pub partner_photo: Option<String>,
    #[serde(default)]
    pub last_message: Option<ChatMessage>,
    #[serde(default)]
    pub unread_count: u32,
    #[serde(default)]
    pub is_blocked: bool,
    pub updated_at: DateTime<Utc>,
}

/// Typing state of the conversation partner.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypingStatus {
    pub is_typing: bool,
}

/// One entry in the shared-media gallery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OutgoingText<'a> {
    #[serde(rename = "type")]
    kind: MessageKind,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ReactionToggle<'a> {
    emoji: &'a str,
}

impl ApiClient {
    /// All conversations for the signed-in member, most recent first.
    pub async fn list_chats(&self) -> Result<Vec<ChatSummary>> {
        self.get_json("/api/chats").await
    }

    /// Full message history of one conversation.
    pub async fn chat_messages(&self, chat_id: &ChatId) -> Result<Vec<ChatMessage>> {
        self.get_json(&format!("/api/chats/{chat_id}/messages")).await
    }

    /// Send a plain text message.
    pub async fn send_text_message(
        &self,
        chat_id: &ChatId,
        content: &str,
    ) -> Result<ChatMessage> {
        self.post_json(
            &format!("/api/chats/{chat_id}/messages"),
            &OutgoingText {
                kind: MessageKind::Text,
                content,
            },
        )
        .await
    }

    pub async fn delete_chat_message(
        &self,
        chat_id: &ChatId,
        message_id: &MessageId,
    ) -> Result<()> {
        self.delete(&format!("/api/chats/{chat_id}/messages/{message_id}"))
            .await
    }

    /// Signal that the member is typing.  Fire-and-forget: one signal per
    /// keystroke, no client-side suppression; the server expires the
    /// indicator on its own timeout.
    pub async fn send_typing(&self, chat_id: &ChatId) -> Result<()> {
        self.post_empty(&format!("/api/chats/{chat_id}/typing")).await
    }

    /// Poll the partner's typing state.
    pub async fn typing_status(&self, chat_id: &ChatId) -> Result<TypingStatus> {
        self.get_json(&format!("/api/chats/{chat_id}/typing")).await
    }

    pub async fn block_chat(&self, chat_id: &ChatId) -> Result<()> {
        self.post_empty(&format!("/api/chats/{chat_id}/block")).await
    }

    pub async fn unblock_chat(&self, chat_id: &ChatId) -> Result<()> {
        self.post_empty(&format!("/api/chats/{chat_id}/unblock")).await
    }

    /// All media ever exchanged in a conversation.
    pub async fn media_gallery(&self, chat_id: &ChatId) -> Result<Vec<MediaItem>> {
        self.get_json(&format!("/api/chats/{chat_id}/media")).await
    }

    /// Toggle an emoji reaction on a message.  The caller refetches the
    /// message list afterwards; nothing is applied locally.
    pub async fn toggle_reaction(
        &self,
        chat_id: &ChatId,
        message_id: &MessageId,
        emoji: &str,
    ) -> Result<()> {
        self.post_json_empty(
            &format!("/api/chats/{chat_id}/messages/{message_id}/reactions"),
            &ReactionToggle { emoji },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_summary_decodes() {
        let summary: ChatSummary = serde_json::from_str(
            r#"{
                "id": "c1",
                "partnerId": "p2",
                "partnerName": "Asha",
                "unreadCount": 3,
                "updatedAt": "2026-03-01T10:00:00Z"
            }"#,
        )
        .unwrap();
        assert_eq!(summary.unread_count, 3);
        assert!(summary.last_message.is_none());
        assert!(!summary.is_blocked);
    }

    #[test]
    fn outgoing_text_wire_shape() {
        let body = OutgoingText {
            kind: MessageKind::Text,
            content: "namaste",
        };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"type":"text","content":"namaste"}"#
        );
    }
}
