//! Chat message wire model and rendering resolution.
//!
//! Messages are discriminated by a `type` field; each variant carries its
//! own URL field.  [`ChatMessage::body`] collapses that into a single enum a
//! renderer can match on.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DOWNLOAD_FALLBACK_LABEL;
use crate::types::{ChatId, MessageId, ProfileId};

/// Message variant tag on the wire.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    #[default]
    Text,
    Image,
    Video,
    Audio,
    File,
}

/// An emoji reaction attached to a message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub emoji: String,
    pub profile_id: ProfileId,
}

/// A single chat message as returned by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: MessageId,
    pub chat_id: ChatId,
    pub sender_id: ProfileId,
    #[serde(rename = "type", default)]
    pub kind: MessageKind,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

/// What a renderer should draw for one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageBody<'a> {
    Text(&'a str),
    Image { url: &'a str },
    Video { url: &'a str },
    Audio { url: &'a str },
    /// Generic file: a download link with a label.
    Download { url: &'a str, label: &'a str },
}

impl ChatMessage {
    /// Resolve the body from the `type` tag and its URL field.
    ///
    /// A media message whose URL field is missing degrades to its text
    /// content rather than producing a broken element.
    pub fn body(&self) -> MessageBody<'_> {
        match self.kind {
            MessageKind::Text => MessageBody::Text(&self.content),
            MessageKind::Image => match self.image_url.as_deref() {
                Some(url) => MessageBody::Image { url },
                None => MessageBody::Text(&self.content),
            },
            MessageKind::Video => match self.video_url.as_deref() {
                Some(url) => MessageBody::Video { url },
                None => MessageBody::Text(&self.content),
            },
            MessageKind::Audio => match self.audio_url.as_deref() {
                Some(url) => MessageBody::Audio { url },
                None => MessageBody::Text(&self.content),
            },
            MessageKind::File => match self.file_url.as_deref() {
                Some(url) => MessageBody::Download {
                    url,
                    label: self.file_name.as_deref().unwrap_or(DOWNLOAD_FALLBACK_LABEL),
                },
                None => MessageBody::Text(&self.content),
            },
        }
    }
}

/// Classify an upload by its MIME prefix, the same bucketing the server
/// applies to the resulting message.
pub fn classify_mime(mime: &str) -> MessageKind {
    if mime.starts_with("image/") {
        MessageKind::Image
    } else if mime.starts_with("video/") {
        MessageKind::Video
    } else if mime.starts_with("audio/") {
        MessageKind::Audio
    } else {
        MessageKind::File
    }
}
