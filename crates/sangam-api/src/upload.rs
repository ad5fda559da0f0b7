//! Multipart uploads: profile photos, chat attachments, payment proofs.
//!
//! Uploads are single-shot; there is no chunking or resumability.  A failed
//! upload returns an error and nothing is applied locally, so there is no
//! rollback either.

use reqwest::multipart::{Form, Part};
use tracing::info;

use sangam_shared::constants::MAX_UPLOAD_SIZE;
use sangam_shared::{classify_mime, ChatId, ChatMessage, Profile, ValidationError};

use crate::client::ApiClient;
use crate::error::Result;

/// A file picked for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    fn check_size(&self) -> std::result::Result<(), ValidationError> {
        if self.bytes.len() > MAX_UPLOAD_SIZE {
            return Err(ValidationError::FileTooLarge {
                size: self.bytes.len(),
                max: MAX_UPLOAD_SIZE,
            });
        }
        Ok(())
    }

    fn into_part(self) -> Result<Part> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)?;
        Ok(part)
    }
}

impl ApiClient {
    /// Add a profile photo; returns the refreshed profile.
    pub async fn upload_photo(&self, file: UploadFile) -> Result<Profile> {
        file.check_size()?;
        info!(name = %file.file_name, size = file.bytes.len(), "uploading profile photo");

        let form = Form::new().part("photo", file.into_part()?);
        self.post_multipart("/api/profile/photos", form).await
    }

    /// Send a media message.  The attachment is classified by MIME prefix
    /// and the resulting kind is sent alongside the file so the server can
    /// build the right message variant.
    pub async fn upload_chat_attachment(
        &self,
        chat_id: &ChatId,
        file: UploadFile,
    ) -> Result<ChatMessage> {
        file.check_size()?;
        let kind = classify_mime(&file.mime);
        info!(
            chat = %chat_id,
            name = %file.file_name,
            kind = ?kind,
            "uploading chat attachment"
        );

        let kind_value = serde_json::to_value(kind)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| "file".to_string());

        let form = Form::new()
            .text("type", kind_value)
            .part("file", file.into_part()?);

        self.post_multipart(&format!("/api/chats/{chat_id}/messages/media"), form)
            .await
    }

    /// Attach a payment-proof image to a pending subscription.
    pub async fn upload_payment_proof(
        &self,
        subscription_id: &str,
        file: UploadFile,
    ) -> Result<()> {
        file.check_size()?;
        info!(subscription = subscription_id, "uploading payment proof");

        let form = Form::new().part("proof", file.into_part()?);
        self.post_multipart_empty(
            &format!("/api/subscriptions/{subscription_id}/payment-proof"),
            form,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_upload_rejected_before_send() {
        let file = UploadFile {
            file_name: "huge.bin".into(),
            mime: "application/octet-stream".into(),
            bytes: vec![0; MAX_UPLOAD_SIZE + 1],
        };
        assert!(matches!(
            file.check_size(),
            Err(ValidationError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn size_cap_is_inclusive() {
        let file = UploadFile {
            file_name: "ok.bin".into(),
            mime: "application/octet-stream".into(),
            bytes: vec![0; MAX_UPLOAD_SIZE],
        };
        assert!(file.check_size().is_ok());
    }
}
