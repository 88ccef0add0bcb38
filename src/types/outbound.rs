//! Outbound mail types.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::serde_helpers::null_default;
use crate::errors::{CloudMailinError, CloudMailinResult};

/// An email message ready to be sent.
///
/// The value is sent as-is and then replaced by whatever the API returns, so
/// after a successful send `id` is populated and `tags` reflects the server's
/// list (which may include tags the server added).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutboundMail {
    /// Sender address.
    #[serde(deserialize_with = "null_default")]
    pub from: String,
    /// Recipients.
    #[serde(deserialize_with = "null_default", skip_serializing_if = "Vec::is_empty")]
    pub to: Vec<String>,
    /// Carbon copy recipients.
    #[serde(deserialize_with = "null_default", skip_serializing_if = "Vec::is_empty")]
    pub cc: Vec<String>,
    /// Extra headers, each with one or more values.
    #[serde(deserialize_with = "null_default", skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, Vec<String>>,
    /// Subject line.
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub subject: String,
    /// Plain text body.
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub plain: String,
    /// HTML body.
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub html: String,
    /// Message priority. The API spells this key `priorty`.
    #[serde(rename = "priorty", deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub priority: String,
    /// Tags for filtering and reporting.
    #[serde(deserialize_with = "null_default", skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Attachments.
    #[serde(deserialize_with = "null_default", skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<OutboundMailAttachment>,
    /// Accept the message without delivering it.
    #[serde(deserialize_with = "null_default", skip_serializing_if = "is_false")]
    pub test_mode: bool,
    /// Message id assigned by the API after sending.
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub id: String,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl OutboundMail {
    /// Creates a message from a sender address.
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            ..Self::default()
        }
    }

    /// Adds a recipient.
    pub fn with_to(mut self, address: impl Into<String>) -> Self {
        self.to.push(address.into());
        self
    }

    /// Adds a carbon copy recipient.
    pub fn with_cc(mut self, address: impl Into<String>) -> Self {
        self.cc.push(address.into());
        self
    }

    /// Appends a value to a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.entry(name.into()).or_default().push(value.into());
        self
    }

    /// Sets the subject.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the plain text body.
    pub fn with_plain(mut self, plain: impl Into<String>) -> Self {
        self.plain = plain.into();
        self
    }

    /// Sets the HTML body.
    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = html.into();
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Adds a tag.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Adds an attachment.
    pub fn with_attachment(mut self, attachment: OutboundMailAttachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// Enables or disables test mode.
    pub fn with_test_mode(mut self, test_mode: bool) -> Self {
        self.test_mode = test_mode;
        self
    }
}

/// An attachment to send with an [`OutboundMail`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutboundMailAttachment {
    /// Base64 encoded content.
    #[serde(deserialize_with = "null_default")]
    pub content: String,
    /// Optional content id for embedding the attachment inline.
    #[serde(deserialize_with = "null_default", skip_serializing_if = "String::is_empty")]
    pub content_id: String,
    /// MIME content type such as `image/jpeg`.
    #[serde(deserialize_with = "null_default")]
    pub content_type: String,
    /// File name.
    #[serde(deserialize_with = "null_default")]
    pub file_name: String,
}

impl OutboundMailAttachment {
    /// Builds an attachment from raw bytes, base64 encoding them.
    pub fn from_bytes(file_name: impl Into<String>, data: &[u8]) -> Self {
        Self {
            content: STANDARD.encode(data),
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Builds an attachment from a local file. See [`attachment_from_file`].
    pub fn from_file(path: impl AsRef<Path>) -> CloudMailinResult<Self> {
        attachment_from_file(path)
    }

    /// Sets the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Sets the content id.
    pub fn with_content_id(mut self, content_id: impl Into<String>) -> Self {
        self.content_id = content_id.into();
        self
    }
}

/// Prepares an attachment from a local file.
///
/// The content is base64 encoded and the file name is the last segment of
/// `path`. `content_type` and `content_id` are left empty for the caller.
pub fn attachment_from_file(path: impl AsRef<Path>) -> CloudMailinResult<OutboundMailAttachment> {
    let path = path.as_ref();
    let data = std::fs::read(path).map_err(|source| CloudMailinError::File {
        path: path.to_path_buf(),
        source,
    })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(OutboundMailAttachment::from_bytes(file_name, &data))
}
