//! Inbound mail types.
//!
//! The shape of the JSON body CloudMailin posts to a webhook when an email is
//! received. Fields missing from a payload, or sent as `null`, decode to
//! empty values. Header values are the exception: see [`IncomingMailHeader`].
//!
//! [`IncomingMailHeader`]: super::headers::IncomingMailHeader

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::io::Read;

use super::headers::IncomingMailHeaders;
use super::serde_helpers::{null_default, string_number};
use crate::errors::{CloudMailinError, CloudMailinResult};

/// An email received via HTTP from the CloudMailin email-to-webhook service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomingMail {
    /// SMTP transaction details.
    #[serde(deserialize_with = "null_default")]
    pub envelope: IncomingMailEnvelope,
    /// The message headers.
    #[serde(deserialize_with = "null_default")]
    pub headers: IncomingMailHeaders,
    /// Plain text body.
    #[serde(deserialize_with = "null_default")]
    pub plain: String,
    /// HTML body.
    #[serde(deserialize_with = "null_default")]
    pub html: String,
    /// Plain text reply, with quoted history removed.
    #[serde(deserialize_with = "null_default")]
    pub reply_plain: String,
    /// Attachments in message order.
    #[serde(deserialize_with = "null_default")]
    pub attachments: Vec<IncomingMailAttachment>,
}

impl IncomingMail {
    /// Parses an incoming mail from a reader, such as an HTTP request body.
    pub fn from_reader<R: Read>(reader: R) -> CloudMailinResult<Self> {
        serde_json::from_reader(reader).map_err(decode_error)
    }

    /// Parses an incoming mail from a byte slice.
    pub fn from_slice(data: &[u8]) -> CloudMailinResult<Self> {
        serde_json::from_slice(data).map_err(decode_error)
    }
}

fn decode_error(err: serde_json::Error) -> CloudMailinError {
    if err.is_io() {
        CloudMailinError::decode(format!("could not read payload: {}", err))
    } else {
        CloudMailinError::decode(format!("invalid payload: {}", err))
    }
}

/// Information passed to the SMTP server when the message was delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomingMailEnvelope {
    /// Envelope recipient the message was received for.
    #[serde(deserialize_with = "null_default")]
    pub to: String,
    /// Envelope sender.
    #[serde(deserialize_with = "null_default")]
    pub from: String,
    /// All envelope recipients.
    #[serde(deserialize_with = "null_default")]
    pub recipients: Vec<String>,
    /// Domain announced in the SMTP HELO.
    #[serde(deserialize_with = "null_default")]
    pub helo_domain: String,
    /// IP address of the sending server.
    #[serde(deserialize_with = "null_default")]
    pub remote_ip: String,
    /// Whether the message was delivered over TLS.
    #[serde(deserialize_with = "null_default")]
    pub tls: bool,
    /// TLS cipher/protocol used.
    #[serde(deserialize_with = "null_default")]
    pub tls_cipher: String,
    /// MD5 checksum of the message.
    #[serde(deserialize_with = "null_default")]
    pub md5: String,
    /// URL of the archived raw message, if storage is enabled.
    #[serde(deserialize_with = "null_default")]
    pub store_url: String,
    /// SPF check result.
    #[serde(deserialize_with = "null_default")]
    pub spf: IncomingMailEnvelopeSpf,
    /// SpamAssassin result (if enabled).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spamd: Option<IncomingMailEnvelopeSpamd>,
}

/// SPF result and the domain it was evaluated for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomingMailEnvelopeSpf {
    /// SPF result, such as `pass`, `fail` or `neutral`.
    #[serde(deserialize_with = "null_default")]
    pub result: String,
    /// Domain checked.
    #[serde(deserialize_with = "null_default")]
    pub domain: String,
}

/// Result of the SpamAssassin scan of the email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomingMailEnvelopeSpamd {
    /// Spam score, sent as a quoted numeral.
    #[serde(with = "string_number")]
    pub score: u32,
    /// Rules that matched.
    #[serde(deserialize_with = "null_default")]
    pub symbols: Vec<String>,
    /// Whether the scan ran successfully.
    #[serde(deserialize_with = "null_default")]
    pub success: bool,
    /// Human readable summary.
    #[serde(deserialize_with = "null_default")]
    pub description: String,
}

/// An attachment of a received email.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomingMailAttachment {
    /// Base64 encoded content. Empty when the attachment is stored remotely.
    #[serde(deserialize_with = "null_default")]
    pub content: String,
    /// File name.
    #[serde(deserialize_with = "null_default")]
    pub file_name: String,
    /// MIME content type.
    #[serde(deserialize_with = "null_default")]
    pub content_type: String,
    /// Size in bytes, sent as a quoted numeral.
    #[serde(with = "string_number")]
    pub size: u64,
    /// Content disposition (`attachment` or `inline`).
    #[serde(deserialize_with = "null_default")]
    pub disposition: String,
    /// Content id used to reference inline parts.
    #[serde(deserialize_with = "null_default")]
    pub content_id: String,
    /// URL of the stored attachment, when attachment storage is enabled.
    #[serde(deserialize_with = "null_default")]
    pub url: String,
    /// Virus scan result.
    #[serde(deserialize_with = "null_default")]
    pub scan: IncomingMailAttachmentScan,
}

impl IncomingMailAttachment {
    /// Decodes the base64 content into raw bytes.
    pub fn decoded_content(&self) -> CloudMailinResult<Vec<u8>> {
        Ok(STANDARD.decode(self.content.as_bytes())?)
    }

    /// Returns true when the content is hosted at `url` instead of inlined.
    pub fn is_remote(&self) -> bool {
        self.content.is_empty() && !self.url.is_empty()
    }
}

/// Result of virus scanning an attachment (if enabled).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomingMailAttachmentScan {
    /// Scan status, such as `ok` or `infected`.
    #[serde(deserialize_with = "null_default")]
    pub status: String,
    /// Scan id.
    #[serde(deserialize_with = "null_default")]
    pub id: String,
    /// Signatures that matched.
    #[serde(deserialize_with = "null_default")]
    pub matches: Vec<String>,
}
