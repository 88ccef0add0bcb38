//! CloudMailin Client Library
//!
//! A Rust client for the CloudMailin email API. It covers both directions:
//! parsing the JSON payloads CloudMailin posts to webhooks when an email is
//! received, and sending outbound email (with attachments) through the HTTP API.
//!
//! # Features
//!
//! - **Inbound parsing**: one-pass decoding of webhook payloads into [`IncomingMail`]
//! - **Header lookup**: ordered, multi-valued headers with first/last semantics
//! - **Outbound sending**: [`OutboundMail`] round-tripped through the API
//! - **Attachments**: base64 encoding from files or bytes
//! - **Type Safety**: serde-backed types matching the wire format exactly
//!
//! # Receiving
//!
//! ```rust
//! use cloudmailin_client::webhooks::parse_incoming_bytes;
//!
//! let body = br#"{
//!     "headers": {
//!         "subject": ["Re: Hello", "Hello"],
//!         "received": ["by mx2.example.net", "by mx1.example.net"]
//!     },
//!     "plain": "Hi there"
//! }"#;
//!
//! let mail = parse_incoming_bytes(body)?;
//! // `first` is the oldest occurrence, `last` the most recently added one.
//! assert_eq!(mail.headers.subject(), "Hello");
//! assert_eq!(mail.headers.last("received"), "by mx2.example.net");
//! # Ok::<(), cloudmailin_client::CloudMailinError>(())
//! ```
//!
//! # Sending
//!
//! ```rust,no_run
//! use cloudmailin_client::{attachment_from_file, CloudMailinClient, OutboundMail};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CloudMailinClient::from_env()?;
//!
//!     let attachment = attachment_from_file("./pixel.png")?.with_content_type("image/png");
//!     let mut message = OutboundMail::new("sender@example.com")
//!         .with_to("debug@example.net")
//!         .with_subject("Hello")
//!         .with_plain("Hello World")
//!         .with_tag("rust")
//!         .with_attachment(attachment);
//!
//!     client.send_mail(&mut message).await?;
//!     println!("ID: {}, tags: {:?}", message.id, message.tags);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod services;
pub mod transport;
pub mod types;
pub mod webhooks;

// Re-exports for convenience
pub use client::{CloudMailinClient, CloudMailinClientBuilder};
pub use config::{CloudMailinConfig, CloudMailinConfigBuilder};
pub use errors::{CloudMailinError, CloudMailinResult};

// Type re-exports
pub use types::headers::{IncomingMailHeader, IncomingMailHeaders};
pub use types::incoming::{
    IncomingMail, IncomingMailAttachment, IncomingMailAttachmentScan, IncomingMailEnvelope,
    IncomingMailEnvelopeSpamd, IncomingMailEnvelopeSpf,
};
pub use types::outbound::{attachment_from_file, OutboundMail, OutboundMailAttachment};
pub use webhooks::{parse_incoming, parse_incoming_bytes};

/// Mock implementations for testing.
#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
