//! Parsing of the JSON payloads CloudMailin posts to webhook endpoints.
//!
//! Both entry points decode the whole payload in a single pass, header values
//! included. Any failure is reported as [`CloudMailinError::Decode`] and no
//! partial message is returned.
//!
//! ```rust
//! use cloudmailin_client::webhooks::parse_incoming_bytes;
//!
//! let body = br#"{"headers": {"message_id": "<abc@example.com>"}, "plain": "Hi"}"#;
//! let mail = parse_incoming_bytes(body)?;
//! assert_eq!(mail.headers.message_id(), "<abc@example.com>");
//! # Ok::<(), cloudmailin_client::CloudMailinError>(())
//! ```
//!
//! [`CloudMailinError::Decode`]: crate::errors::CloudMailinError::Decode

use std::io::Read;

use crate::errors::CloudMailinResult;
use crate::types::IncomingMail;

/// Parses an incoming mail from a reader, typically an HTTP request body.
pub fn parse_incoming<R: Read>(reader: R) -> CloudMailinResult<IncomingMail> {
    IncomingMail::from_reader(reader)
}

/// Parses an incoming mail from a byte buffer.
pub fn parse_incoming_bytes(data: &[u8]) -> CloudMailinResult<IncomingMail> {
    IncomingMail::from_slice(data)
}
