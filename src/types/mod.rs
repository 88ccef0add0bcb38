//! Type definitions for the CloudMailin API.

pub mod headers;
pub mod incoming;
pub mod outbound;
pub mod serde_helpers;

pub use headers::{IncomingMailHeader, IncomingMailHeaders};
pub use incoming::{
    IncomingMail, IncomingMailAttachment, IncomingMailAttachmentScan, IncomingMailEnvelope,
    IncomingMailEnvelopeSpamd, IncomingMailEnvelopeSpf,
};
pub use outbound::{attachment_from_file, OutboundMail, OutboundMailAttachment};
