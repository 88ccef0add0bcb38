//! Service implementations for the CloudMailin API.

mod messages;

pub use messages::{MessagesService, SEND_SUCCESS_STATUS};
