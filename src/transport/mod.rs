//! HTTP transport layer for the CloudMailin client.
//!
//! Provides the HTTP transport abstraction and the reqwest-backed
//! implementation used to submit requests to the CloudMailin API.

mod http;

pub use http::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};

use std::time::Duration;

/// Transport error types.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection error.
    #[error("Connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Timeout error.
    #[error("Timeout after {timeout:?}")]
    Timeout {
        /// Timeout duration.
        timeout: Duration,
    },

    /// Invalid response.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}

impl From<TransportError> for crate::errors::CloudMailinError {
    fn from(err: TransportError) -> Self {
        crate::errors::CloudMailinError::Network {
            message: err.to_string(),
        }
    }
}
