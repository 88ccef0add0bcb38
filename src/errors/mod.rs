//! Error types for the CloudMailin client.
//!
//! Every operation returns [`CloudMailinResult`]. Errors are always handed back
//! to the caller; the client never retries or recovers on its own.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for CloudMailin operations.
pub type CloudMailinResult<T> = Result<T, CloudMailinError>;

/// Error type for CloudMailin client operations.
#[derive(Debug, Error)]
pub enum CloudMailinError {
    /// The payload could not be decoded (malformed JSON, unreadable stream,
    /// header of an unsupported wire type, invalid base64).
    #[error("Decode error: {message}")]
    Decode {
        /// Error message describing the decoding issue.
        message: String,
    },

    /// Configuration error (missing credentials, invalid connection string
    /// or base URL). Raised before any network call is attempted.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Error message describing the configuration issue.
        message: String,
    },

    /// The provider answered with a non-success status.
    #[error("could not send message ({status_code}): {body}")]
    Remote {
        /// HTTP status code.
        status_code: u16,
        /// Raw response body.
        body: String,
    },

    /// An attachment source file could not be read.
    #[error("File error ({}): {source}", path.display())]
    File {
        /// Path of the file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Network/connection error raised by the transport.
    #[error("Network error: {message}")]
    Network {
        /// Error message.
        message: String,
    },

    /// The request body could not be serialized.
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error message.
        message: String,
    },
}

impl CloudMailinError {
    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        CloudMailinError::Decode {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        CloudMailinError::Configuration {
            message: message.into(),
        }
    }

    /// Creates a remote error from a status code and a raw body.
    pub fn remote(status_code: u16, body: &[u8]) -> Self {
        CloudMailinError::Remote {
            status_code,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Returns true if the provider rejected the request.
    pub fn is_remote(&self) -> bool {
        matches!(self, CloudMailinError::Remote { .. })
    }

    /// Returns true if this is a configuration error.
    pub fn is_configuration(&self) -> bool {
        matches!(self, CloudMailinError::Configuration { .. })
    }

    /// Returns the HTTP status code carried by a remote error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CloudMailinError::Remote { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CloudMailinError {
    fn from(err: serde_json::Error) -> Self {
        CloudMailinError::Decode {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for CloudMailinError {
    fn from(err: url::ParseError) -> Self {
        CloudMailinError::Configuration {
            message: format!("Invalid URL: {}", err),
        }
    }
}

impl From<base64::DecodeError> for CloudMailinError {
    fn from(err: base64::DecodeError) -> Self {
        CloudMailinError::Decode {
            message: format!("Invalid base64 content: {}", err),
        }
    }
}
