//! Outbound messages service.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::instrument;

use crate::auth::AuthProvider;
use crate::errors::{CloudMailinError, CloudMailinResult};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::types::OutboundMail;

/// The only status the API uses to accept a message.
pub const SEND_SUCCESS_STATUS: u16 = 202;

const MESSAGES_PATH: &str = "messages";

/// Messages service for sending outbound email.
pub struct MessagesService {
    transport: Arc<dyn HttpTransport>,
    auth: Arc<dyn AuthProvider>,
    custom_headers: Vec<(String, String)>,
}

impl MessagesService {
    /// Creates a new messages service.
    pub fn new(transport: Arc<dyn HttpTransport>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            transport,
            auth,
            custom_headers: Vec::new(),
        }
    }

    /// Adds headers sent with every request.
    pub fn with_custom_headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.custom_headers = headers;
        self
    }

    /// Sends a message.
    ///
    /// On success the API's response replaces `message` entirely, so fields the
    /// server does not echo back are reset and `id` is filled in. On any error
    /// `message` is left untouched.
    ///
    /// # Errors
    ///
    /// - [`CloudMailinError::Configuration`] if the account id or token is
    ///   missing; no request is made.
    /// - [`CloudMailinError::Remote`] if the API answers with anything but 202.
    /// - [`CloudMailinError::Decode`] if the success body cannot be decoded.
    #[instrument(skip(self, message), fields(account = %self.auth.account_id()))]
    pub async fn send(&self, message: &mut OutboundMail) -> CloudMailinResult<HttpResponse> {
        self.auth.validate()?;

        let http_request = self.build_request(message)?;
        tracing::debug!(path = %http_request.path, "Submitting message");

        let response = self.transport.send(http_request).await?;

        if response.status != SEND_SUCCESS_STATUS {
            tracing::warn!(status = response.status, body = %response.text(), "Message was not accepted");
            return Err(CloudMailinError::remote(response.status, &response.body));
        }

        let accepted: OutboundMail = response.json()?;
        *message = accepted;
        tracing::debug!(id = %message.id, "Message accepted");

        Ok(response)
    }

    /// Builds an HTTP request.
    fn build_request(&self, message: &OutboundMail) -> CloudMailinResult<HttpRequest> {
        let body = serde_json::to_vec(message).map_err(|e| CloudMailinError::Serialization {
            message: e.to_string(),
        })?;

        let mut auth_headers = HashMap::new();
        self.auth.apply_auth(&mut auth_headers);

        Ok(
            HttpRequest::post(format!("{}/{}", self.auth.account_id(), MESSAGES_PATH))
                .with_headers(self.custom_headers.iter().cloned().collect())
                .with_header("Content-Type", "application/json")
                .with_headers(auth_headers)
                .with_body(body),
        )
    }
}

impl std::fmt::Debug for MessagesService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagesService").finish()
    }
}
