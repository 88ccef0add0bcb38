//! Authentication module for the CloudMailin client.
//!
//! Outbound sending authenticates with the SMTP account id (part of the request
//! path) and the SMTP token (sent as a Bearer credential).

use secrecy::{ExposeSecret, SecretString};
use std::collections::HashMap;

use crate::errors::CloudMailinError;

/// Authentication provider trait.
///
/// Implementations of this trait provide authentication credentials
/// for API requests.
pub trait AuthProvider: Send + Sync {
    /// Apply authentication to request headers.
    fn apply_auth(&self, headers: &mut HashMap<String, String>);

    /// Get the authentication scheme name.
    fn scheme(&self) -> &str;

    /// The account id interpolated into request paths.
    fn account_id(&self) -> &str;

    /// Validate the credentials.
    fn validate(&self) -> Result<(), CloudMailinError>;
}

/// SMTP account credentials.
#[derive(Clone)]
pub struct SmtpCredentials {
    account_id: String,
    token: SecretString,
}

impl SmtpCredentials {
    /// Creates credentials from an account id and a token.
    pub fn new(account_id: impl Into<String>, token: SecretString) -> Self {
        Self {
            account_id: account_id.into(),
            token,
        }
    }

    /// Creates credentials from plain strings.
    pub fn from_strings(account_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new(account_id, SecretString::new(token.into()))
    }

    /// Returns the token (exposing the secret).
    pub(crate) fn token(&self) -> &str {
        self.token.expose_secret()
    }

    /// Returns true when both the account id and the token are present.
    pub fn is_complete(&self) -> bool {
        !self.account_id.is_empty() && !self.token().is_empty()
    }

    /// Gets a hint of the token for debugging (last 4 characters).
    pub fn token_hint(&self) -> String {
        let chars: Vec<char> = self.token.expose_secret().chars().collect();
        if chars.len() > 4 {
            format!("...{}", chars[chars.len() - 4..].iter().collect::<String>())
        } else {
            "****".to_string()
        }
    }
}

impl AuthProvider for SmtpCredentials {
    fn apply_auth(&self, headers: &mut HashMap<String, String>) {
        headers.insert(
            "Authorization".to_string(),
            format!("Bearer {}", self.token()),
        );
    }

    fn scheme(&self) -> &str {
        "Bearer"
    }

    fn account_id(&self) -> &str {
        &self.account_id
    }

    fn validate(&self) -> Result<(), CloudMailinError> {
        if self.is_complete() {
            return Ok(());
        }

        Err(CloudMailinError::configuration(format!(
            "account or token credentials are missing for request ({}, {})",
            self.account_id,
            self.token.expose_secret().len()
        )))
    }
}

impl std::fmt::Debug for SmtpCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpCredentials")
            .field("account_id", &self.account_id)
            .field("token", &"[REDACTED]")
            .field("token_hint", &self.token_hint())
            .finish()
    }
}
