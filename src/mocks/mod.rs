//! Test doubles for the transport and auth seams.
//!
//! `MockTransport` replays a script of canned responses (or failures) and
//! keeps every request it was handed, so services can be driven without a
//! network.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::auth::AuthProvider;
use crate::errors::CloudMailinError;
use crate::services::SEND_SUCCESS_STATUS;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path relative to the base URL.
    pub path: String,
    /// Header name/value pairs.
    pub headers: HashMap<String, String>,
    /// Raw body.
    pub body: Option<Vec<u8>>,
}

impl RecordedRequest {
    /// Looks up a header value by exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Decodes the body as JSON, `Value::Null` when absent or malformed.
    pub fn json_body(&self) -> Value {
        self.body
            .as_deref()
            .and_then(|body| serde_json::from_slice(body).ok())
            .unwrap_or(Value::Null)
    }
}

/// A canned reply.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// Status code.
    pub status: u16,
    /// Header name/value pairs.
    pub headers: HashMap<String, String>,
    /// Raw body.
    pub body: Vec<u8>,
}

impl MockResponse {
    /// A JSON reply with the given status.
    pub fn json(status: u16, value: &Value) -> Self {
        Self {
            status,
            headers: HashMap::from([("content-type".to_string(), "application/json".to_string())]),
            body: value.to_string().into_bytes(),
        }
    }

    /// The reply the API gives when it accepts a message.
    pub fn accepted(value: &Value) -> Self {
        Self::json(SEND_SUCCESS_STATUS, value)
    }

    /// A plain text reply with the given status.
    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            headers: HashMap::from([("content-type".to_string(), "text/plain".to_string())]),
            body: body.as_bytes().to_vec(),
        }
    }

    /// Adds a response header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

#[derive(Default)]
struct Script {
    steps: VecDeque<Result<MockResponse, String>>,
    fallback: Option<MockResponse>,
    recorded: Vec<RecordedRequest>,
}

/// Scripted in-memory transport.
///
/// Each call consumes the next scripted step. Once the script is exhausted
/// the fallback reply is used, or a 500 if none was set.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<Script>,
}

impl MockTransport {
    /// Creates a transport with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends a reply to the script.
    pub fn queue(&self, response: MockResponse) {
        self.script().steps.push_back(Ok(response));
    }

    /// Appends a connection failure to the script.
    pub fn fail_next(&self, message: &str) {
        self.script().steps.push_back(Err(message.to_string()));
    }

    /// Reply used once the script runs out.
    pub fn set_default(&self, response: MockResponse) {
        self.script().fallback = Some(response);
    }

    /// Every request seen so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.script().recorded.clone()
    }

    /// The most recent request.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.script().recorded.last().cloned()
    }

    /// How many requests were made.
    pub fn request_count(&self) -> usize {
        self.script().recorded.len()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut script = self.script();
        script.recorded.push(RecordedRequest {
            method: request.method,
            path: request.path,
            headers: request.headers,
            body: request.body,
        });

        let step = match script.steps.pop_front() {
            Some(step) => step,
            None => Ok(script
                .fallback
                .clone()
                .unwrap_or_else(|| MockResponse::text(500, "no scripted response"))),
        };

        let reply = step.map_err(|message| TransportError::Connection { message })?;
        Ok(HttpResponse {
            status: reply.status,
            headers: reply.headers,
            body: reply.body,
        })
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let script = self.script();
        f.debug_struct("MockTransport")
            .field("pending", &script.steps.len())
            .field("recorded", &script.recorded.len())
            .finish()
    }
}

/// Auth provider with fixed values that always validates.
#[derive(Debug, Clone)]
pub struct MockAuth {
    account_id: String,
    token: String,
}

impl MockAuth {
    /// Creates a provider for `account_id` presenting `token`.
    pub fn new(account_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            token: token.into(),
        }
    }
}

impl AuthProvider for MockAuth {
    fn apply_auth(&self, headers: &mut HashMap<String, String>) {
        headers.insert("Authorization".to_string(), format!("Bearer {}", self.token));
    }

    fn scheme(&self) -> &str {
        "Bearer"
    }

    fn account_id(&self) -> &str {
        &self.account_id
    }

    fn validate(&self) -> Result<(), CloudMailinError> {
        Ok(())
    }
}

/// Canned payloads shared by unit tests.
pub mod fixtures {
    use serde_json::{json, Value};

    /// A 1x1 PNG, base64 encoded.
    pub const PIXEL_PNG_BASE64: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP0rdr1HwAFHwKCk87e6gAAAABJRU5ErkJggg==";

    /// A minimal inbound webhook payload.
    pub fn incoming_payload() -> Value {
        json!({
            "envelope": {
                "to": "postman@cloudmailin.net",
                "from": "from+test@cloudmailin.net",
                "recipients": ["postman@cloudmailin.net"],
                "helo_domain": "cloudmailin.net",
                "remote_ip": "172.20.0.18",
                "tls": true,
                "tls_cipher": "TLSv1.3",
                "spf": {"result": "pass", "domain": "cloudmailin.net"}
            },
            "headers": {
                "to": "postman@cloudmailin.net",
                "from": "Steve Smith <test@example.com>",
                "subject": "Test Email",
                "received": ["by mx2.example.net", "by mx1.example.net"]
            },
            "plain": "Test Content\n",
            "html": "<div>Test Content</div>\n",
            "reply_plain": "Test Content\n",
            "attachments": []
        })
    }

    /// The body the API returns after accepting `sent`: the same message with
    /// an id and an extra tag.
    pub fn accepted_message(sent: &Value, id: &str) -> Value {
        let mut accepted = sent.clone();
        accepted["id"] = json!(id);

        let mut tags: Vec<Value> = sent["tags"].as_array().cloned().unwrap_or_default();
        tags.push(json!("api"));
        accepted["tags"] = Value::Array(tags);
        accepted
    }
}
