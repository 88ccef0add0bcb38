//! Header collection for inbound mail.
//!
//! Email headers are prepended as a message travels, so the raw header block
//! reads newest-first from the top. CloudMailin delivers each header's values
//! in that physical order, which means the *last* element of a header is the
//! oldest one (the original `Subject` of a long thread) and the *first* element
//! is the most recently added (the outermost `Received` hop).

use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// All occurrences of a single header, in the order delivered on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IncomingMailHeader(Vec<String>);

impl IncomingMailHeader {
    /// Creates a header from its values.
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    /// The occurrence at the bottom of the header block, i.e. the first value
    /// ever added. Empty when there are no values.
    pub fn first(&self) -> &str {
        self.0.last().map_or("", String::as_str)
    }

    /// The occurrence at the top of the header block, i.e. the most recent
    /// value. Empty when there are no values.
    pub fn last(&self) -> &str {
        self.0.first().map_or("", String::as_str)
    }

    /// All values in wire order.
    pub fn values(&self) -> &[String] {
        &self.0
    }

    /// Number of occurrences.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when the header has no values.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the values in wire order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Consumes the header and returns its values.
    pub fn into_values(self) -> Vec<String> {
        self.0
    }
}

impl From<Vec<String>> for IncomingMailHeader {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}

impl From<&str> for IncomingMailHeader {
    fn from(value: &str) -> Self {
        Self(vec![value.to_string()])
    }
}

impl<const N: usize> From<[&str; N]> for IncomingMailHeader {
    fn from(values: [&str; N]) -> Self {
        Self(values.iter().map(|v| (*v).to_string()).collect())
    }
}

impl<'a> IntoIterator for &'a IncomingMailHeader {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Wire shapes accepted for a header value, tried in declaration order.
#[derive(Deserialize)]
#[serde(untagged)]
enum HeaderWire {
    Single(String),
    Multiple(Vec<String>),
}

impl<'de> Deserialize<'de> for IncomingMailHeader {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match HeaderWire::deserialize(deserializer) {
            Ok(HeaderWire::Single(value)) => Ok(Self(vec![value])),
            Ok(HeaderWire::Multiple(values)) => Ok(Self(values)),
            Err(_) => Err(de::Error::custom(
                "unexpected type for header value: expected a string or an array of strings",
            )),
        }
    }
}

/// The received email headers, keyed by (lower-cased) header name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IncomingMailHeaders(HashMap<String, IncomingMailHeader>);

impl IncomingMailHeaders {
    /// Creates an empty header collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds a header by its exact (case-sensitive) name.
    pub fn find(&self, name: &str) -> Option<&IncomingMailHeader> {
        self.0.get(name)
    }

    /// The first value ever added for a header (bottom-most occurrence).
    pub fn first(&self, name: &str) -> &str {
        self.find(name).map_or("", IncomingMailHeader::first)
    }

    /// The most recent value for a header (top-most occurrence).
    pub fn last(&self, name: &str) -> &str {
        self.find(name).map_or("", IncomingMailHeader::last)
    }

    /// The `to` header.
    pub fn to(&self) -> &str {
        self.first("to")
    }

    /// The `from` header.
    pub fn from(&self) -> &str {
        self.first("from")
    }

    /// The `subject` header.
    pub fn subject(&self) -> &str {
        self.first("subject")
    }

    /// The `message_id` header.
    pub fn message_id(&self) -> &str {
        self.first("message_id")
    }

    /// Inserts (or replaces) a header.
    pub fn insert(&mut self, name: impl Into<String>, header: impl Into<IncomingMailHeader>) {
        self.0.insert(name.into(), header.into());
    }

    /// Iterates over the header names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates over `(name, header)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IncomingMailHeader)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct header names.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no headers are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for IncomingMailHeaders
where
    K: Into<String>,
    V: Into<IncomingMailHeader>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
