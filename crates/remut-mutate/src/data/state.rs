use std::borrow::Cow;

use bytes::Bytes;
use http::HeaderMap;
use http::header::{HeaderName, HeaderValue};
use serde::de::DeserializeOwned;

/// A completed transport response with its body fully read.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    /// Reason phrase as sent by the server.
    pub status_text: String,
    /// Response headers exactly as received, repeated names included.
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, status_text: impl Into<String>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// `true` for 2xx statuses.
    pub fn is_ok(&self) -> bool { (200..300).contains(&self.status) }

    pub fn text(&self) -> Cow<'_, str> { String::from_utf8_lossy(&self.body) }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Published description of an unsuccessful response.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorState {
    /// Response body parsed as JSON. Bodies that are not JSON are kept as a
    /// string value; an empty body becomes `null`.
    pub data: serde_json::Value,
    pub message: String,
}

impl ErrorState {
    pub fn from_response(response: &Response) -> Self {
        let data = match response.json::<serde_json::Value>() {
            Ok(data) => data,
            Err(_) if response.body.is_empty() => serde_json::Value::Null,
            Err(_) => serde_json::Value::String(response.text().into_owned()),
        };
        Self {
            data,
            message: format!("Failed to fetch: {} {}", response.status, response.status_text),
        }
    }
}

/// Lifecycle state of one mutation slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MutationState {
    pub loading: bool,
    pub error: Option<ErrorState>,
    pub response: Option<Response>,
}

/// The `{loading, error}` half of the state handed to observers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct States {
    pub loading: bool,
    pub error: Option<ErrorState>,
}

/// Derived metadata, recomputed on every query.
#[derive(Debug, Clone, PartialEq)]
pub struct Meta {
    pub response: Option<Response>,
    /// URL the next invocation will target, before any DELETE identifier.
    pub absolute_path: String,
}
