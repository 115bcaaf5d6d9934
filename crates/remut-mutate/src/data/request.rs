use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::Serialize;

use super::options::{Credentials, Headers};

/// HTTP verbs a mutation can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Post,
    Put,
    Patch,
    Delete,
}

impl Verb {
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Patch => "PATCH",
            Verb::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVerbError(pub String);

impl fmt::Display for ParseVerbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported verb `{}` (expected POST, PUT, PATCH or DELETE)", self.0)
    }
}

impl std::error::Error for ParseVerbError {}

impl FromStr for Verb {
    type Err = ParseVerbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "POST" => Ok(Verb::Post),
            "PUT" => Ok(Verb::Put),
            "PATCH" => Ok(Verb::Patch),
            "DELETE" => Ok(Verb::Delete),
            _ => Err(ParseVerbError(s.to_string())),
        }
    }
}

/// A request body or resource identifier: raw text, or a structured value
/// sent as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Json(serde_json::Value),
}

impl Payload {
    /// Convert any serializable value into a JSON payload.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(value).map(Payload::Json)
    }

    pub fn is_structured(&self) -> bool { matches!(self, Payload::Json(_)) }

    /// The `content-type` implied by the payload shape.
    pub fn content_type(payload: Option<&Payload>) -> &'static str {
        match payload {
            Some(Payload::Json(_)) => "application/json",
            _ => "text/plain",
        }
    }

    /// Wire form of the payload: text as-is, structured values as JSON text.
    pub fn to_body(&self) -> String {
        match self {
            Payload::Text(text) => text.clone(),
            Payload::Json(value) => value.to_string(),
        }
    }

    /// Form of the payload when used as a URL segment. JSON strings lose
    /// their quotes so `json!("42")` and `"42"` address the same resource.
    pub fn to_segment(&self) -> String {
        match self {
            Payload::Text(text) => text.clone(),
            Payload::Json(serde_json::Value::String(text)) => text.clone(),
            Payload::Json(value) => value.to_string(),
        }
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self { Payload::Text(text.to_string()) }
}

impl From<String> for Payload {
    fn from(text: String) -> Self { Payload::Text(text) }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self { Payload::Json(value) }
}

/// One call's argument, tagged by what the verb does with it: DELETE
/// appends an identifier to the URL, the other verbs send a body.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Delete { id: Option<Payload> },
    Write { verb: Verb, body: Option<Payload> },
}

impl Invocation {
    pub fn new(verb: Verb, payload: Option<Payload>) -> Self {
        match verb {
            Verb::Delete => Invocation::Delete { id: payload },
            verb => Invocation::Write { verb, body: payload },
        }
    }

    pub fn verb(&self) -> Verb {
        match self {
            Invocation::Delete { .. } => Verb::Delete,
            Invocation::Write { verb, .. } => *verb,
        }
    }

    pub fn payload(&self) -> Option<&Payload> {
        match self {
            Invocation::Delete { id } => id.as_ref(),
            Invocation::Write { body, .. } => body.as_ref(),
        }
    }
}

/// A transport-ready request. Built by [`crate::build_request`] and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: Verb,
    pub url: String,
    pub headers: Headers,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
    pub credentials: Option<Credentials>,
}
