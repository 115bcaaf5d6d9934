//! Error types for remut-mutate.

use thiserror::Error;

use crate::data::Response;

/// Boxed error used at the seams where callers plug in their own code
/// (transports and options providers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a non-2xx status. The raw response is kept so
    /// callers can inspect status, headers and body.
    #[error("Failed to fetch: {} {}", .0.status, .0.status_text)]
    Status(Box<Response>),

    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    #[error("request options provider failed: {0}")]
    Options(#[source] BoxError),

    #[error("failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// The raw response of an unsuccessful mutation, if that is what failed.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Status(response) => Some(response),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> { self.response().map(|r| r.status) }
}
