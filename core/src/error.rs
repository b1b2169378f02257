//! Error types for the feed service client.
//!
//! # Design
//! Each failure class of a single request gets its own variant so callers can
//! tell a malformed payload from a refused connection from a rejected call.
//! Non-2xx responses land in `HttpError` with the raw status code, status
//! text and body for diagnostics.
//!
//! `PartialDeletion` is the only multi-request error: it wraps the first
//! failing delete of `destroy_assignment` together with the number of deletes
//! that went through before it.

use thiserror::Error;

/// Errors returned by `ApiClient` operations and `Transport` implementations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request could not be built (malformed URL, invalid header value).
    #[error("invalid request: {0}")]
    RequestError(String),

    /// The request never produced a response: connection refused, DNS
    /// failure, timeout, or the body could not be read.
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The server answered with a non-2xx status.
    #[error("request failed with status: {status} {status_text}")]
    HttpError {
        status: u16,
        status_text: String,
        body: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// Some stream assignments were deleted before one delete failed.
    #[error("deleted {deleted} stream assignment(s) before a delete failed: {source}")]
    PartialDeletion {
        deleted: usize,
        #[source]
        source: Box<ApiError>,
    },
}

impl ApiError {
    /// HTTP status of the failed call, looking through `PartialDeletion`.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            ApiError::PartialDeletion { source, .. } => source.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
