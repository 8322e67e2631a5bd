//! Error types for the users API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status". `Cancelled` is the only variant the component treats silently;
//! every other variant's message ends up verbatim in the error line.

use thiserror::Error;

/// Errors produced while building requests, parsing responses, or executing
/// them on the host.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The server returned 404.
    #[error("Request failed with status code 404")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("Request failed with status code {status}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response (connection refused, DNS, timeout).
    #[error("{0}")]
    Transport(String),

    /// The request was abandoned because its owner went away.
    #[error("canceled")]
    Cancelled,
}

impl ApiError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}
