//! Error types for the model and its sync adapter.
//!
//! # Design
//! `ModelError` covers caller mistakes detected before any I/O happens.
//! `SyncError` covers everything that can go wrong on the remote side.
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-2xx responses land in `HttpError` with the raw
//! status code and body for debugging.

use thiserror::Error;

/// Precondition failures raised synchronously by `Model`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// `fetch` was called while the `id` attribute was absent or not a
    /// number.
    #[error("cannot fetch without a numeric id")]
    InvalidId,

    /// The `id` attribute is a number, but not an integer that fits in an
    /// `i64` (e.g. `7.5` or `1e300`). Resource ids are addressed as integers.
    #[error("id {0} is not an integer in the i64 range")]
    IdOutOfRange(serde_json::Number),
}

/// Failures reported by a `RemoteSync` implementation.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The server returned 404 — the requested record does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-success status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("transport failed: {0}")]
    Transport(String),
}
