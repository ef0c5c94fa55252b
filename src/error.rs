//! Crate-level error types.
//!
//! [`TronwatchError`] unifies every failure source on the request path
//! (transport/TLS, HTTP status, JSON decoding, response shape) behind a
//! single enum so callers can match on the variant they care about
//! while still using the `?` operator for easy propagation. No
//! operation panics on a remote fault; everything surfaces here.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TronwatchError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum TronwatchError {
    /// The connection or TLS handshake failed, or the request timed out.
    #[error("{0}")]
    Transport(#[from] rquest::Error),

    /// The remote service answered with a non-200 status.
    #[error("HTTP Error: {0}")]
    Status(u16),

    /// The response body was not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A 200 response without the expected top-level `data` collection.
    #[error("Invalid response data")]
    InvalidData,
}
