//! Error types for the search bridge.
//!
//! Errors are grouped by where they originate: the transport that talks to the
//! search engine, the shape of the engine's response, the caller's request, and
//! the record store used during hydration.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use thiserror::Error;

/// The primary error type for all bridge operations.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Transport failures, propagated as-is
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Engine responses that do not match the expected shape
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// Caller contract violations
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Record store failures during hydration
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    Serialization { message: String },
}

/// Errors raised by a [`SearchTransport`](crate::transport::SearchTransport).
#[derive(Error, Debug)]
pub enum TransportError {
    /// The engine could not be reached.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// The engine answered with a non-success status.
    #[error("{backend_name} returned status {status}: {body}")]
    Status {
        backend_name: String,
        status: u16,
        body: String,
    },

    /// Any other transport-level failure.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Errors related to the engine's response body.
#[derive(Error, Debug)]
pub enum ResponseError {
    /// A required part of the response is missing or has the wrong type.
    #[error("malformed search response: missing or invalid `{path}`")]
    Malformed { path: String },
}

/// Errors caused by invalid caller input, raised before any transport call.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Page size must be at least one.
    #[error("invalid page size: {page_size}")]
    InvalidPageSize { page_size: u64 },

    /// Page numbers start at one.
    #[error("invalid page number: {page}")]
    InvalidPageNumber { page: u64 },
}

/// Errors raised by a [`RecordStore`](crate::store::RecordStore).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The batch fetch failed.
    #[error("failed to fetch {count} records: {message}")]
    FetchFailed {
        count: usize,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Serialization {
            message: err.to_string(),
        }
    }
}

impl ResponseError {
    pub(crate) fn malformed(path: impl Into<String>) -> Self {
        ResponseError::Malformed { path: path.into() }
    }
}
