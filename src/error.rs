// src/error.rs
//! Error types for table fetching.
//!
//! Three kinds of failure reach a caller: programmer errors (fail fast),
//! transport errors (retried when transient) and service errors (reported
//! as-is). Lookup misses during enrichment never become errors.

use std::error::Error as StdError;
use std::io;
use thiserror::Error;

/// Main error type of the crate.
#[derive(Error, Debug)]
pub enum TestRailError {
    #[error("offset is managed by the paginated fetcher and must not be supplied")]
    ManagedOffset,

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error("Connection failure: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("HTTP failure: {0}")]
    Http(#[source] reqwest::Error),

    #[error("TestRail API returned {status} for {url}: {message}")]
    Service {
        status: reqwest::StatusCode,
        message: String,
        url: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("{entity} record has no usable '{field}' field")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },
}

impl TestRailError {
    /// Whether this error is a connection-level hiccup worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Whether a transport error means the connection itself failed: refused,
/// timed out, or dropped by the server before a full response arrived.
///
/// A pooled keep-alive connection closed by the server surfaces as a
/// request or body error, so the source chain is searched as well.
pub(crate) fn is_connection_failure(err: &reqwest::Error) -> bool {
    if err.is_connect() || err.is_timeout() {
        return true;
    }
    if !(err.is_request() || err.is_body()) {
        return false;
    }

    let mut source = err.source();
    while let Some(cause) = source {
        if let Some(hyper_err) = cause.downcast_ref::<hyper::Error>() {
            if hyper_err.is_incomplete_message() || hyper_err.is_closed() {
                return true;
            }
        }
        if let Some(io_err) = cause.downcast_ref::<io::Error>() {
            if matches!(
                io_err.kind(),
                io::ErrorKind::ConnectionReset
                    | io::ErrorKind::ConnectionAborted
                    | io::ErrorKind::BrokenPipe
                    | io::ErrorKind::UnexpectedEof
            ) {
                return true;
            }
        }
        source = cause.source();
    }
    false
}

impl From<reqwest::Error> for TestRailError {
    fn from(err: reqwest::Error) -> Self {
        if is_connection_failure(&err) {
            TestRailError::Connection(err)
        } else {
            TestRailError::Http(err)
        }
    }
}

impl From<serde_json::Error> for TestRailError {
    fn from(err: serde_json::Error) -> Self {
        TestRailError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = TestRailError> = std::result::Result<T, E>;
