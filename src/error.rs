//! Failure taxonomy for the dispatch core.
//!
//! Every failed attempt produces exactly one [`Error`] variant, delivered
//! through the completion and to plugins. Nothing panics across the
//! provider boundary and nothing is silently dropped.

use crate::response::Response;
use crate::transport::TransportError;
use thiserror::Error;

/// The outcome of one request attempt, produced exactly once.
pub type RequestResult = Result<Response, Error>;

/// Why an [`Endpoint`](crate::endpoint::Endpoint) could not be turned into
/// a transport request.
#[derive(Debug, Error)]
pub enum RequestBuildError {
    /// Parameter serialization failed.
    #[error("parameter serialization failed")]
    Serialization(#[from] serde_json::Error),

    /// The resolved URL is not something the transport can dial.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),

    /// A custom request-building collaborator failed.
    #[error("{0}")]
    Other(String),
}

/// Terminal failure for one request attempt.
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint could not be converted into a transport request.
    #[error("failed to build the transport request")]
    BuildingRequest(#[from] RequestBuildError),

    /// The response body could not be decoded into the expected type.
    #[error("failed to decode the response body")]
    ResponseFailed(#[source] serde_json::Error),

    /// The backend answered with a status outside the success range.
    #[error("backend returned unexpected status {0}")]
    UnexpectedBackend(u16),

    /// The caller abandoned the request before a result was committed.
    #[error("request aborted before completion")]
    Aborted,

    /// The request was cancelled through its token.
    ///
    /// Canonical cancellation variant for both the real and the stubbed
    /// dispatch path; transport-reported cancellations are normalized to it.
    #[error("request cancelled")]
    Cancelled,

    /// The transport reported a lower-level failure.
    #[error("transport failure")]
    Underlying(#[from] TransportError),
}

impl Error {
    /// Whether this failure is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}
