use thiserror::Error;

use crate::{ProviderId, RouteError};

/// Errors from [`crate::RouteProvider::request_route`].
///
/// URLs carried by these variants are redacted to scheme, host and path so
/// that credentials passed as query parameters never reach logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RouteProviderError {
    /// The provider needs a credential and none is configured.
    #[error("{provider} has no credential configured")]
    MissingCredential {
        /// Provider that was skipped.
        provider: ProviderId,
    },
    /// The caller cancelled the request.
    #[error("request cancelled by caller")]
    Cancelled,
    /// The provider did not answer within its time budget.
    #[error("request to {url} timed out after {timeout_ms} ms")]
    Timeout {
        /// Redacted request URL.
        url: String,
        /// Time budget that elapsed.
        timeout_ms: u64,
    },
    /// The provider answered with a non-success HTTP status.
    #[error("request to {url} failed with status {status}: {message}")]
    HttpError {
        /// Redacted request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The request failed before a response arrived.
    #[error("network error contacting {url}: {message}")]
    NetworkError {
        /// Redacted request URL.
        url: String,
        /// Error description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Error description.
        message: String,
    },
    /// The provider reported a service-level error code.
    #[error("routing service returned {code}: {message}")]
    ServiceError {
        /// Provider-specific status code.
        code: String,
        /// Optional explanation from the provider.
        message: String,
    },
    /// The response contained no path.
    #[error("routing service returned no route")]
    NoRoute,
    /// The first path could not form a valid route.
    #[error("routing service returned an unusable path: {0}")]
    InvalidRoute(#[from] RouteError),
}
