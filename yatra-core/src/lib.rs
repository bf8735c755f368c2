//! Core domain types for the Yatra route resolution engine.
//!
//! These models keep geographic input honest before it reaches any routing
//! service: coordinates are validated and normalised, route results always
//! carry at least two points, and every result records which provider
//! produced it.
//!
//! The [`RouteProvider`] trait is the seam between the engine and the HTTP
//! adapters living in `yatra-data`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod coordinate;
pub mod route;
pub mod route_provider;
pub mod straight_line;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use coordinate::{Coordinate, Normalized, RouteKey};
pub use route::{ProviderId, RouteError, RouteResult, RouteSource};
pub use route_provider::{RouteProvider, RouteProviderError};
pub use straight_line::as_straight_line;

/// Re-exported so adapters and callers share one cancellation token type.
pub use tokio_util::sync::CancellationToken;
