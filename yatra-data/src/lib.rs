//! Data access adapters for the Yatra route resolution engine.
//!
//! Responsibilities:
//! - Translate origin/destination pairs into provider-specific HTTP requests.
//! - Decode provider payloads into [`yatra_core::RouteResult`] values.
//! - Assemble the credential-aware provider chain from configuration.
//!
//! Boundaries:
//! - Do not encode resolution policy (caching, deduplication and fallback
//!   live in `yatra-resolver`).
//! - Never log or surface credentials.
//!
//! Invariants:
//! - Every request is bounded by its provider's timeout and the caller's
//!   cancellation token.
//! - No global mutable state.

#![forbid(unsafe_code)]

pub mod routing;
