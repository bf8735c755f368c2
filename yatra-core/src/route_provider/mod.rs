//! Fetch routes from external routing services.
//!
//! The `RouteProvider` trait abstracts a single routing service. Adapters
//! report failures through [`RouteProviderError`] internally; the
//! orchestrator only ever sees the collapsed `Option` returned by
//! [`RouteProvider::fetch_route`], so one failing provider never aborts the
//! fallback chain.

mod error;
mod provider;

pub use error::RouteProviderError;
pub use provider::RouteProvider;
