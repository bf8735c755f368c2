//! Facade crate for the Yatra route resolution engine.
//!
//! This crate re-exports the core domain types and exposes the HTTP provider
//! adapters and the caching resolver behind feature flags.

#![forbid(unsafe_code)]

pub use yatra_core::{
    CancellationToken, Coordinate, Normalized, ProviderId, RouteError, RouteKey, RouteProvider,
    RouteProviderError, RouteResult, RouteSource, as_straight_line,
};

#[cfg(feature = "test-support")]
pub use yatra_core::test_support;

#[cfg(feature = "http")]
pub use yatra_data::routing::{
    GraphHopperRouteProvider, MapboxRouteProvider, OsrmRouteProvider, ProviderBuildError,
    ProviderEndpoints, ProviderTimeouts, RoutingConfig, build_provider_chain,
};

#[cfg(feature = "resolver")]
pub use yatra_resolver::{DEFAULT_CACHE_TTL, ResolverConfig, RouteResolver};
