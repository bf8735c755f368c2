//! HTTP route providers for external routing services.
//!
//! This module provides one [`yatra_core::RouteProvider`] implementation per
//! service ([`OsrmRouteProvider`], [`GraphHopperRouteProvider`],
//! [`MapboxRouteProvider`]) and [`build_provider_chain`], which turns a
//! [`RoutingConfig`] into the ordered list the resolver walks.
//!
//! # Architecture
//!
//! Each adapter normalises its inputs, checks its credential, then runs a
//! single request through a shared exchange that races the provider's time
//! budget against the caller's cancellation token. Only the first returned
//! path is parsed. Request URLs are redacted before they appear in any error,
//! so API keys and access tokens never reach logs.
//!
//! # Example
//!
//! ```no_run
//! use yatra_core::{CancellationToken, Coordinate};
//! use yatra_data::routing::{RoutingConfig, build_provider_chain};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RoutingConfig::default().with_mapbox_token("pk.example");
//! let chain = build_provider_chain(&config)?;
//! let token = CancellationToken::new();
//!
//! for provider in &chain {
//!     let route = provider
//!         .fetch_route(Coordinate::new(23.1828, 75.7689), Coordinate::new(23.1769, 75.7889), &token)
//!         .await;
//!     if let Some(route) = route {
//!         println!("{} points from {}", route.path().len(), route.source());
//!         break;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod chain;
mod config;
mod geometry;
mod graphhopper;
mod http;
mod mapbox;
mod osrm;

pub use chain::build_provider_chain;
pub use config::{
    DEFAULT_GRAPHHOPPER_BASE_URL, DEFAULT_MAPBOX_BASE_URL, DEFAULT_OSRM_BASE_URL,
    DEFAULT_USER_AGENT, ProviderEndpoints, ProviderTimeouts, RoutingConfig,
};
pub use graphhopper::GraphHopperRouteProvider;
pub use http::{ProviderBuildError, build_http_client};
pub use mapbox::MapboxRouteProvider;
pub use osrm::OsrmRouteProvider;
