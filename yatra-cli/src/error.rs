//! Error types emitted by the Yatra CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use thiserror::Error;
use yatra_data::routing::ProviderBuildError;

/// Errors emitted by the Yatra CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set {field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A coordinate value is not a finite number.
    #[error("{field} must be a finite number, got {value}")]
    InvalidCoordinate { field: &'static str, value: f64 },
    /// Building the provider chain failed.
    #[error("failed to build route providers: {0}")]
    BuildProviders(#[from] ProviderBuildError),
    /// The async runtime could not start.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Every provider failed and no fallback was requested.
    #[error("no route found (pass --straight-line-fallback to draw a straight line)")]
    NoRoute,
    /// Serialising the route failed.
    #[error("failed to serialise route: {0}")]
    SerialiseRoute(#[source] serde_json::Error),
    /// Writing the route output failed.
    #[error("failed to write route output: {0}")]
    WriteRouteOutput(#[source] std::io::Error),
}
