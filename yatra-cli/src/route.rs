//! Route command implementation for the Yatra CLI.

use std::io::Write;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use yatra_core::{Coordinate, RouteResult, as_straight_line};
use yatra_data::routing::{RoutingConfig, build_provider_chain};
use yatra_resolver::{ResolverConfig, RouteResolver};

use crate::{
    ARG_FROM_LAT, ARG_FROM_LNG, ARG_GRAPHHOPPER_KEY, ARG_MAPBOX_TOKEN, ARG_OSRM_BASE_URL,
    ARG_OSRM_PROFILE, ARG_STRAIGHT_LINE_FALLBACK, ARG_TO_LAT, ARG_TO_LNG, CliError, ENV_FROM_LAT,
    ENV_FROM_LNG, ENV_TO_LAT, ENV_TO_LNG,
};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Resolve a walking route between two coordinates. Providers \
                 with a configured credential are tried first, then the \
                 public OSRM instance. Credentials can come from CLI flags, \
                 configuration files, or environment variables.",
    about = "Resolve a route between two coordinates",
    allow_negative_numbers = true
)]
#[ortho_config(prefix = "YATRA")]
pub(crate) struct RouteArgs {
    /// Origin latitude in degrees.
    #[arg(value_name = "FROM_LAT")]
    #[serde(default)]
    pub(crate) from_lat: Option<f64>,
    /// Origin longitude in degrees.
    #[arg(value_name = "FROM_LNG")]
    #[serde(default)]
    pub(crate) from_lng: Option<f64>,
    /// Destination latitude in degrees.
    #[arg(value_name = "TO_LAT")]
    #[serde(default)]
    pub(crate) to_lat: Option<f64>,
    /// Destination longitude in degrees.
    #[arg(value_name = "TO_LNG")]
    #[serde(default)]
    pub(crate) to_lng: Option<f64>,
    /// GraphHopper API key; GraphHopper is skipped without one.
    #[arg(long = ARG_GRAPHHOPPER_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) graphhopper_key: Option<String>,
    /// Mapbox access token; Mapbox is skipped without one.
    #[arg(long = ARG_MAPBOX_TOKEN, value_name = "token")]
    #[serde(default)]
    pub(crate) mapbox_token: Option<String>,
    /// OSRM routing profile (default "foot").
    #[arg(long = ARG_OSRM_PROFILE, value_name = "profile")]
    #[serde(default)]
    pub(crate) osrm_profile: Option<String>,
    /// Base URL for the OSRM server (e.g. "http://localhost:5000").
    #[arg(long = ARG_OSRM_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) osrm_base_url: Option<String>,
    /// Print a straight line instead of failing when no route is found.
    #[arg(
        long = ARG_STRAIGHT_LINE_FALLBACK,
        value_name = "bool",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) straight_line_fallback: Option<bool>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteCommandConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteCommandConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteCommandConfig {
    /// Start of the route, as given.
    pub(crate) origin: Coordinate,
    /// End of the route, as given.
    pub(crate) destination: Coordinate,
    /// Provider credentials, profiles and endpoints.
    pub(crate) routing: RoutingConfig,
    /// Whether to print a straight line when every provider fails.
    pub(crate) straight_line_fallback: bool,
}

impl TryFrom<RouteArgs> for RouteCommandConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let origin = Coordinate::new(
            require_coordinate(args.from_lat, ARG_FROM_LAT, ENV_FROM_LAT)?,
            require_coordinate(args.from_lng, ARG_FROM_LNG, ENV_FROM_LNG)?,
        );
        let destination = Coordinate::new(
            require_coordinate(args.to_lat, ARG_TO_LAT, ENV_TO_LAT)?,
            require_coordinate(args.to_lng, ARG_TO_LNG, ENV_TO_LNG)?,
        );

        let mut routing = RoutingConfig::default();
        if let Some(key) = args.graphhopper_key {
            routing = routing.with_graphhopper_key(key);
        }
        if let Some(token) = args.mapbox_token {
            routing = routing.with_mapbox_token(token);
        }
        if let Some(profile) = args.osrm_profile {
            routing = routing.with_osrm_profile(profile);
        }
        if let Some(base_url) = args.osrm_base_url {
            routing = routing.with_endpoint(yatra_core::ProviderId::Osrm, base_url);
        }

        Ok(Self {
            origin,
            destination,
            routing,
            straight_line_fallback: args.straight_line_fallback.unwrap_or(false),
        })
    }
}

fn require_coordinate(
    value: Option<f64>,
    field: &'static str,
    env: &'static str,
) -> Result<f64, CliError> {
    let given = value.ok_or(CliError::MissingArgument { field, env })?;
    if given.is_finite() {
        Ok(given)
    } else {
        Err(CliError::InvalidCoordinate {
            field,
            value: given,
        })
    }
}

/// Builds the resolver for the current route invocation.
pub(super) trait RouteResolverBuilder {
    fn build(&self, config: &RouteCommandConfig) -> Result<RouteResolver, CliError>;
}

pub(super) struct DefaultRouteResolverBuilder;

impl RouteResolverBuilder for DefaultRouteResolverBuilder {
    fn build(&self, config: &RouteCommandConfig) -> Result<RouteResolver, CliError> {
        let chain = build_provider_chain(&config.routing)?;
        Ok(RouteResolver::new(chain, ResolverConfig::default()))
    }
}

pub(super) fn run_route(args: RouteArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    let mut stdout = std::io::stdout().lock();
    run_route_with(&config, &DefaultRouteResolverBuilder, &mut stdout)
}

pub(super) fn run_route_with(
    config: &RouteCommandConfig,
    builder: &dyn RouteResolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let route = execute_route(config, builder)?;
    write_route(writer, &route)
}

fn execute_route(
    config: &RouteCommandConfig,
    builder: &dyn RouteResolverBuilder,
) -> Result<RouteResult, CliError> {
    let resolver = builder.build(config)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let resolved =
        runtime.block_on(resolver.resolve_route(config.origin, config.destination, None));
    match resolved {
        Some(route) => Ok(RouteResult::clone(&route)),
        None if config.straight_line_fallback => {
            log::warn!("no provider returned a route; drawing a straight line");
            Ok(as_straight_line(config.origin, config.destination))
        }
        None => Err(CliError::NoRoute),
    }
}

fn write_route(writer: &mut dyn Write, route: &RouteResult) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(route).map_err(CliError::SerialiseRoute)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteRouteOutput)?;
    writer
        .write_all(b"\n")
        .map_err(CliError::WriteRouteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteCommandConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteCommandConfig::try_from(merged)
}
