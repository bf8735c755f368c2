//! Command-line interface for resolving walking routes with Yatra.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod logging;
mod route;

pub use error::CliError;
use route::{RouteArgs, run_route};

const ARG_FROM_LAT: &str = "from-lat";
const ARG_FROM_LNG: &str = "from-lng";
const ARG_TO_LAT: &str = "to-lat";
const ARG_TO_LNG: &str = "to-lng";
const ARG_GRAPHHOPPER_KEY: &str = "graphhopper-key";
const ARG_MAPBOX_TOKEN: &str = "mapbox-token";
const ARG_OSRM_PROFILE: &str = "osrm-profile";
const ARG_OSRM_BASE_URL: &str = "osrm-base-url";
const ARG_STRAIGHT_LINE_FALLBACK: &str = "straight-line-fallback";
const ENV_FROM_LAT: &str = "YATRA_CMDS_ROUTE_FROM_LAT";
const ENV_FROM_LNG: &str = "YATRA_CMDS_ROUTE_FROM_LNG";
const ENV_TO_LAT: &str = "YATRA_CMDS_ROUTE_TO_LAT";
const ENV_TO_LNG: &str = "YATRA_CMDS_ROUTE_TO_LNG";

/// Run the Yatra CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, when the
/// provider chain cannot be built, or when no route could be produced.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init_logging();
    match cli.command {
        Command::Route(args) => run_route(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "yatra",
    about = "Resolve walking routes through OSRM, GraphHopper and Mapbox",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve one route and print it as JSON.
    Route(RouteArgs),
}

#[cfg(test)]
mod tests;
