//! Assemble the ordered fallback chain from configuration.

use std::sync::Arc;

use yatra_core::{ProviderId, RouteProvider};

use super::config::RoutingConfig;
use super::graphhopper::GraphHopperRouteProvider;
use super::http::{ProviderBuildError, build_http_client};
use super::mapbox::MapboxRouteProvider;
use super::osrm::OsrmRouteProvider;

/// Build the providers to try, in order, for `config`.
///
/// Credentialed providers with a configured credential come first in
/// [`RoutingConfig::priority`] order; OSRM is always last. All providers share
/// one HTTP client.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or an enabled
/// provider's base URL is unusable.
///
/// # Examples
///
/// ```
/// use yatra_core::ProviderId;
/// use yatra_data::routing::{RoutingConfig, build_provider_chain};
///
/// let chain = build_provider_chain(&RoutingConfig::default().with_graphhopper_key("gh"))?;
/// let ids: Vec<ProviderId> = chain.iter().map(|provider| provider.id()).collect();
/// assert_eq!(ids, vec![ProviderId::GraphHopper, ProviderId::Osrm]);
/// # Ok::<(), yatra_data::routing::ProviderBuildError>(())
/// ```
pub fn build_provider_chain(
    config: &RoutingConfig,
) -> Result<Vec<Arc<dyn RouteProvider>>, ProviderBuildError> {
    let client = build_http_client(config)?;
    let order = config.provider_order();
    let chain = order
        .iter()
        .map(|&id| -> Result<Arc<dyn RouteProvider>, ProviderBuildError> {
            let provider: Arc<dyn RouteProvider> = match id {
                ProviderId::Osrm => Arc::new(OsrmRouteProvider::new(client.clone(), config)?),
                ProviderId::GraphHopper => {
                    Arc::new(GraphHopperRouteProvider::new(client.clone(), config)?)
                }
                ProviderId::Mapbox => Arc::new(MapboxRouteProvider::new(client.clone(), config)?),
            };
            Ok(provider)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let names: Vec<&str> = order.iter().map(|id| id.as_str()).collect();
    log::info!("route provider chain: {}", names.join(" -> "));
    Ok(chain)
}
