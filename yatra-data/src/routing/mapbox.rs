//! Mapbox Directions adapter.
//!
//! See: <https://docs.mapbox.com/api/navigation/directions/>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use url::Url;
use yatra_core::{Coordinate, ProviderId, RouteProvider, RouteProviderError, RouteResult};

use super::config::RoutingConfig;
use super::http::{ProviderBuildError, exchange, join_path, parse_base_url};
use super::osrm::DirectionsResponse;

/// Route provider backed by the Mapbox Directions API.
///
/// Requests are refused with [`RouteProviderError::MissingCredential`] when no
/// access token is configured.
#[derive(Clone)]
pub struct MapboxRouteProvider {
    client: Client,
    base_url: Url,
    profile: String,
    token: Option<String>,
    timeout: Duration,
}

impl std::fmt::Debug for MapboxRouteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapboxRouteProvider")
            .field("base_url", &self.base_url.as_str())
            .field("profile", &self.profile)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl MapboxRouteProvider {
    /// Create a provider from the Mapbox portion of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured Mapbox base URL is unusable.
    pub fn new(client: Client, config: &RoutingConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            client,
            base_url: parse_base_url(ProviderId::Mapbox, config)?,
            profile: config.mapbox_profile.clone(),
            token: config.credential(ProviderId::Mapbox).map(str::to_owned),
            timeout: config.timeouts.mapbox,
        })
    }

    /// Build the Directions URL for the pair.
    ///
    /// The URL format is:
    /// `{base_url}/directions/v5/mapbox/{profile}/{lng},{lat};{lng},{lat}`.
    fn build_route_url(&self, origin: Coordinate, destination: Coordinate, token: &str) -> Url {
        let mut url = join_path(
            &self.base_url,
            &format!(
                "directions/v5/mapbox/{}/{},{};{},{}",
                self.profile, origin.lng, origin.lat, destination.lng, destination.lat
            ),
        );
        url.query_pairs_mut()
            .append_pair("geometries", "geojson")
            .append_pair("overview", "full")
            .append_pair("access_token", token);
        url
    }
}

#[async_trait]
impl RouteProvider for MapboxRouteProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Mapbox
    }

    async fn request_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        cancel: &CancellationToken,
    ) -> Result<RouteResult, RouteProviderError> {
        let token = self
            .token
            .as_deref()
            .ok_or(RouteProviderError::MissingCredential {
                provider: ProviderId::Mapbox,
            })?;
        let url = self.build_route_url(origin.normalize(), destination.normalize(), token);
        let request = self.client.get(url.clone());
        let response: DirectionsResponse = exchange(request, &url, self.timeout, cancel).await?;
        response.into_route(ProviderId::Mapbox)
    }
}
