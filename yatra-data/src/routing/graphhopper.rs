//! GraphHopper Routing API adapter.
//!
//! See: <https://docs.graphhopper.com/#operation/postRoute>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use url::Url;
use yatra_core::{Coordinate, ProviderId, RouteProvider, RouteProviderError, RouteResult};

use super::config::RoutingConfig;
use super::geometry::LineGeometry;
use super::http::{ProviderBuildError, exchange, join_path, parse_base_url};

/// Request body for `POST /route`.
#[derive(Debug, Serialize)]
struct RouteRequest {
    /// `[lng, lat]` pairs.
    points: [[f64; 2]; 2],
    points_encoded: bool,
}

/// GraphHopper route response.
#[derive(Debug, Deserialize)]
struct RouteResponse {
    #[serde(default)]
    paths: Vec<RoutePath>,
}

#[derive(Debug, Deserialize)]
struct RoutePath {
    points: Option<LineGeometry>,
    /// Metres.
    distance: Option<f64>,
    /// Milliseconds.
    time: Option<f64>,
}

impl RouteResponse {
    fn into_route(self) -> Result<RouteResult, RouteProviderError> {
        let first = self
            .paths
            .into_iter()
            .next()
            .ok_or(RouteProviderError::NoRoute)?;
        let points = first.points.ok_or_else(|| RouteProviderError::ParseError {
            message: "GraphHopper path missing points".to_owned(),
        })?;
        let mut route = RouteResult::new(points.into_path()?, ProviderId::GraphHopper.into())?;
        if let Some(distance) = first.distance {
            route = route.with_distance_m(distance);
        }
        if let Some(time_ms) = first.time {
            route = route.with_duration_s(time_ms / 1_000.0);
        }
        Ok(route)
    }
}

/// Route provider backed by the GraphHopper Routing API.
///
/// Requests are refused with [`RouteProviderError::MissingCredential`] when no
/// API key is configured.
#[derive(Clone)]
pub struct GraphHopperRouteProvider {
    client: Client,
    base_url: Url,
    profile: String,
    key: Option<String>,
    timeout: Duration,
}

impl std::fmt::Debug for GraphHopperRouteProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphHopperRouteProvider")
            .field("base_url", &self.base_url.as_str())
            .field("profile", &self.profile)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GraphHopperRouteProvider {
    /// Create a provider from the GraphHopper portion of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured GraphHopper base URL is unusable.
    pub fn new(client: Client, config: &RoutingConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            client,
            base_url: parse_base_url(ProviderId::GraphHopper, config)?,
            profile: config.graphhopper_profile.clone(),
            key: config.credential(ProviderId::GraphHopper).map(str::to_owned),
            timeout: config.timeouts.graphhopper,
        })
    }

    /// Build the `route` URL: `{base_url}/route?profile={profile}&key={key}`.
    fn build_route_url(&self, key: &str) -> Url {
        let mut url = join_path(&self.base_url, "route");
        url.query_pairs_mut()
            .append_pair("profile", &self.profile)
            .append_pair("key", key);
        url
    }

    fn build_body(origin: Coordinate, destination: Coordinate) -> RouteRequest {
        RouteRequest {
            points: [[origin.lng, origin.lat], [destination.lng, destination.lat]],
            points_encoded: false,
        }
    }
}

#[async_trait]
impl RouteProvider for GraphHopperRouteProvider {
    fn id(&self) -> ProviderId {
        ProviderId::GraphHopper
    }

    async fn request_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        cancel: &CancellationToken,
    ) -> Result<RouteResult, RouteProviderError> {
        let key = self
            .key
            .as_deref()
            .ok_or(RouteProviderError::MissingCredential {
                provider: ProviderId::GraphHopper,
            })?;
        let url = self.build_route_url(key);
        let body = Self::build_body(origin.normalize(), destination.normalize());
        let request = self.client.post(url.clone()).json(&body);
        let response: RouteResponse = exchange(request, &url, self.timeout, cancel).await?;
        response.into_route()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn build_route_url_appends_to_versioned_base() {
        let config = RoutingConfig::default().with_graphhopper_key("gh-key");
        let provider =
            GraphHopperRouteProvider::new(Client::new(), &config).expect("provider should build");

        let url = provider.build_route_url("gh-key");

        assert_eq!(
            url.as_str(),
            "https://graphhopper.com/api/1/route?profile=foot&key=gh-key"
        );
    }

    #[rstest]
    fn body_lists_lng_lat_points_unencoded() {
        let body = GraphHopperRouteProvider::build_body(
            Coordinate::new(23.1828, 75.7689),
            Coordinate::new(23.1769, 75.7889),
        );

        let json = serde_json::to_value(&body).expect("should serialise");

        assert_eq!(
            json,
            serde_json::json!({
                "points": [[75.7689, 23.1828], [75.7889, 23.1769]],
                "points_encoded": false
            })
        );
    }

    #[rstest]
    fn time_is_converted_from_milliseconds() {
        let response: RouteResponse = serde_json::from_str(
            r#"{"paths":[{"distance":812.5,"time":584000,"points":{"type":"LineString","coordinates":[[75.7689,23.1828],[75.7889,23.1769]]}}]}"#,
        )
        .expect("should deserialise");

        let route = response.into_route().expect("should convert");

        assert_eq!(route.duration_s(), Some(584.0));
        assert_eq!(route.distance_m(), Some(812.5));
    }

    #[rstest]
    fn empty_paths_map_to_no_route() {
        let response: RouteResponse =
            serde_json::from_str(r#"{"paths":[]}"#).expect("should deserialise");

        assert_eq!(response.into_route(), Err(RouteProviderError::NoRoute));
    }

    #[rstest]
    fn encoded_points_are_rejected() {
        let response: Result<RouteResponse, _> =
            serde_json::from_str(r#"{"paths":[{"points":"_p~iF~ps|U_ulLnnqC"}]}"#);

        assert!(response.is_err());
    }

    #[rstest]
    fn missing_points_is_a_parse_error() {
        let response: RouteResponse =
            serde_json::from_str(r#"{"paths":[{"distance":1.0}]}"#).expect("should deserialise");

        assert!(matches!(
            response.into_route(),
            Err(RouteProviderError::ParseError { .. })
        ));
    }
}
