//! OSRM Route service adapter.
//!
//! OSRM is the keyless provider and always closes the fallback chain. The
//! Directions response format defined here is shared with Mapbox, whose API
//! follows the OSRM shape.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use url::Url;
use yatra_core::{Coordinate, ProviderId, RouteProvider, RouteProviderError, RouteResult};

use super::config::RoutingConfig;
use super::geometry::LineGeometry;
use super::http::{ProviderBuildError, exchange, join_path, parse_base_url};

/// OSRM-style Directions response.
///
/// The `code` field indicates the response status.
#[derive(Debug, Deserialize)]
pub(crate) struct DirectionsResponse {
    /// Status code from the service.
    ///
    /// Common values:
    /// - `"Ok"` - Request was successful
    /// - `"NoRoute"` - No route between the points
    /// - `"NoSegment"` - A point could not be snapped to the network
    /// - `"InvalidQuery"` - Invalid query parameters
    pub(crate) code: String,

    /// Optional error message when `code` is not `"Ok"`.
    pub(crate) message: Option<String>,

    /// Candidate routes; only the first is used.
    #[serde(default)]
    pub(crate) routes: Vec<DirectionsRoute>,
}

/// One route of a [`DirectionsResponse`].
#[derive(Debug, Deserialize)]
pub(crate) struct DirectionsRoute {
    pub(crate) geometry: LineGeometry,
    /// Metres.
    pub(crate) distance: Option<f64>,
    /// Seconds.
    pub(crate) duration: Option<f64>,
}

impl DirectionsResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub(crate) fn is_ok(&self) -> bool {
        self.code == "Ok"
    }

    /// Convert the first route into a [`RouteResult`] tagged with `provider`.
    pub(crate) fn into_route(self, provider: ProviderId) -> Result<RouteResult, RouteProviderError> {
        if !self.is_ok() {
            if matches!(self.code.as_str(), "NoRoute" | "NoSegment") {
                return Err(RouteProviderError::NoRoute);
            }
            return Err(RouteProviderError::ServiceError {
                code: self.code,
                message: self.message.unwrap_or_default(),
            });
        }

        let first = self
            .routes
            .into_iter()
            .next()
            .ok_or(RouteProviderError::NoRoute)?;
        let mut route = RouteResult::new(first.geometry.into_path()?, provider.into())?;
        if let Some(distance) = first.distance {
            route = route.with_distance_m(distance);
        }
        if let Some(duration) = first.duration {
            route = route.with_duration_s(duration);
        }
        Ok(route)
    }
}

/// Route provider backed by an OSRM `route/v1` endpoint.
#[derive(Debug, Clone)]
pub struct OsrmRouteProvider {
    client: Client,
    base_url: Url,
    profile: String,
    timeout: Duration,
}

impl OsrmRouteProvider {
    /// Create a provider from the OSRM portion of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured OSRM base URL is unusable.
    pub fn new(client: Client, config: &RoutingConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            client,
            base_url: parse_base_url(ProviderId::Osrm, config)?,
            profile: config.osrm_profile.clone(),
            timeout: config.timeouts.osrm,
        })
    }

    /// Build the Route service URL for the pair.
    ///
    /// The URL format is: `{base_url}/route/v1/{profile}/{lng},{lat};{lng},{lat}`.
    fn build_route_url(&self, origin: Coordinate, destination: Coordinate) -> Url {
        let mut url = join_path(
            &self.base_url,
            &format!(
                "route/v1/{}/{},{};{},{}",
                self.profile, origin.lng, origin.lat, destination.lng, destination.lat
            ),
        );
        url.query_pairs_mut()
            .append_pair("overview", "full")
            .append_pair("geometries", "geojson");
        url
    }
}

#[async_trait]
impl RouteProvider for OsrmRouteProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Osrm
    }

    async fn request_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        cancel: &CancellationToken,
    ) -> Result<RouteResult, RouteProviderError> {
        let url = self.build_route_url(origin.normalize(), destination.normalize());
        let request = self.client.get(url.clone());
        let response: DirectionsResponse = exchange(request, &url, self.timeout, cancel).await?;
        response.into_route(ProviderId::Osrm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use yatra_core::RouteSource;

    #[fixture]
    fn provider() -> OsrmRouteProvider {
        let config = RoutingConfig::default().with_endpoint(ProviderId::Osrm, "http://osrm.example.com/");
        OsrmRouteProvider::new(Client::new(), &config).expect("provider should build")
    }

    #[rstest]
    fn build_route_url_formats_lng_lat_pairs(provider: OsrmRouteProvider) {
        let url = provider.build_route_url(
            Coordinate::new(23.1828, 75.7689),
            Coordinate::new(23.1769, 75.7889),
        );

        assert_eq!(
            url.as_str(),
            "http://osrm.example.com/route/v1/foot/75.7689,23.1828;75.7889,23.1769?overview=full&geometries=geojson"
        );
    }

    #[rstest]
    fn deserialise_success_response() {
        let json = r#"{
            "code": "Ok",
            "routes": [{
                "geometry": {"type": "LineString", "coordinates": [[75.7689, 23.1828], [75.77, 23.18], [75.7889, 23.1769]]},
                "distance": 2150.4,
                "duration": 1620.0
            }],
            "waypoints": []
        }"#;

        let response: DirectionsResponse = serde_json::from_str(json).expect("should deserialise");
        let route = response.into_route(ProviderId::Osrm).expect("should convert");

        assert_eq!(route.path().len(), 3);
        assert_eq!(route.distance_m(), Some(2150.4));
        assert_eq!(route.duration_s(), Some(1620.0));
        assert_eq!(route.source(), RouteSource::Provider(ProviderId::Osrm));
    }

    #[rstest]
    #[case("NoRoute")]
    #[case("NoSegment")]
    fn unroutable_codes_map_to_no_route(#[case] code: &str) {
        let response = DirectionsResponse {
            code: code.to_owned(),
            message: Some("Impossible route between points".to_owned()),
            routes: Vec::new(),
        };

        let err = response.into_route(ProviderId::Osrm).expect_err("should fail");

        assert_eq!(err, RouteProviderError::NoRoute);
    }

    #[rstest]
    fn other_codes_map_to_service_error() {
        let response = DirectionsResponse {
            code: "InvalidQuery".to_owned(),
            message: Some("Query string malformed".to_owned()),
            routes: Vec::new(),
        };

        let err = response.into_route(ProviderId::Osrm).expect_err("should fail");

        assert_eq!(
            err,
            RouteProviderError::ServiceError {
                code: "InvalidQuery".to_owned(),
                message: "Query string malformed".to_owned(),
            }
        );
    }

    #[rstest]
    fn empty_routes_map_to_no_route() {
        let response: DirectionsResponse =
            serde_json::from_str(r#"{"code":"Ok","routes":[]}"#).expect("should deserialise");

        let err = response.into_route(ProviderId::Osrm).expect_err("should fail");

        assert_eq!(err, RouteProviderError::NoRoute);
    }

    #[rstest]
    fn single_point_route_is_invalid() {
        let response: DirectionsResponse = serde_json::from_str(
            r#"{"code":"Ok","routes":[{"geometry":{"coordinates":[[75.0,23.0]]}}]}"#,
        )
        .expect("should deserialise");

        let err = response.into_route(ProviderId::Osrm).expect_err("should fail");

        assert!(matches!(err, RouteProviderError::InvalidRoute(_)));
    }

    #[rstest]
    fn only_the_first_route_is_used() {
        let response: DirectionsResponse = serde_json::from_str(
            r#"{"code":"Ok","routes":[
                {"geometry":{"coordinates":[[1.0,1.0],[2.0,2.0]]},"distance":10.0},
                {"geometry":{"coordinates":[[1.0,1.0],[3.0,3.0],[2.0,2.0]]},"distance":5.0}
            ]}"#,
        )
        .expect("should deserialise");

        let route = response.into_route(ProviderId::Osrm).expect("should convert");

        assert_eq!(route.path().len(), 2);
        assert_eq!(route.distance_m(), Some(10.0));
        assert!(route.duration_s().is_none());
    }
}
