//! Resolver behaviour over the real HTTP adapters and a loopback stub.

mod support;

use rstest::rstest;
use support::{Reply, StubServer};
use yatra_core::{Coordinate, ProviderId, RouteSource};
use yatra_data::routing::{RoutingConfig, build_provider_chain};
use yatra_resolver::{ResolverConfig, RouteResolver};

const DIRECTIONS_OK: &str = r#"{
    "code": "Ok",
    "routes": [{
        "geometry": {"type": "LineString", "coordinates": [[75.7689, 23.1828], [75.7889, 23.1769]]},
        "distance": 2150.0,
        "duration": 1620.0
    }]
}"#;

fn origin() -> Coordinate {
    Coordinate::new(23.1828, 75.7689)
}

fn destination() -> Coordinate {
    Coordinate::new(23.1769, 75.7889)
}

fn keyless_resolver(server: &StubServer) -> RouteResolver {
    let config = RoutingConfig::default().with_endpoint(ProviderId::Osrm, server.base_url());
    let chain = build_provider_chain(&config).expect("chain should build");
    assert_eq!(chain.len(), 1);
    RouteResolver::new(chain, ResolverConfig::default())
}

#[rstest]
#[tokio::test]
async fn keyless_failure_is_cached_for_the_ttl_window() {
    let server = StubServer::start(Reply::status(500, r#"{"message":"down"}"#)).await;
    let resolver = keyless_resolver(&server);

    let first = resolver.resolve_route(origin(), destination(), None).await;
    let second = resolver.resolve_route(origin(), destination(), None).await;

    assert!(first.is_none());
    assert!(second.is_none());
    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].target.starts_with("/route/v1/foot/"));
    assert_eq!(resolver.in_flight_len(), 0);
}

#[rstest]
#[tokio::test]
async fn keyless_success_is_served_from_cache() {
    let server = StubServer::start(Reply::ok(DIRECTIONS_OK)).await;
    let resolver = keyless_resolver(&server);

    let first = resolver
        .resolve_route(origin(), destination(), None)
        .await
        .expect("route should resolve");
    let jittered = Coordinate::new(23.182_800_3, 75.768_899_8);
    let second = resolver
        .resolve_route(jittered, destination(), None)
        .await
        .expect("cached route");

    assert_eq!(first.source(), RouteSource::Provider(ProviderId::Osrm));
    assert_eq!(first, second);
    assert_eq!(server.requests().len(), 1);
}
