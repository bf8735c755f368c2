//! Behavioural tests for the straight-line fallback.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use yatra_core::{Coordinate, RouteResult, RouteSource, as_straight_line};

/// World state shared by the straight-line scenarios.
#[derive(Debug, Default)]
struct StraightLineWorld {
    endpoints: RefCell<Option<(Coordinate, Coordinate)>>,
    route: RefCell<Option<RouteResult>>,
}

#[fixture]
fn world() -> StraightLineWorld {
    StraightLineWorld::default()
}

fn route_of(world: &StraightLineWorld) -> RouteResult {
    world
        .route
        .borrow()
        .clone()
        .expect("route should be recorded")
}

#[given("an origin and destination inside valid ranges")]
fn given_in_range(world: &StraightLineWorld) {
    world.endpoints.replace(Some((
        Coordinate::new(23.1828, 75.7689),
        Coordinate::new(23.1769, 75.7889),
    )));
}

#[given("an origin north of the pole and a destination past the antimeridian")]
fn given_out_of_range(world: &StraightLineWorld) {
    world.endpoints.replace(Some((
        Coordinate::new(95.0, 75.7689),
        Coordinate::new(23.1769, 181.0),
    )));
}

#[when("I request a straight-line fallback")]
fn when_fallback(world: &StraightLineWorld) {
    let (origin, destination) = world
        .endpoints
        .borrow()
        .expect("endpoints should be set");
    world
        .route
        .replace(Some(as_straight_line(origin, destination)));
}

#[then("the route has exactly two points")]
fn then_two_points(world: &StraightLineWorld) {
    assert_eq!(route_of(world).path().len(), 2);
}

#[then("the route joins the origin to the destination unchanged")]
fn then_unchanged(world: &StraightLineWorld) {
    let (origin, destination) = world
        .endpoints
        .borrow()
        .expect("endpoints should be set");
    assert_eq!(route_of(world).path(), &[origin, destination]);
}

#[then("the route endpoints are clamped into range")]
fn then_clamped(world: &StraightLineWorld) {
    assert_eq!(
        route_of(world).path(),
        &[
            Coordinate::new(90.0, 75.7689),
            Coordinate::new(23.1769, 180.0)
        ]
    );
}

#[then("the route is tagged as a straight line")]
fn then_tagged(world: &StraightLineWorld) {
    let route = route_of(world);
    assert_eq!(route.source(), RouteSource::StraightLine);
    assert_eq!(route.source().as_str(), "straight_line");
}

#[then("the route has no distance or duration")]
fn then_no_metrics(world: &StraightLineWorld) {
    let route = route_of(world);
    assert!(route.distance_m().is_none());
    assert!(route.duration_s().is_none());
}

#[scenario(path = "tests/features/straight_line.feature", index = 0)]
fn fallback_between_waypoints(world: StraightLineWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/straight_line.feature", index = 1)]
fn fallback_clamps_endpoints(world: StraightLineWorld) {
    let _ = world;
}
