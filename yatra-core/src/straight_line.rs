//! Network-free fallback route.
//!
//! Callers reach for this when every provider failed and the map must show
//! something. It is never substituted for a missing route automatically.

use crate::{Coordinate, RouteResult, RouteSource};

/// Build a two-point route directly from `origin` to `destination`.
///
/// Both endpoints are normalised first. The result has no distance or
/// duration and is tagged [`RouteSource::StraightLine`].
///
/// # Examples
/// ```
/// use yatra_core::{as_straight_line, Coordinate, RouteSource};
///
/// let route = as_straight_line(
///     Coordinate::new(23.1828, 75.7689),
///     Coordinate::new(23.1769, 75.7889),
/// );
/// assert_eq!(route.path().len(), 2);
/// assert_eq!(route.source(), RouteSource::StraightLine);
/// assert!(route.distance_m().is_none());
/// ```
#[must_use]
pub fn as_straight_line(origin: Coordinate, destination: Coordinate) -> RouteResult {
    RouteResult::between(
        origin.normalize(),
        destination.normalize(),
        RouteSource::StraightLine,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn keeps_in_range_endpoints_unchanged() {
        let origin = Coordinate::new(23.1828, 75.7689);
        let destination = Coordinate::new(23.1769, 75.7889);
        let route = as_straight_line(origin, destination);
        assert_eq!(route.path(), &[origin, destination]);
        assert!(route.duration_s().is_none());
    }

    #[rstest]
    fn normalises_endpoints() {
        let route = as_straight_line(
            Coordinate::new(120.0, f64::NAN),
            Coordinate::new(-91.0, 540.0),
        );
        assert_eq!(
            route.path(),
            &[Coordinate::new(90.0, 0.0), Coordinate::new(-90.0, 180.0)]
        );
    }

    #[rstest]
    fn identical_endpoints_still_yield_two_points() {
        let point = Coordinate::new(10.0, 10.0);
        let route = as_straight_line(point, point);
        assert_eq!(route.path().len(), 2);
    }
}
