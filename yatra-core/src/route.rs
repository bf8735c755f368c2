//! Route results and their provenance.
//!
//! A [`RouteResult`] is the common shape every provider response is parsed
//! into. It is immutable once built and always holds at least two points.

use std::fmt;

use geo::{Coord, LineString};
use thiserror::Error;

use crate::Coordinate;

/// Identity of an external routing service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ProviderId {
    /// OSRM-compatible router; needs no credential.
    Osrm,
    /// GraphHopper-compatible router; needs an API key.
    GraphHopper,
    /// Mapbox Directions; needs an access token.
    Mapbox,
}

impl ProviderId {
    /// Every known provider.
    pub const ALL: [Self; 3] = [Self::Osrm, Self::GraphHopper, Self::Mapbox];

    /// Stable lowercase tag used in logs and serialised results.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Osrm => "osrm",
            Self::GraphHopper => "graphhopper",
            Self::Mapbox => "mapbox",
        }
    }

    /// Return `true` when the provider cannot be called without a credential.
    #[must_use]
    pub const fn requires_credential(self) -> bool {
        !matches!(self, Self::Osrm)
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a [`RouteResult`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteSource {
    /// Produced by an external routing service.
    Provider(ProviderId),
    /// Synthesised locally by [`crate::as_straight_line`].
    StraightLine,
}

impl RouteSource {
    /// Tag reserved for the synthetic straight-line fallback.
    pub const STRAIGHT_LINE_TAG: &'static str = "straight_line";

    /// Stable lowercase tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Provider(id) => id.as_str(),
            Self::StraightLine => Self::STRAIGHT_LINE_TAG,
        }
    }
}

impl fmt::Display for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ProviderId> for RouteSource {
    fn from(value: ProviderId) -> Self {
        Self::Provider(value)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for RouteSource {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Errors returned by [`RouteResult::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// A route needs a start and an end.
    #[error("route must contain at least two points, found {points}")]
    TooFewPoints {
        /// Number of points supplied.
        points: usize,
    },
    /// A point had a non-finite latitude or longitude.
    #[error("route point {index} is not a finite coordinate")]
    NonFinitePoint {
        /// Position of the offending point in the path.
        index: usize,
    },
}

/// A path between two coordinates with optional metrics.
///
/// # Examples
/// ```
/// use yatra_core::{Coordinate, ProviderId, RouteResult};
///
/// # fn main() -> Result<(), yatra_core::RouteError> {
/// let route = RouteResult::new(
///     vec![Coordinate::new(23.1828, 75.7689), Coordinate::new(23.1769, 75.7889)],
///     ProviderId::Osrm.into(),
/// )?
/// .with_distance_m(2150.0)
/// .with_duration_s(1620.0);
///
/// assert_eq!(route.path().len(), 2);
/// assert_eq!(route.source().as_str(), "osrm");
/// assert_eq!(route.distance_m(), Some(2150.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RouteResult {
    path: Vec<Coordinate>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    distance_m: Option<f64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    duration_s: Option<f64>,
    source: RouteSource,
}

impl RouteResult {
    /// Validate and construct a route without metrics.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::TooFewPoints`] for paths shorter than two points
    /// and [`RouteError::NonFinitePoint`] when any point is not finite.
    pub fn new(path: Vec<Coordinate>, source: RouteSource) -> Result<Self, RouteError> {
        if path.len() < 2 {
            return Err(RouteError::TooFewPoints { points: path.len() });
        }
        if let Some(index) = path.iter().position(|point| !point.is_valid()) {
            return Err(RouteError::NonFinitePoint { index });
        }
        Ok(Self {
            path,
            distance_m: None,
            duration_s: None,
            source,
        })
    }

    /// Two-point route between already-normalised endpoints.
    pub(crate) fn between(origin: Coordinate, destination: Coordinate, source: RouteSource) -> Self {
        Self {
            path: vec![origin, destination],
            distance_m: None,
            duration_s: None,
            source,
        }
    }

    /// Attach a total distance in metres.
    ///
    /// Negative or non-finite values are discarded.
    #[must_use]
    pub fn with_distance_m(mut self, distance_m: f64) -> Self {
        self.distance_m = Some(distance_m).filter(|v| v.is_finite() && *v >= 0.0);
        self
    }

    /// Attach a total duration in seconds.
    ///
    /// Negative or non-finite values are discarded.
    #[must_use]
    pub fn with_duration_s(mut self, duration_s: f64) -> Self {
        self.duration_s = Some(duration_s).filter(|v| v.is_finite() && *v >= 0.0);
        self
    }

    /// Ordered points from origin to destination.
    #[must_use]
    pub fn path(&self) -> &[Coordinate] {
        &self.path
    }

    /// Total distance in metres, when the provider reported one.
    #[must_use]
    pub const fn distance_m(&self) -> Option<f64> {
        self.distance_m
    }

    /// Total duration in seconds, when the provider reported one.
    #[must_use]
    pub const fn duration_s(&self) -> Option<f64> {
        self.duration_s
    }

    /// Provenance of this route.
    #[must_use]
    pub const fn source(&self) -> RouteSource {
        self.source
    }

    /// The path as a `geo` line string (`x = lng`, `y = lat`).
    #[must_use]
    pub fn to_line_string(&self) -> LineString<f64> {
        self.path.iter().copied().map(Coord::from).collect()
    }
}
