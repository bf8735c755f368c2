//! GeoJSON line geometry as returned by all three services.

use serde::Deserialize;
use yatra_core::{Coordinate, RouteProviderError};

/// A GeoJSON `LineString` geometry.
///
/// Positions are `[lng, lat]` with optional trailing elevation values.
#[derive(Debug, Deserialize)]
pub(crate) struct LineGeometry {
    pub(crate) coordinates: Vec<Vec<f64>>,
}

impl LineGeometry {
    /// Convert positions into coordinates, rejecting truncated positions.
    pub(crate) fn into_path(self) -> Result<Vec<Coordinate>, RouteProviderError> {
        self.coordinates
            .into_iter()
            .enumerate()
            .map(|(index, position)| match position.as_slice() {
                [lng, lat, ..] => Ok(Coordinate::new(*lat, *lng)),
                _ => Err(RouteProviderError::ParseError {
                    message: format!("position {index} has fewer than two values"),
                }),
            })
            .collect()
    }
}
