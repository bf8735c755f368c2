//! Route provider trait.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{Coordinate, ProviderId, RouteResult};

use super::error::RouteProviderError;

/// Fetch a path between two coordinates from one routing service.
///
/// Implementers normalise both coordinates, check their credential before any
/// network activity, apply their own timeout and stop early when `cancel`
/// fires. A successful result is tagged with [`RouteProvider::id`].
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use yatra_core::{
///     CancellationToken, Coordinate, ProviderId, RouteProvider, RouteProviderError, RouteResult,
/// };
///
/// struct Unreachable;
///
/// #[async_trait]
/// impl RouteProvider for Unreachable {
///     fn id(&self) -> ProviderId {
///         ProviderId::Osrm
///     }
///
///     async fn request_route(
///         &self,
///         _origin: Coordinate,
///         _destination: Coordinate,
///         _cancel: &CancellationToken,
///     ) -> Result<RouteResult, RouteProviderError> {
///         Err(RouteProviderError::NoRoute)
///     }
/// }
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let token = CancellationToken::new();
/// let route = Unreachable
///     .fetch_route(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 1.0), &token)
///     .await;
/// assert!(route.is_none());
/// # });
/// ```
#[async_trait]
pub trait RouteProvider: Send + Sync {
    /// Identity used to tag results and order the fallback chain.
    fn id(&self) -> ProviderId;

    /// Request a route, reporting why it failed.
    async fn request_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        cancel: &CancellationToken,
    ) -> Result<RouteResult, RouteProviderError>;

    /// Request a route, collapsing every failure to `None`.
    ///
    /// This is the boundary the orchestrator calls; it never propagates an
    /// error so the next provider can be tried uniformly.
    async fn fetch_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        cancel: &CancellationToken,
    ) -> Option<RouteResult> {
        match self.request_route(origin, destination, cancel).await {
            Ok(route) => Some(route),
            Err(err) => {
                log::debug!("{} provider failed: {err}", self.id());
                None
            }
        }
    }
}
