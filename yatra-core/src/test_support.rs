//! Test doubles for route providers.
//!
//! [`StubRouteProvider`] answers with a pre-configured path or error without
//! touching the network, counting calls and observed cancellations so tests
//! can assert on deduplication and fallback ordering.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{Coordinate, ProviderId, RouteProvider, RouteProviderError, RouteResult};

/// Deterministic [`RouteProvider`] for tests.
///
/// Clones share their counters, so a test can hand one clone to the
/// resolver and keep another to inspect afterwards.
#[derive(Debug, Clone)]
pub struct StubRouteProvider {
    id: ProviderId,
    response: StubResponse,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
    cancellations: Arc<AtomicUsize>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Path(Vec<Coordinate>),
    Error(RouteProviderError),
}

impl StubRouteProvider {
    /// Create a provider answering with `path`.
    ///
    /// Paths shorter than two points surface as
    /// [`RouteProviderError::InvalidRoute`], like a real adapter would.
    #[must_use]
    pub fn with_path(id: ProviderId, path: Vec<Coordinate>) -> Self {
        Self::with_response(id, StubResponse::Path(path))
    }

    /// Create a provider failing with `error`.
    #[must_use]
    pub fn with_error(id: ProviderId, error: RouteProviderError) -> Self {
        Self::with_response(id, StubResponse::Error(error))
    }

    /// Create a provider that never finds a route.
    #[must_use]
    pub fn failing(id: ProviderId) -> Self {
        Self::with_error(id, RouteProviderError::NoRoute)
    }

    fn with_response(id: ProviderId, response: StubResponse) -> Self {
        Self {
            id,
            response,
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            cancellations: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wait `delay` before answering, honouring cancellation meanwhile.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of requests abandoned because the token fired.
    #[must_use]
    pub fn cancellations(&self) -> usize {
        self.cancellations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RouteProvider for StubRouteProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    async fn request_route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
        cancel: &CancellationToken,
    ) -> Result<RouteResult, RouteProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    self.cancellations.fetch_add(1, Ordering::SeqCst);
                    return Err(RouteProviderError::Cancelled);
                }
                () = tokio::time::sleep(delay) => {}
            }
        }
        match &self.response {
            StubResponse::Path(path) => Ok(RouteResult::new(path.clone(), self.id.into())?),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
