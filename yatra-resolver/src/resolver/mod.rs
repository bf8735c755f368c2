//! Fallback orchestration over an ordered provider chain.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use yatra_core::{Coordinate, RouteKey, RouteProvider, RouteResult};

use crate::cache::{RouteCache, RouteOutcome};
use crate::in_flight::{Detach, InFlightRegistry};

/// Default freshness window for cached outcomes.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15);

/// A pending resolution shared by every caller attached to it.
///
/// Resolves to `None` when it was cancelled before settling.
type SharedResolution = Shared<BoxFuture<'static, Option<RouteOutcome>>>;

/// Configuration for [`RouteResolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolverConfig {
    /// How long a settled outcome, including "no route", is served from cache.
    pub ttl: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ttl: DEFAULT_CACHE_TTL,
        }
    }
}

impl ResolverConfig {
    /// Set the cache TTL.
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Resolves routes by walking providers in order, with caching and
/// deduplication of concurrent identical requests.
///
/// Cloning is cheap; clones share the same cache and in-flight registry.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use yatra_core::test_support::StubRouteProvider;
/// use yatra_core::{Coordinate, ProviderId, RouteProvider, RouteSource};
/// use yatra_resolver::{ResolverConfig, RouteResolver};
///
/// # tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(async {
/// let origin = Coordinate::new(23.1828, 75.7689);
/// let destination = Coordinate::new(23.1769, 75.7889);
/// let osrm = StubRouteProvider::with_path(ProviderId::Osrm, vec![origin, destination]);
/// let providers: Vec<Arc<dyn RouteProvider>> = vec![Arc::new(osrm)];
/// let resolver = RouteResolver::new(providers, ResolverConfig::default());
///
/// let route = resolver.resolve_route(origin, destination, None).await;
/// assert_eq!(route.map(|r| r.source()), Some(RouteSource::Provider(ProviderId::Osrm)));
/// # });
/// ```
#[derive(Clone)]
pub struct RouteResolver {
    inner: Arc<Inner>,
}

struct Inner {
    providers: Vec<Arc<dyn RouteProvider>>,
    state: Mutex<State>,
}

struct State {
    cache: RouteCache,
    in_flight: InFlightRegistry<SharedResolution>,
}

enum Lookup {
    Cached(RouteOutcome),
    Pending(Attachment, SharedResolution),
}

impl fmt::Debug for RouteResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let providers: Vec<&str> = self
            .inner
            .providers
            .iter()
            .map(|provider| provider.id().as_str())
            .collect();
        f.debug_struct("RouteResolver")
            .field("providers", &providers)
            .finish_non_exhaustive()
    }
}

impl RouteResolver {
    /// Create a resolver that tries `providers` in the given order.
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn RouteProvider>>, config: ResolverConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                providers,
                state: Mutex::new(State {
                    cache: RouteCache::new(config.ttl),
                    in_flight: InFlightRegistry::default(),
                }),
            }),
        }
    }

    /// Resolve a route from `origin` to `destination`.
    ///
    /// Returns `None` when either endpoint is not finite, when every provider
    /// failed (that outcome is cached for the TTL too), or when `cancel` fired
    /// first. Cancelling only detaches this caller: other callers waiting on
    /// the same resolution still receive its result. When the cancelling
    /// caller was the only one attached, the resolution itself is cancelled
    /// and nothing is cached. Dropping the returned future counts as
    /// cancelling.
    pub async fn resolve_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        cancel: Option<&CancellationToken>,
    ) -> Option<Arc<RouteResult>> {
        if !origin.is_valid() || !destination.is_valid() {
            log::debug!("rejecting non-finite endpoints {origin} -> {destination}");
            return None;
        }
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return None;
        }
        let start = normalise_endpoint("origin", origin);
        let end = normalise_endpoint("destination", destination);
        let key = RouteKey::canonical(start, end);

        let (attachment, resolution) = match self.join_or_start(key, start, end) {
            Lookup::Cached(outcome) => return outcome.route(),
            Lookup::Pending(attachment, resolution) => (attachment, resolution),
        };

        let outcome = match cancel {
            None => resolution.await,
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        if attachment.abandon() {
                            // Let the cancelled providers unwind before returning.
                            resolution.await;
                        }
                        return None;
                    }
                    outcome = resolution.clone() => outcome,
                }
            }
        };
        attachment.finish();
        outcome.and_then(|settled| settled.route())
    }

    /// Number of resolutions currently pending.
    #[must_use]
    pub fn in_flight_len(&self) -> usize {
        self.inner.lock().in_flight.len()
    }

    fn join_or_start(&self, key: RouteKey, origin: Coordinate, destination: Coordinate) -> Lookup {
        let mut state = self.inner.lock();
        if let Some(outcome) = state.cache.lookup(&key, Instant::now()) {
            log::debug!("cache hit for {key}");
            return Lookup::Cached(outcome.clone());
        }
        if let Some((generation, resolution)) = state.in_flight.attach(&key) {
            log::debug!("joining pending resolution for {key}");
            let attachment = Attachment::new(Arc::clone(&self.inner), key, generation);
            return Lookup::Pending(attachment, resolution);
        }

        let generation = state.in_flight.next_generation();
        let token = CancellationToken::new();
        let resolution = Arc::clone(&self.inner)
            .run(key.clone(), generation, origin, destination, token.clone())
            .boxed()
            .shared();
        state
            .in_flight
            .register(key.clone(), generation, resolution.clone(), token);
        Lookup::Pending(
            Attachment::new(Arc::clone(&self.inner), key, generation),
            resolution,
        )
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Try every provider, then settle the registration and cache the outcome.
    async fn run(
        self: Arc<Self>,
        key: RouteKey,
        generation: u64,
        origin: Coordinate,
        destination: Coordinate,
        cancel: CancellationToken,
    ) -> Option<RouteOutcome> {
        let outcome = self.try_providers(&key, origin, destination, &cancel).await;
        let mut state = self.lock();
        // An abandoned resolution was already removed; it must not be cached.
        if state.in_flight.settle(&key, generation)
            && let Some(settled) = &outcome
        {
            state.cache.store(key, settled.clone(), Instant::now());
        }
        outcome
    }

    async fn try_providers(
        &self,
        key: &RouteKey,
        origin: Coordinate,
        destination: Coordinate,
        cancel: &CancellationToken,
    ) -> Option<RouteOutcome> {
        for provider in &self.providers {
            if cancel.is_cancelled() {
                return None;
            }
            let Some(route) = provider.fetch_route(origin, destination, cancel).await else {
                continue;
            };
            if route.path().len() >= 2 {
                log::info!("{} resolved {key} with {} points", provider.id(), route.path().len());
                return Some(RouteOutcome::Found(Arc::new(route)));
            }
        }
        if cancel.is_cancelled() {
            return None;
        }
        log::warn!("no provider returned a route for {key}");
        Some(RouteOutcome::NoRoute)
    }

    fn detach(&self, key: &RouteKey, generation: u64) -> bool {
        let detached = self.lock().in_flight.detach(key, generation);
        match detached {
            Detach::Abandoned(resolution) => {
                log::debug!("last caller left; cancelling resolution for {key}");
                // Released outside the lock.
                drop(resolution);
                true
            }
            Detach::Remaining | Detach::Gone => false,
        }
    }
}

/// One caller's hold on a pending resolution.
///
/// Dropping it without [`Attachment::finish`] detaches the caller.
struct Attachment {
    inner: Arc<Inner>,
    key: RouteKey,
    generation: u64,
    active: bool,
}

impl Attachment {
    const fn new(inner: Arc<Inner>, key: RouteKey, generation: u64) -> Self {
        Self {
            inner,
            key,
            generation,
            active: true,
        }
    }

    /// The resolution settled and delivered its outcome.
    fn finish(mut self) {
        self.active = false;
    }

    /// Detach now; returns `true` when this was the last caller.
    fn abandon(mut self) -> bool {
        self.active = false;
        self.inner.detach(&self.key, self.generation)
    }
}

impl Drop for Attachment {
    fn drop(&mut self) {
        if self.active {
            self.inner.detach(&self.key, self.generation);
        }
    }
}

fn normalise_endpoint(label: &str, point: Coordinate) -> Coordinate {
    let normalised = point.normalized();
    if normalised.adjusted {
        log::warn!("{label} {point} out of range; clamped to {}", normalised.coordinate);
    }
    normalised.coordinate
}
