//! Time-bounded cache of resolution outcomes.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use yatra_core::{RouteKey, RouteResult};

/// Settled result of one resolution.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RouteOutcome {
    /// A provider produced a usable route.
    Found(Arc<RouteResult>),
    /// Every provider failed.
    NoRoute,
}

impl RouteOutcome {
    /// The route, if one was found.
    pub(crate) fn route(&self) -> Option<Arc<RouteResult>> {
        match self {
            Self::Found(route) => Some(Arc::clone(route)),
            Self::NoRoute => None,
        }
    }
}

#[derive(Debug)]
struct CacheEntry {
    stored_at: Instant,
    outcome: RouteOutcome,
}

/// Outcomes keyed by [`RouteKey`], served while younger than the TTL.
///
/// There is no eviction beyond overwriting: a stale entry lingers until the
/// next resolution for its key replaces it.
#[derive(Debug)]
pub(crate) struct RouteCache {
    ttl: Duration,
    entries: HashMap<RouteKey, CacheEntry>,
}

impl RouteCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: HashMap::new(),
        }
    }

    /// Return the outcome for `key` when `now - stored_at < ttl`.
    pub(crate) fn lookup(&self, key: &RouteKey, now: Instant) -> Option<&RouteOutcome> {
        self.entries
            .get(key)
            .filter(|entry| now.saturating_duration_since(entry.stored_at) < self.ttl)
            .map(|entry| &entry.outcome)
    }

    /// Record `outcome` for `key`, replacing any previous entry.
    pub(crate) fn store(&mut self, key: RouteKey, outcome: RouteOutcome, now: Instant) {
        self.entries.insert(
            key,
            CacheEntry {
                stored_at: now,
                outcome,
            },
        );
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
