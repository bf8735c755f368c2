//! Registry of pending resolutions, one per key.
//!
//! Each registration carries a generation number. Settlement and detachment
//! name the generation they belong to, so a late settlement of an abandoned
//! resolution can never remove a newer registration for the same key.

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;
use yatra_core::RouteKey;

#[derive(Debug)]
struct Pending<R> {
    generation: u64,
    resolution: R,
    cancel: CancellationToken,
    attached: usize,
}

/// Result of [`InFlightRegistry::detach`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Detach<R> {
    /// Other callers are still attached.
    Remaining,
    /// The last caller left; the registration was removed and cancelled.
    Abandoned(R),
    /// The resolution already settled or was superseded.
    Gone,
}

/// Pending resolutions keyed by [`RouteKey`].
///
/// `R` is the shared handle callers await.
#[derive(Debug)]
pub(crate) struct InFlightRegistry<R> {
    next_generation: u64,
    pending: HashMap<RouteKey, Pending<R>>,
}

impl<R> Default for InFlightRegistry<R> {
    fn default() -> Self {
        Self {
            next_generation: 0,
            pending: HashMap::new(),
        }
    }
}

impl<R: Clone> InFlightRegistry<R> {
    /// Join the pending resolution for `key`, if any.
    ///
    /// Returns its generation and a handle to await.
    pub(crate) fn attach(&mut self, key: &RouteKey) -> Option<(u64, R)> {
        let pending = self.pending.get_mut(key)?;
        pending.attached = pending.attached.saturating_add(1);
        Some((pending.generation, pending.resolution.clone()))
    }

    /// Reserve a generation for a resolution about to be registered.
    pub(crate) fn next_generation(&mut self) -> u64 {
        self.next_generation = self.next_generation.wrapping_add(1);
        self.next_generation
    }

    /// Record a new resolution for `key` with one caller attached.
    pub(crate) fn register(
        &mut self,
        key: RouteKey,
        generation: u64,
        resolution: R,
        cancel: CancellationToken,
    ) {
        self.pending.insert(
            key,
            Pending {
                generation,
                resolution,
                cancel,
                attached: 1,
            },
        );
    }

    /// Remove the registration once its resolution completes.
    ///
    /// Returns `false` when `generation` is no longer the registered one.
    pub(crate) fn settle(&mut self, key: &RouteKey, generation: u64) -> bool {
        if self.generation_of(key) != Some(generation) {
            return false;
        }
        self.pending.remove(key);
        true
    }

    /// Drop one caller from the resolution `generation` of `key`.
    ///
    /// When the last caller leaves, the registration is removed and its
    /// cancellation token fired.
    pub(crate) fn detach(&mut self, key: &RouteKey, generation: u64) -> Detach<R> {
        let Some(pending) = self
            .pending
            .get_mut(key)
            .filter(|pending| pending.generation == generation)
        else {
            return Detach::Gone;
        };
        pending.attached = pending.attached.saturating_sub(1);
        if pending.attached > 0 {
            return Detach::Remaining;
        }
        match self.pending.remove(key) {
            Some(abandoned) => {
                abandoned.cancel.cancel();
                Detach::Abandoned(abandoned.resolution)
            }
            None => Detach::Gone,
        }
    }

    /// Number of pending resolutions.
    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    fn generation_of(&self, key: &RouteKey) -> Option<u64> {
        self.pending.get(key).map(|pending| pending.generation)
    }
}
