//! Route resolution with fallback, caching and request deduplication.
//!
//! This crate provides [`RouteResolver`], which turns an origin/destination
//! pair into a route by walking an ordered chain of
//! [`RouteProvider`](yatra_core::RouteProvider)s until one succeeds.
//!
//! Responsibilities:
//! - Reject non-finite input and normalise the rest before keying.
//! - Serve recent outcomes from a per-resolver cache keyed by
//!   [`RouteKey`](yatra_core::RouteKey), including "no route" outcomes.
//! - Share one pending resolution among concurrent callers for the same key.
//! - Propagate caller cancellation without disturbing other callers.
//!
//! Boundaries:
//! - Never substitutes a straight line for a missing route; callers decide
//!   whether to use [`yatra_core::as_straight_line`].
//! - Does not build providers; see `yatra_data::routing::build_provider_chain`.
//!
//! Invariants:
//! - At most one resolution per key is pending at any time.
//! - A pending registration is removed exactly once, when it settles or when
//!   its last caller detaches.
//! - The state lock is never held across an `.await`.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod cache;
mod in_flight;
mod resolver;

pub use resolver::{DEFAULT_CACHE_TTL, ResolverConfig, RouteResolver};
