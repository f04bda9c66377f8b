//! Snapshot-swapped route table.
//!
//! The store owns the mutable route table and hands the engine immutable
//! snapshots. Updates publish a whole new table atomically, so a request
//! resolving concurrently with an update sees either the old table or the
//! new one, never a torn mix.

use crate::engine::dispatcher::{self, Outcome, Request};
use crate::matching::{method_matches, path_matches};
use crate::types::route::MockRoute;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// In-memory route store with lock-free snapshot reads.
#[derive(Debug)]
pub struct RouteStore {
    routes: ArcSwap<Vec<MockRoute>>,
}

impl Default for RouteStore {
    fn default() -> Self {
        Self::with_routes(Vec::new())
    }
}

impl RouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_routes(routes: Vec<MockRoute>) -> Self {
        Self {
            routes: ArcSwap::from_pointee(routes),
        }
    }

    /// Publish a new route table. Readers switch atomically.
    pub fn replace(&self, routes: Vec<MockRoute>) {
        self.routes.store(Arc::new(routes));
    }

    /// Current snapshot of the full route table.
    pub fn snapshot(&self) -> Arc<Vec<MockRoute>> {
        self.routes.load_full()
    }

    pub fn len(&self) -> usize {
        self.routes.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.load().is_empty()
    }

    /// Enabled routes matching the method and path, in registration order.
    ///
    /// This is the pre-filter the dispatcher's contract assumes; disabled
    /// routes are invisible to it.
    pub fn list_routes(&self, method: &str, path: &str) -> Vec<MockRoute> {
        self.routes
            .load()
            .iter()
            .filter(|route| {
                route.enabled
                    && method_matches(&route.method, method)
                    && path_matches(&route.path, path)
            })
            .cloned()
            .collect()
    }

    /// Pre-filter by method and path, then dispatch.
    pub fn resolve(&self, request: &Request) -> Outcome {
        let candidates = self.list_routes(&request.method, &request.path);
        dispatcher::resolve(request, &candidates)
    }
}
