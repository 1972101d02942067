//! In-memory route table.
//!
//! # Design Decisions
//! - Keyed by `(method, path)`; a second registration for a key replaces the first
//! - Reads load an immutable snapshot without locking
//! - Writes are copy-on-write through `ArcSwap::rcu`, so concurrent
//!   registrations of the same key resolve to the last writer with no torn state
//! - Each write clones the table, so `register` is O(routes). Mock tables are
//!   small and writes are rare next to reads; `replace_all` is the bulk path
//! - `replace_all` swaps the whole table in one step (used by endpoint reload)

use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::Arc;

use crate::observability::metrics;
use crate::routing::definition::{RouteDefinition, RouteKey};

type RouteTable = HashMap<RouteKey, Arc<RouteDefinition>>;

#[derive(Debug)]
pub struct RouteRegistry {
    routes: ArcSwap<RouteTable>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self {
            routes: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// Insert or replace the entry for the definition's key.
    ///
    /// Copies the whole table (the `Arc`s, not the definitions) and may
    /// retry under contention. Load many routes with [`replace_all`](Self::replace_all).
    pub fn register(&self, definition: RouteDefinition) {
        let definition = Arc::new(definition);
        let key = definition.key.clone();
        let previous = self.routes.rcu(|table| {
            let mut next = RouteTable::clone(table);
            next.insert(key.clone(), definition.clone());
            next
        });

        let replaced = previous.contains_key(&key);
        tracing::debug!(route = %key, replaced, "Route registered");
        metrics::record_registry_size(self.len());
    }

    /// Exact match on normalized method and literal path.
    pub fn lookup(&self, key: &RouteKey) -> Option<Arc<RouteDefinition>> {
        self.routes.load().get(key).cloned()
    }

    /// Drop every route.
    pub fn reset(&self) {
        self.routes.store(Arc::new(HashMap::new()));
        tracing::debug!("Route registry cleared");
        metrics::record_registry_size(0);
    }

    /// Atomically swap in a fresh table built from `definitions`.
    /// Later definitions win over earlier ones with the same key.
    pub fn replace_all(&self, definitions: Vec<RouteDefinition>) {
        let table: RouteTable = definitions
            .into_iter()
            .map(|def| (def.key.clone(), Arc::new(def)))
            .collect();
        let count = table.len();
        self.routes.store(Arc::new(table));
        tracing::info!(routes = count, "Route registry replaced");
        metrics::record_registry_size(count);
    }

    /// All registered routes, ordered by path then method.
    pub fn snapshot(&self) -> Vec<Arc<RouteDefinition>> {
        let mut routes: Vec<_> = self.routes.load().values().cloned().collect();
        routes.sort_by(|a, b| {
            a.path()
                .cmp(b.path())
                .then_with(|| a.method().as_str().cmp(b.method().as_str()))
        });
        routes
    }

    pub fn len(&self) -> usize {
        self.routes.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for RouteRegistry {
    fn default() -> Self {
        Self::new()
    }
}
