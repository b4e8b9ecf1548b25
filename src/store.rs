//! # Route Store
//!
//! An owned, keyed store of prepared routes with least-recently-used
//! eviction and explicit invalidation. Hosts that fetch routes from a
//! provider keep them here instead of in ambient global state, then hand
//! [`RouteStore::candidates`] to the matcher.

use std::collections::HashMap;

use log::debug;

use crate::error::Result;
use crate::Route;

#[derive(Debug)]
struct StoredRoute {
    route: Route,
    inserted: u64,
    last_access: u64,
}

/// Routes keyed by id, bounded by `capacity`.
///
/// Eviction is a linear scan for the oldest access, which is fine for the
/// few hundred routes a session holds.
#[derive(Debug)]
pub struct RouteStore {
    capacity: usize,
    routes: HashMap<String, StoredRoute>,
    clock: u64,
}

impl RouteStore {
    /// Create a store holding at most `capacity` routes (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            routes: HashMap::with_capacity(capacity),
            clock: 0,
        }
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    /// Get a route by id, marking it as recently used.
    pub fn get(&mut self, id: &str) -> Option<&Route> {
        let now = self.tick();
        let stored = self.routes.get_mut(id)?;
        stored.last_access = now;
        Some(&stored.route)
    }

    /// Insert a route under its id, replacing any previous version.
    ///
    /// Routes with invalid coordinates are rejected. Inserting a new id into
    /// a full store evicts the least recently used route.
    pub fn insert(&mut self, route: Route) -> Result<()> {
        route.check_coordinates()?;
        let now = self.tick();

        if let Some(stored) = self.routes.get_mut(&route.id) {
            stored.route = route;
            stored.last_access = now;
            return Ok(());
        }

        if self.routes.len() >= self.capacity {
            self.evict_oldest();
        }

        self.routes.insert(
            route.id.clone(),
            StoredRoute {
                route,
                inserted: now,
                last_access: now,
            },
        );
        Ok(())
    }

    /// Remove a route, returning it if it was present.
    pub fn invalidate(&mut self, id: &str) -> Option<Route> {
        self.routes.remove(id).map(|stored| stored.route)
    }

    /// Remove all routes.
    pub fn clear(&mut self) {
        self.routes.clear();
        self.clock = 0;
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.routes.contains_key(id)
    }

    /// All stored routes in insertion order, ready to rank.
    ///
    /// A fixed order keeps tie-breaking in the matcher reproducible.
    pub fn candidates(&self) -> Vec<Route> {
        let mut stored: Vec<&StoredRoute> = self.routes.values().collect();
        stored.sort_by_key(|s| s.inserted);
        stored.into_iter().map(|s| s.route.clone()).collect()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .routes
            .iter()
            .min_by_key(|(_, stored)| stored.last_access)
            .map(|(id, _)| id.clone());

        if let Some(id) = oldest {
            debug!("[RouteStore] Evicting '{}'", id);
            self.routes.remove(&id);
        }
    }
}

impl Default for RouteStore {
    fn default() -> Self {
        Self::new(200)
    }
}
