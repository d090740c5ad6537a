//! The boundary between route expansion and the router that stores routes.
//!
//! Expansion never touches the router's own types. A router is adapted by
//! implementing [`RouteTable`], and [`crate::RouteTranslator::add_localized_route`]
//! feeds finished routes into it through that trait.

use crate::route::Route;
use std::collections::HashSet;

/// A route table that accepts finished routes, in order.
pub trait RouteTable<A> {
    /// Names already registered, as a snapshot.
    fn named_routes(&self) -> HashSet<String>;

    /// Register one route after all previously added ones.
    fn add_route(&mut self, route: Route<A>);
}

/// Plain ordered route table.
#[derive(Debug, Clone)]
pub struct MemoryRouteTable<A> {
    routes: Vec<Route<A>>,
}

impl<A> MemoryRouteTable<A> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn routes(&self) -> &[Route<A>] {
        &self.routes
    }

    pub fn into_routes(self) -> Vec<Route<A>> {
        self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Look up a route by name.
    pub fn get(&self, name: &str) -> Option<&Route<A>> {
        self.routes
            .iter()
            .find(|route| route.name.as_deref() == Some(name))
    }
}

impl<A> Default for MemoryRouteTable<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> RouteTable<A> for MemoryRouteTable<A> {
    fn named_routes(&self) -> HashSet<String> {
        self.routes
            .iter()
            .filter_map(|route| route.name.clone())
            .collect()
    }

    fn add_route(&mut self, route: Route<A>) {
        self.routes.push(route);
    }
}
