//! axum adapter: registers translated routes into an `axum::Router`.
//!
//! Routes sharing a path are tried in registration order; the first one whose
//! request methods and constraints accept the request handles it. Each matched request carries a
//! [`RouteParams`] extension with the route's name and defaults, so handlers
//! can read the locale.

use crate::error::AdapterError;
use crate::host::{RequestConstraint, RequestHead};
use crate::path::{Node, PathPattern};
use crate::route::{Params, Route};
use crate::route_set::RouteTable;
use axum::extract::Request;
use axum::http::header::HOST;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{any, MethodRouter};
use axum::Router;
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt;
use tracing::debug;

/// Route metadata attached to every dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteParams {
    pub name: Option<String>,
    pub defaults: Params,
}

impl RouteParams {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.defaults.get(key).map(String::as_str)
    }
}

struct Candidate {
    app: MethodRouter,
    // Empty accepts every method
    methods: Vec<String>,
    constraints: Vec<Arc<dyn RequestConstraint>>,
    params: RouteParams,
}

/// Route table collecting axum method routers.
#[derive(Default)]
pub struct AxumRouteTable {
    routes: Vec<Route<MethodRouter>>,
}

impl AxumRouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> &[Route<MethodRouter>] {
        &self.routes
    }

    /// Build the router.
    ///
    /// # Returns
    /// * `Err(AdapterError)` if a route path cannot be expressed as an axum
    ///   path (optional groups, parameters sharing a segment with text)
    pub fn into_router(self) -> Result<Router, AdapterError> {
        let mut groups: Vec<(String, Vec<Candidate>)> = Vec::new();

        for route in self.routes {
            let pattern = axum_pattern(route.path())?;
            let path = pattern.to_string();
            debug!("Route {} binds {:?}", path, pattern.parameter_names());
            let candidate = Candidate {
                app: route.app,
                methods: route.conditions.request_method,
                constraints: route.constraints,
                params: RouteParams {
                    name: route.name,
                    defaults: route.defaults,
                },
            };

            match groups.iter_mut().find(|(existing, _)| *existing == path) {
                Some((_, candidates)) => candidates.push(candidate),
                None => groups.push((path, vec![candidate])),
            }
        }

        let mut router = Router::new();
        for (path, candidates) in groups {
            debug!("Mounting {} ({} candidates)", path, candidates.len());
            let candidates = Arc::new(candidates);
            router = router.route(
                &path,
                any(move |request: Request| dispatch(Arc::clone(&candidates), request)),
            );
        }
        Ok(router)
    }
}

impl RouteTable<MethodRouter> for AxumRouteTable {
    fn named_routes(&self) -> HashSet<String> {
        self.routes
            .iter()
            .filter_map(|route| route.name.clone())
            .collect()
    }

    fn add_route(&mut self, route: Route<MethodRouter>) {
        self.routes.push(route);
    }
}

impl Candidate {
    fn accepts_method(&self, method: &str) -> bool {
        self.methods.is_empty()
            || self
                .methods
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(method))
    }
}

async fn dispatch(candidates: Arc<Vec<Candidate>>, mut request: Request) -> Response {
    let selected = {
        let host = request
            .headers()
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .or_else(|| request.uri().host())
            .unwrap_or_default();
        let head = RequestHead {
            host: strip_port(host),
            method: request.method().as_str(),
            path: request.uri().path(),
        };

        candidates.iter().position(|candidate| {
            candidate.accepts_method(head.method)
                && candidate.constraints.iter().all(|c| c.matches(&head))
        })
    };

    let Some(index) = selected else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let candidate = &candidates[index];
    request.extensions_mut().insert(candidate.params.clone());
    match candidate.app.clone().oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        // [::1]:8080
        return host.split_once(']').map_or(host, |(addr, _)| &addr[1..]);
    }
    host.split_once(':').map_or(host, |(name, _)| name)
}

/// Convert a route path into axum path syntax.
pub fn axum_path(path: &str) -> Result<String, AdapterError> {
    axum_pattern(path).map(|pattern| pattern.to_string())
}

fn axum_pattern(path: &str) -> Result<PathPattern, AdapterError> {
    let pattern = PathPattern::parse(path).map_err(|source| AdapterError::Pattern {
        path: path.to_string(),
        source,
    })?;

    if pattern.has_optional() {
        return Err(AdapterError::OptionalSegment {
            path: path.to_string(),
        });
    }

    // axum parameters run to the next `/`, so `:id-slug` or `:id.json` would
    // bind a parameter with a different name
    let nodes = pattern.nodes();
    for (index, node) in nodes.iter().enumerate() {
        if let Node::Symbol(name) | Node::Star(name) = node {
            if !matches!(nodes.get(index + 1), None | Some(Node::Slash)) {
                return Err(AdapterError::EmbeddedParameter {
                    path: path.to_string(),
                    name: name.clone(),
                });
            }
        }
    }
    Ok(pattern)
}
