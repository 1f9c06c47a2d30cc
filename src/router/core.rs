//! The route table and request dispatch.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::parser::{HttpRequest, Method};
use crate::router::error::Error;
use crate::router::middleware::Middleware;
use crate::router::route::{MatchKind, Route};
use crate::server::HttpResponse;

/// Registry of routes and the dispatch entry point.
///
/// Exact routes are looked up by method and path and always win. Pattern
/// routes are then tried in registration order and the first whose method
/// and pattern both match is used.
///
/// Routes are meant to be registered before serving starts. `add` takes
/// `&mut self`, so once the router is shared (e.g. behind an `Arc`) the table
/// is read-only and dispatch needs no locking.
#[derive(Debug, Default)]
pub struct Router {
    /// Exact routes by method, then literal path.
    exact_routes: HashMap<Method, HashMap<String, Arc<Route>>>,
    pattern_routes: Vec<Arc<Route>>,
    routes_by_tag: BTreeMap<String, Vec<Arc<Route>>>,
}

impl Router {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route.
    ///
    /// Registering a second exact route for the same method and path
    /// replaces the first. The replaced route stays listed under its tag.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidMatchKind`] if the route was declared with an unknown
    /// kind. Nothing is registered in that case.
    pub fn add(&mut self, route: Route) -> Result<(), Error> {
        let kind = match route.checked_match_kind() {
            Ok(kind) => kind,
            Err(e) => {
                warn!("Rejecting route: {e}");
                return Err(e);
            }
        };

        let route = Arc::new(route);
        self.routes_by_tag
            .entry(route.tag().to_string())
            .or_default()
            .push(Arc::clone(&route));

        match kind {
            MatchKind::Exact => {
                debug!("Registered exact route {} {}", route.method(), route.source());
                let previous = self
                    .exact_routes
                    .entry(route.method().clone())
                    .or_default()
                    .insert(route.source().to_string(), route);
                if let Some(previous) = previous {
                    debug!("Replaced exact route {} {}", previous.method(), previous.source());
                }
            }
            MatchKind::Pattern => {
                debug!("Registered pattern route {} {}", route.method(), route.source());
                self.pattern_routes.push(route);
            }
        }

        Ok(())
    }

    /// Find the route for `method` and `path`.
    ///
    /// Returns `None` when nothing matches.
    pub fn match_route(&self, method: &Method, path: &str) -> Option<&Arc<Route>> {
        if let Some(route) = self.exact_routes.get(method).and_then(|paths| paths.get(path)) {
            return Some(route);
        }

        self.pattern_routes
            .iter()
            .find(|route| route.method() == method && route.matcher().is_match(path))
    }

    /// Route `request` and run the matched route's chain.
    ///
    /// Named captures of the route's pattern are bound into the request
    /// context, along with the route itself. An unmatched request yields
    /// [`HttpResponse::not_found`].
    ///
    /// # Errors
    ///
    /// Whatever the route's chain returns, unchanged, or
    /// [`Error::MissingHandler`] if the route has no handler.
    pub async fn dispatch(&self, mut request: HttpRequest) -> Result<HttpResponse, Error> {
        let Some(route) = self.match_route(&request.method, &request.path) else {
            debug!("No route for {} {}", request.method, request.path);
            return Ok(HttpResponse::not_found());
        };
        let route = Arc::clone(route);

        debug!("{} {} matched route {}", request.method, request.path, route.source());

        route.matcher().bind(&request.path, &mut request.context);
        request.context.set_route(Arc::clone(&route));

        route.dispatch(request).await
    }

    /// All tags in use, sorted. Untagged routes are listed under `""`.
    pub fn tags(&self) -> Vec<String> {
        self.routes_by_tag.keys().cloned().collect()
    }

    /// Routes carrying `tag`, sorted by pattern source.
    ///
    /// This order is for documentation only; dispatch always uses
    /// registration order.
    pub fn routes_for_tag(&self, tag: &str) -> Vec<Arc<Route>> {
        let mut routes = self.routes_by_tag.get(tag).cloned().unwrap_or_default();
        routes.sort_by(|a, b| a.source().cmp(b.source()));
        routes
    }

    /// Every distinct middleware on a routable route, keyed by name.
    ///
    /// When two layers share a name the first one seen wins: pattern routes
    /// in registration order, then exact routes by method and path.
    pub fn middlewares(&self) -> BTreeMap<String, Arc<dyn Middleware>> {
        let mut exact: Vec<_> = self
            .exact_routes
            .iter()
            .flat_map(|(method, paths)| paths.iter().map(move |(path, route)| ((method, path), route)))
            .collect();
        exact.sort_by(|a, b| a.0.cmp(&b.0));

        let mut found = BTreeMap::new();
        let routes = self.pattern_routes.iter().chain(exact.into_iter().map(|(_, route)| route));
        for route in routes {
            for layer in route.middleware() {
                found
                    .entry(layer.name().to_string())
                    .or_insert_with(|| Arc::clone(layer));
            }
        }
        found
    }

    /// Number of routes that can currently be matched.
    pub fn len(&self) -> usize {
        self.exact_routes.values().map(HashMap::len).sum::<usize>() + self.pattern_routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Log the routing table, grouped by tag.
    pub fn log_routes(&self) {
        info!("Registered routes ({count}):", count = self.len());
        for (tag, routes) in &self.routes_by_tag {
            info!("  [{tag}]", tag = if tag.is_empty() { "untagged" } else { tag.as_str() });
            for route in routes {
                let kind = route.match_kind().map_or_else(|| "?".to_string(), |k| k.to_string());
                info!("    {} {} ({kind})", route.method(), route.source());
            }
        }
    }
}
