//! Request-scoped values.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::router::route::Route;

/// Per-request key/value store filled by the router and by middleware.
///
/// Named captures of the matched pattern are stored under their group name.
/// The matched route itself lives in a dedicated field, so no capture name
/// can shadow it.
#[derive(Clone, Default)]
pub struct RequestContext {
    values: HashMap<String, String>,
    route: Option<Arc<Route>>,
}

impl RequestContext {
    /// Get a bound value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Bind `value` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    /// Remove a bound value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate over all bound values in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The route the router resolved for this request, if any.
    pub fn route(&self) -> Option<&Arc<Route>> {
        self.route.as_ref()
    }

    pub(crate) fn set_route(&mut self, route: Arc<Route>) {
        self.route = Some(route);
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("values", &self.values)
            .field(
                "route",
                &self.route.as_ref().map(|r| format!("{} {}", r.method(), r.source())),
            )
            .finish()
    }
}
