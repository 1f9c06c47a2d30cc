//! Middleware layers and chain composition.
//!
//! A middleware turns the next handler in the chain into a new handler. It
//! can act before and after calling `next`, or not call it at all. Not calling
//! `next` is how a layer stops the request: the layers registered after it
//! and the terminal handler never run, and whatever the layer returns is the
//! response.

use std::fmt;
use std::sync::Arc;

use crate::router::handler::HandlerFn;

/// A documented, composable request-processing layer.
pub trait Middleware: Send + Sync {
    /// Short identifier, also used to deduplicate middleware for documentation.
    fn name(&self) -> &str;

    /// Human readable explanation of what the layer does.
    fn description(&self) -> &str;

    /// Wrap `next` into a new handler.
    fn wrap(&self, next: HandlerFn) -> HandlerFn;
}

impl fmt::Debug for dyn Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Middleware")
            .field("name", &self.name())
            .field("description", &self.description())
            .finish()
    }
}

/// A [`Middleware`] built from a closure.
///
/// ```
/// use std::sync::Arc;
/// use microroute_rs::{HandlerFn, HandlerFuture, HttpRequest, MiddlewareFn};
///
/// let tag = MiddlewareFn::new("tag", "Marks the request as seen", |next: HandlerFn| -> HandlerFn {
///     Arc::new(move |mut req: HttpRequest| -> HandlerFuture {
///         req.context.insert("seen", "yes");
///         next(req)
///     })
/// });
/// ```
pub struct MiddlewareFn<F> {
    name: String,
    description: String,
    wrap: F,
}

impl<F> MiddlewareFn<F>
where
    F: Fn(HandlerFn) -> HandlerFn + Send + Sync,
{
    pub fn new(name: impl Into<String>, description: impl Into<String>, wrap: F) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            wrap,
        }
    }
}

impl<F> Middleware for MiddlewareFn<F>
where
    F: Fn(HandlerFn) -> HandlerFn + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn wrap(&self, next: HandlerFn) -> HandlerFn {
        (self.wrap)(next)
    }
}

/// Wrap `handler` in `middleware` so that the first entry is the outermost
/// layer and runs first.
pub fn compose(handler: HandlerFn, middleware: &[Arc<dyn Middleware>]) -> HandlerFn {
    middleware
        .iter()
        .rev()
        .fold(handler, |next, layer| layer.wrap(next))
}
