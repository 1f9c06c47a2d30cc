//! Route matching and dispatch.
//!
//! A [`Router`] holds two kinds of routes: exact routes, keyed by method and
//! literal path, and pattern routes, scanned in registration order. Named
//! capture groups of the matched pattern are bound into the request's
//! [`RequestContext`] before the route's [`Middleware`] chain and handler run.

mod context;
mod core;
mod error;
mod handler;
mod middleware;
mod pattern;
mod route;

// Re-export public items
pub use context::RequestContext;
pub use self::core::Router;
pub use error::Error;
pub use handler::{handler_fn, HandlerFn, HandlerFuture};
pub use middleware::{compose, Middleware, MiddlewareFn};
pub use pattern::Pattern;
pub use route::{Body, HttpArgument, MatchKind, PathArgument, QueryParameter, Route};
