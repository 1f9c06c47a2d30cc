//! Terminal request handlers.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::parser::HttpRequest;
use crate::router::error::Error;
use crate::server::HttpResponse;

/// Type alias for a boxed future that returns a Result<HttpResponse, Error>.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// Type alias for a handler function that takes an HttpRequest and returns a HandlerFuture.
///
/// Middleware layers have the same shape, so a wrapped handler is again a
/// `HandlerFn`.
pub type HandlerFn = Arc<dyn Fn(HttpRequest) -> HandlerFuture + Send + Sync>;

/// Box an async function or closure into a [`HandlerFn`].
///
/// ```
/// use microroute_rs::{handler_fn, HttpResponse, StatusCode};
///
/// let hello = handler_fn(|_req| async {
///     Ok(HttpResponse::new(StatusCode::Ok).with_body_string("hello"))
/// });
/// ```
pub fn handler_fn<F, Fut>(handler: F) -> HandlerFn
where
    F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    Arc::new(move |req: HttpRequest| -> HandlerFuture { Box::pin(handler(req)) })
}
