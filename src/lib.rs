//! A small request router with exact and regular expression routes.
//!
//! Routes are registered once at startup and then matched per request:
//!
//! - Exact routes are looked up by method and literal path and always take
//!   precedence.
//! - Pattern routes are regular expressions, tried in registration order;
//!   the first match wins.
//! - Named capture groups (`(?P<id>...)`) of the matched pattern are bound
//!   into the request context under their names.
//! - Each route runs its middleware chain, first registered outermost, before
//!   the terminal handler. A middleware that doesn't call the next layer ends
//!   the request.
//!
//! Routes also carry documentation metadata (tag, description, parameters,
//! bodies) exposed through [`Router::tags`] and [`Router::routes_for_tag`].
//!
//! # Examples
//!
//! ## Routing a request
//!
//! ```
//! use microroute_rs::{HttpRequest, HttpResponse, Method, Route, Router, StatusCode};
//!
//! # tokio_test_block(async {
//! let mut router = Router::new();
//!
//! router.add(Route::exact("/health")?.set_handler(|_req| async {
//!     Ok(HttpResponse::new(StatusCode::Ok).with_body_string("ok"))
//! }))?;
//!
//! router.add(
//!     Route::pattern(r"^/users/(?P<user_id>[0-9]+)$")?
//!         .set_method(Method::GET)
//!         .set_handler(|req| async move {
//!             let id = req.param("user_id").unwrap_or_default().to_string();
//!             Ok(HttpResponse::new(StatusCode::Ok).with_body_string(id))
//!         }),
//! )?;
//!
//! let response = router.dispatch(HttpRequest::simple(Method::GET, "/users/42")).await?;
//! assert_eq!(response.body, b"42");
//!
//! let response = router.dispatch(HttpRequest::simple(Method::GET, "/nope")).await?;
//! assert_eq!(response.status, StatusCode::NotFound);
//! # Ok::<(), microroute_rs::RouterError>(())
//! # }).unwrap();
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```
//!
//! ## Parsing a request
//!
//! ```
//! use microroute_rs::{parse_request, Method};
//!
//! let request = parse_request(b"GET /users/42?verbose HTTP/1.1\r\nHost: example.com\r\n\r\n").unwrap();
//! assert_eq!(request.method, Method::GET);
//! assert_eq!(request.path, "/users/42");
//! assert!(request.has_query_param("verbose"));
//! ```
//!
//! See `demos/basic_router.rs` for a runnable server built on [`serve_connection`].

// Export the parser module
pub mod parser;

// Export the router module
pub mod router;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, HttpRequest, HttpVersion, Method, parse_request};
pub use router::{
    Body, Error as RouterError, HandlerFn, HandlerFuture, HttpArgument, MatchKind, Middleware,
    MiddlewareFn, PathArgument, Pattern, QueryParameter, RequestContext, Route, Router, handler_fn,
};
pub use server::{Error as ServerError, HttpResponse, ServerConfig, StatusCode, serve_connection};
