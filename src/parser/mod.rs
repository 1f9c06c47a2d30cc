//! Inbound request model.
//!
//! Parses HTTP/1.x requests into [`HttpRequest`] values that the router
//! dispatches on. Each request carries its own [`RequestContext`](crate::router::RequestContext).

mod request;
mod method;
mod version;
mod error;

// Re-export public items
pub use request::HttpRequest;
pub use method::Method;
pub use version::HttpVersion;
pub use error::Error;

// Re-export the parse_request function
pub use request::parse_request;
