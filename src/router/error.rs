//! Error types for route registration and dispatch.

use thiserror::Error;

use crate::parser::{Error as ParserError, Method};

/// Errors raised while building routes, registering them, or running a
/// route's handler chain.
#[derive(Debug, Error)]
pub enum Error {
    /// The pattern source of a route is not a valid regular expression.
    #[error("Invalid route pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The route was declared with a match kind that is neither exact nor pattern.
    #[error("Invalid match kind {kind:?} for route {pattern:?}")]
    InvalidMatchKind { kind: String, pattern: String },

    /// The matched route never had a terminal handler set.
    #[error("No handler set for route {method} {pattern}")]
    MissingHandler { method: Method, pattern: String },

    /// A handler or middleware failed.
    #[error("Handler error: {0}")]
    HandlerError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error reading the request inside a handler.
    #[error("Request error: {0}")]
    ParseError(#[from] ParserError),
}
