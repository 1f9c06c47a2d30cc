//! Errors raised while reading a request off the wire.

use thiserror::Error;

/// Why a request could not be turned into an [`HttpRequest`](crate::parser::HttpRequest).
#[derive(Debug, Error)]
pub enum Error {
    /// The method token is empty or contains characters outside the token set.
    #[error("Invalid HTTP method: {0}")]
    InvalidMethod(String),

    /// The request target is neither origin-form (`/...`) nor `*`.
    #[error("Request target must start with '/' or be '*': {0:?}")]
    InvalidPath(String),

    /// The request line doesn't have exactly method, target and version.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// The version is not `HTTP/1.0`, `HTTP/1.1` or `HTTP/2`.
    #[error("Invalid HTTP version: {0}")]
    InvalidVersion(String),

    /// `Host` on an HTTP/1.1 request, or `Content-Type: application/json`
    /// when a handler reads the body with [`HttpRequest::json`](crate::parser::HttpRequest::json).
    #[error("Required header is missing: {0}")]
    MissingHeader(String),

    /// A header line without a `:` separator or with an empty name.
    #[error("Invalid header format")]
    InvalidHeaderFormat,

    /// No bytes, or no request line.
    #[error("Empty request")]
    EmptyRequest,

    /// The body is not the JSON the handler asked for.
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}
