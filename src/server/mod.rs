//! Response target and connection glue.
//!
//! This module holds the response type handlers produce and a small adapter
//! that serves one request from an already established byte stream through a
//! [`Router`](crate::router::Router). Accepting connections is left to the host.

mod response;
mod config;
mod error;
mod connection;
mod tests;

// Re-export public items
pub use response::{HttpResponse, StatusCode};
pub use config::ServerConfig;
pub use error::Error;
pub use connection::serve_connection;
