//! Connection adapter configuration.

/// Settings for [`serve_connection`](crate::server::serve_connection).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The read buffer size; requests larger than this are truncated.
    pub read_buffer_size: usize,
    /// Value of the `Server` header added to responses that don't set one.
    pub server_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            read_buffer_size: 8192,
            server_name: "microroute-rs".to_string(),
        }
    }
}
