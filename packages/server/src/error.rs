//! Server-level errors.

use std::net::SocketAddr;

use thiserror::Error;

use crate::domain::ConfigError;

/// Errors that stop the server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Invalid command-line configuration
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The listening socket could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP server failed while running
    #[error("Server I/O error: {0}")]
    Serve(#[source] std::io::Error),
}
