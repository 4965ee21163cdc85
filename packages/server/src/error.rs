//! Server-level errors.

use std::io;

use thiserror::Error;

/// Fatal errors that stop the relay
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listening socket could not be bound
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The HTTP server stopped with an I/O error
    #[error("Server error: {0}")]
    Serve(#[from] io::Error),
}
