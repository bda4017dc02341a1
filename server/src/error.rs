use crate::config::ConfigError;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Faults that stop the server from starting or keep it from serving.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The audit file could not be opened for appending.
    #[error("Failed to open audit log {}: {source}", .path.display())]
    AuditLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to bind tcp listener to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serve app: {0}")]
    Serve(#[source] io::Error),
}
