//! Server startup errors.

use std::net::SocketAddr;
use thiserror::Error;

/// Errors that can occur while starting the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The configured bind address could not be parsed.
    #[error("Invalid bind address '{addr}': {source}")]
    InvalidAddress {
        /// The configured address string.
        addr: String,
        /// The parse failure.
        source: std::net::AddrParseError,
    },

    /// Binding the listener failed.
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        /// The resolved socket address.
        addr: SocketAddr,
        /// The underlying I/O failure.
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_address_display() {
        let source = "not-an-address".parse::<SocketAddr>().unwrap_err();
        let err = ServerError::InvalidAddress {
            addr: "not-an-address".to_string(),
            source,
        };
        assert!(err.to_string().contains("not-an-address"));
    }
}
