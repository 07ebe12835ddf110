//! Server configuration.
//!
//! The service runs behind a trusted API gateway, so the only knob that
//! matters in practice is the bind address. It comes from the
//! `STOCKROOM_ADDR` environment variable, falling back to
//! [`DEFAULT_HTTP_ADDR`].

use std::net::SocketAddr;

/// Default HTTP bind address.
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";

/// Environment variable holding the bind address.
pub const ADDR_ENV_VAR: &str = "STOCKROOM_ADDR";

/// Server configuration.
///
/// Use [`ServerConfig::builder()`] to construct instances, or
/// [`ServerConfig::from_env()`] to read the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    http_addr: String,
}

impl ServerConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::new()
    }

    /// Builds a configuration from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let http_addr =
            std::env::var(ADDR_ENV_VAR).unwrap_or_else(|_| DEFAULT_HTTP_ADDR.to_string());
        Self { http_addr }
    }

    /// Returns the HTTP bind address.
    #[must_use]
    pub fn http_addr(&self) -> &str {
        &self.http_addr
    }

    /// Parses and returns the HTTP address as a `SocketAddr`.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be parsed.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        self.http_addr.parse()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug, Clone)]
pub struct ServerConfigBuilder {
    http_addr: String,
}

impl ServerConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            http_addr: DEFAULT_HTTP_ADDR.to_string(),
        }
    }

    /// Sets the HTTP bind address.
    #[must_use]
    pub fn http_addr(mut self, addr: impl Into<String>) -> Self {
        self.http_addr = addr.into();
        self
    }

    /// Builds the [`ServerConfig`] with the configured values.
    #[must_use]
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            http_addr: self.http_addr,
        }
    }
}

impl Default for ServerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.http_addr(), DEFAULT_HTTP_ADDR);
    }

    #[test]
    fn builder_overrides_addr() {
        let config = ServerConfig::builder().http_addr("127.0.0.1:3000").build();
        assert_eq!(config.http_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn socket_addr_parsing() {
        let config = ServerConfig::builder().http_addr("127.0.0.1:8080").build();
        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.port(), 8080);
        assert!(addr.ip().is_loopback());
    }

    #[test]
    fn socket_addr_invalid() {
        let config = ServerConfig::builder().http_addr("not-an-address").build();
        assert!(config.socket_addr().is_err());
    }
}
