//! # Stockroom Server
//!
//! The HTTP surface of the Stockroom catalog service: configuration,
//! routing, product handlers, and the hyper accept loop.
//!
//! The server owns no business logic. It buffers each request, pushes it
//! through the middleware pipeline (gateway gate, exception absorption,
//! request sequencing), and dispatches the survivors to [`ProductApi`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;

pub use config::{ServerConfig, ServerConfigBuilder, ADDR_ENV_VAR, DEFAULT_HTTP_ADDR};
pub use error::ServerError;
pub use handlers::{ProductApi, ProductPayload};
pub use router::Route;
pub use server::Server;
