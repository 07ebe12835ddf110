//! # Stockroom Telemetry
//!
//! Structured logging for the Stockroom service: a [`LogConfig`] with
//! development and production presets, initialized once at process start.
//!
//! Components never touch a global logger directly; they emit through the
//! `tracing` facade and this crate decides where the records go.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod logging;

pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig};

/// Result type alias using [`TelemetryError`].
pub type TelemetryResult<T> = Result<T, TelemetryError>;
