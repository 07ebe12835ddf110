//! # Stockroom Core
//!
//! Core types shared across the Stockroom catalog service:
//!
//! - [`Envelope`] - Uniform success/message result of every mutation
//! - [`ProblemDetail`] - Structured problem body returned to clients
//! - [`ServiceError`] - Infrastructure fault taxonomy
//! - [`RequestContext`] - Immutable per-request record (method, path, sequence)

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod context;
mod envelope;
mod error;
mod problem;

pub use context::RequestContext;
pub use envelope::Envelope;
pub use error::{ServiceError, ServiceResult};
pub use problem::ProblemDetail;
