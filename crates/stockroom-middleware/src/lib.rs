//! # Stockroom Middleware
//!
//! The request-processing pipeline every Stockroom request passes through.
//!
//! ```text
//! Request → ApiGatewayGate → ExceptionHandler → RequestLog → handler
//! Response ←──────────────←─────────────────←────────────←───┘
//! ```
//!
//! - **`ApiGatewayGate`** rejects requests that did not arrive via the
//!   trusted front door (503, nothing downstream runs).
//! - **`ExceptionHandler`** absorbs propagated infrastructure failures into
//!   fixed problem bodies and rewrites 429/401/403 bodies, preserving the
//!   status code.
//! - **`RequestLog`** sequences and times every admitted request from an
//!   explicitly owned atomic counter.
//!
//! Stages carry `Result<Response, ServiceError>` through the chain, so
//! infrastructure failures stay on the error channel until the exception
//! stage - the single absorption point - converts them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod context;
pub mod middleware;
pub mod pipeline;
pub mod stages;
pub mod types;

pub use context::PipelineContext;
pub use middleware::{BoxFuture, Middleware, Next};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use stages::{ApiGatewayGate, ExceptionHandler, RequestCounter, RequestLog};
pub use types::{PipelineResult, Request, Response, ResponseExt};
