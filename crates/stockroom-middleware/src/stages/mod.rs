//! The three Stockroom pipeline stages, in execution order:
//!
//! 1. [`gateway`] - Reject requests that did not arrive via the API gateway
//! 2. [`exception`] - Classify failures and rewrite flagged status codes
//! 3. [`request_log`] - Sequence and time every admitted request

pub mod exception;
pub mod gateway;
pub mod request_log;

pub use exception::ExceptionHandler;
pub use gateway::ApiGatewayGate;
pub use request_log::{RequestCounter, RequestLog};
