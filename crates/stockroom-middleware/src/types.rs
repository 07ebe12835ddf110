//! Common types used throughout the request pipeline.

use bytes::Bytes;
use http_body_util::Full;
use stockroom_core::ServiceError;

/// The HTTP request type used in the pipeline.
pub type Request = http::Request<Full<Bytes>>;

/// The HTTP response type used in the pipeline.
pub type Response = http::Response<Full<Bytes>>;

/// Result of one pipeline stage or the terminal handler.
///
/// Infrastructure failures travel as `Err` until the exception stage
/// absorbs them; expected business outcomes are always `Ok` responses.
pub type PipelineResult = Result<Response, ServiceError>;

/// Extension trait for building plain-text responses.
pub trait ResponseExt {
    /// Creates a plain-text response with the given status code.
    fn plain_text(status: http::StatusCode, message: &str) -> Response;
}

impl ResponseExt for Response {
    fn plain_text(status: http::StatusCode, message: &str) -> Response {
        http::Response::builder()
            .status(status)
            .header(http::header::CONTENT_TYPE, "text/plain; charset=utf-8")
            .body(Full::new(Bytes::from(message.to_string())))
            .expect("failed to build plain-text response")
    }
}
