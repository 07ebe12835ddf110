//! API-gateway admission gate.
//!
//! Stockroom services are reachable only through a trusted front door. The
//! gateway stamps every forwarded request with the `Api-Gateway` header;
//! a request without it is answered 503 immediately. Nothing downstream
//! runs for a rejected request: no sequence number is assigned, no handler
//! or repository call happens.
//!
//! This is a pure admission filter: stateless, no retries, binary decision.

use crate::context::PipelineContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{PipelineResult, Request, Response, ResponseExt};
use http::StatusCode;

/// The trusted-origin marker header set by the API gateway.
pub const API_GATEWAY_HEADER: &str = "api-gateway";

/// Plain-text body returned to untrusted requests.
pub const UNAVAILABLE_BODY: &str = "Sorry, service is unavailable";

/// Stage that rejects requests lacking the trusted-origin marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiGatewayGate;

impl ApiGatewayGate {
    /// Creates the gate.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for ApiGatewayGate {
    fn name(&self) -> &'static str {
        "api_gateway_gate"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut PipelineContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, PipelineResult> {
        Box::pin(async move {
            if request.headers().get(API_GATEWAY_HEADER).is_none() {
                tracing::warn!(
                    http.path = %request.uri().path(),
                    "rejected request without gateway marker"
                );
                return Ok(Response::plain_text(
                    StatusCode::SERVICE_UNAVAILABLE,
                    UNAVAILABLE_BODY,
                ));
            }
            next.run(ctx, request).await
        })
    }
}
