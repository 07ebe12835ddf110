//! Ordered request pipeline.
//!
//! The pipeline is an explicit ordered list of stages composed into a
//! single object. Stages are wrapped back to front, so the first stage
//! added is the outermost: it sees the request first and the response last.
//!
//! Stockroom composes its stages as:
//!
//! ```text
//! Request → ApiGatewayGate → ExceptionHandler → RequestLog → handler
//! Response ←──────────────←─────────────────←────────────←───┘
//! ```
//!
//! The gate sits outside the exception stage on purpose: a rejected request
//! produces no instrumentation record and no classified error, just the
//! plain 503.

use crate::context::PipelineContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::stages::exception::{GENERIC_DETAIL, GENERIC_TITLE};
use crate::types::{PipelineResult, Request, Response};
use std::sync::Arc;
use stockroom_core::ProblemDetail;

/// A type-erased stage stored in the pipeline.
pub type BoxedMiddleware = Arc<dyn Middleware>;

/// An ordered, immutable chain of request-processing stages.
pub struct Pipeline {
    stages: Vec<BoxedMiddleware>,
}

impl Pipeline {
    /// Creates a new pipeline builder.
    #[must_use]
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Processes one request through every stage and the handler.
    ///
    /// Always resolves to a response. A failure that escapes the chain
    /// (possible only when no exception stage is installed) is logged and
    /// collapsed into the generic 500 problem body.
    pub async fn process<H>(
        &self,
        mut ctx: PipelineContext,
        request: Request,
        handler: H,
    ) -> Response
    where
        H: FnOnce(&mut PipelineContext, Request) -> BoxFuture<'static, PipelineResult>
            + Send
            + 'static,
    {
        let next = self.build_chain(handler);
        match next.run(&mut ctx, request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(error = ?error, "failure escaped the pipeline");
                ProblemDetail::new(GENERIC_TITLE, 500, GENERIC_DETAIL).into_response()
            }
        }
    }

    fn build_chain<'a, H>(&'a self, handler: H) -> Next<'a>
    where
        H: FnOnce(&mut PipelineContext, Request) -> BoxFuture<'static, PipelineResult>
            + Send
            + 'a,
    {
        let mut next = Next::handler(handler);
        for middleware in self.stages.iter().rev() {
            next = Next::new(middleware.as_ref(), next);
        }
        next
    }

    /// Returns the stage names in execution order.
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}

/// Builder for a [`Pipeline`].
pub struct PipelineBuilder {
    stages: Vec<BoxedMiddleware>,
}

impl PipelineBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Appends a stage. The first stage added runs outermost.
    #[must_use]
    pub fn stage<M: Middleware>(mut self, middleware: M) -> Self {
        self.stages.push(Arc::new(middleware));
        self
    }

    /// Builds the pipeline. Stage order is fixed from here on.
    #[must_use]
    pub fn build(self) -> Pipeline {
        Pipeline {
            stages: self.stages,
        }
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
