//! Core middleware trait and chaining types.
//!
//! Every pipeline stage implements [`Middleware`]. A stage receives the
//! mutable [`PipelineContext`], the incoming request, and a [`Next`]
//! callback; it may short-circuit by returning a result without calling
//! `next.run`, which is how the gateway gate rejects untrusted requests
//! before anything downstream exists.

use crate::context::PipelineContext;
use crate::types::{PipelineResult, Request};
use std::future::Future;
use std::pin::Pin;

/// A boxed future returned by middleware stages.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One stage of the request pipeline.
///
/// # Invariants
///
/// - A stage calls `next.run()` at most once.
/// - A stage that swallows a downstream `Err` must produce a well-formed
///   response in its place (only the exception stage does this).
pub trait Middleware: Send + Sync + 'static {
    /// Returns the unique name of this stage, used in logs.
    fn name(&self) -> &'static str;

    /// Processes the request through this stage.
    fn process<'a>(
        &'a self,
        ctx: &'a mut PipelineContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, PipelineResult>;
}

/// Callback to invoke the remainder of the chain.
///
/// Consumed by `run`, so a stage can only continue the chain once.
pub struct Next<'a> {
    inner: NextInner<'a>,
}

enum NextInner<'a> {
    Chain {
        middleware: &'a dyn Middleware,
        next: Box<Next<'a>>,
    },
    Handler(
        Box<
            dyn FnOnce(&mut PipelineContext, Request) -> BoxFuture<'static, PipelineResult>
                + Send
                + 'a,
        >,
    ),
}

impl<'a> Next<'a> {
    pub(crate) fn new(middleware: &'a dyn Middleware, next: Next<'a>) -> Self {
        Self {
            inner: NextInner::Chain {
                middleware,
                next: Box::new(next),
            },
        }
    }

    pub(crate) fn handler<F>(f: F) -> Self
    where
        F: FnOnce(&mut PipelineContext, Request) -> BoxFuture<'static, PipelineResult>
            + Send
            + 'a,
    {
        Self {
            inner: NextInner::Handler(Box::new(f)),
        }
    }

    /// Invokes the next stage or the terminal handler.
    pub async fn run(self, ctx: &mut PipelineContext, request: Request) -> PipelineResult {
        match self.inner {
            NextInner::Chain { middleware, next } => middleware.process(ctx, request, *next).await,
            NextInner::Handler(handler) => handler(ctx, request).await,
        }
    }
}
