//! Request instrumentation stage.
//!
//! Assigns every admitted request a monotonically increasing sequence
//! number from a process-wide [`RequestCounter`], then logs a start event,
//! a completion event, and a separate line echoing the sequence number and
//! the current date.
//!
//! The counter is an explicitly owned atomic constructed once at process
//! start and handed to the stage at construction; there is no ambient
//! global. `fetch_add` makes the increment atomic, so concurrent requests
//! never observe duplicate or lost sequence numbers.

use crate::context::PipelineContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{PipelineResult, Request};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Process-wide monotonic request counter.
#[derive(Debug, Default)]
pub struct RequestCounter(AtomicU64);

impl RequestCounter {
    /// Creates a counter starting at zero; the first request gets 1.
    #[must_use]
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    /// Atomically claims the next sequence number.
    pub fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns the number of requests sequenced so far.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

/// Stage that sequences and logs every admitted request.
#[derive(Debug, Clone)]
pub struct RequestLog {
    counter: Arc<RequestCounter>,
}

impl RequestLog {
    /// Creates the stage around a shared counter.
    #[must_use]
    pub fn new(counter: Arc<RequestCounter>) -> Self {
        Self { counter }
    }
}

impl Middleware for RequestLog {
    fn name(&self) -> &'static str {
        "request_log"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut PipelineContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, PipelineResult> {
        Box::pin(async move {
            let sequence = self.counter.next();
            ctx.set_sequence(sequence);

            let method = request.method().to_string();
            let path = request.uri().path().to_string();

            tracing::info!(http.method = %method, http.path = %path, "Received request");

            // A propagated failure skips the completion lines; the
            // exception stage owns its logging.
            let response = next.run(ctx, request).await?;

            tracing::info!(http.method = %method, http.path = %path, "Completed request");
            if let Some(record) = ctx.to_request_context(&method, &path) {
                tracing::info!(
                    sequence = record.sequence(),
                    http.method = %record.method(),
                    http.path = %record.path(),
                    date = %chrono::Local::now().format("%Y-%m-%d"),
                    "Request sequenced"
                );
            }

            Ok(response)
        })
    }
}
