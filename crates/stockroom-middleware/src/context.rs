//! Pipeline context.
//!
//! [`PipelineContext`] is the mutable state that flows through the stages of
//! one request. The request-logging stage enriches it with the sequence
//! number; once assigned, the context can be frozen into an immutable
//! [`RequestContext`] for handlers.

use std::time::Instant;
use stockroom_core::RequestContext;

/// Mutable context for one pipeline invocation.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Sequence number, assigned once by the request-logging stage.
    sequence: Option<u64>,

    /// When this invocation started.
    started_at: Instant,
}

impl PipelineContext {
    /// Creates a fresh context.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sequence: None,
            started_at: Instant::now(),
        }
    }

    /// Returns the sequence number, if one has been assigned.
    #[must_use]
    pub const fn sequence(&self) -> Option<u64> {
        self.sequence
    }

    /// Assigns the sequence number.
    ///
    /// Called only by the request-logging stage, exactly once per request.
    pub fn set_sequence(&mut self, sequence: u64) {
        self.sequence = Some(sequence);
    }

    /// Returns when this invocation started.
    #[must_use]
    pub const fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Returns the elapsed time since the invocation started.
    #[must_use]
    pub fn elapsed(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    /// Freezes this context into the immutable per-request record.
    ///
    /// Returns `None` before the request-logging stage has assigned a
    /// sequence number.
    #[must_use]
    pub fn to_request_context(&self, method: &str, path: &str) -> Option<RequestContext> {
        self.sequence
            .map(|sequence| RequestContext::new(method, path, sequence))
    }
}

impl Default for PipelineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_starts_unassigned() {
        let ctx = PipelineContext::new();
        assert!(ctx.sequence().is_none());
        assert!(ctx.to_request_context("GET", "/products").is_none());
    }

    #[test]
    fn freezing_after_assignment() {
        let mut ctx = PipelineContext::new();
        ctx.set_sequence(3);

        let frozen = ctx.to_request_context("GET", "/products").unwrap();
        assert_eq!(frozen.sequence(), 3);
        assert_eq!(frozen.method(), "GET");
        assert_eq!(frozen.path(), "/products");
    }

    #[test]
    fn elapsed_advances() {
        let ctx = PipelineContext::new();
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(ctx.elapsed() >= std::time::Duration::from_millis(5));
    }
}
