//! Per-request context.
//!
//! [`RequestContext`] is the immutable record the request-logging stage
//! produces once the sequence number is assigned. It lives for the duration
//! of one request and is discarded at request end.

/// Immutable per-request record: method, path, and the sequence number
/// assigned by the request-logging stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    method: String,
    path: String,
    sequence: u64,
}

impl RequestContext {
    /// Creates a request context.
    #[must_use]
    pub fn new(method: impl Into<String>, path: impl Into<String>, sequence: u64) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            sequence,
        }
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Returns the request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the sequence number assigned to this request.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_return_constructed_values() {
        let ctx = RequestContext::new("GET", "/products", 7);
        assert_eq!(ctx.method(), "GET");
        assert_eq!(ctx.path(), "/products");
        assert_eq!(ctx.sequence(), 7);
    }
}
