//! Infrastructure fault taxonomy.
//!
//! [`ServiceError`] covers the failures that are *not* business outcomes:
//! store connectivity, timeouts, cancellation, and anything else unexpected.
//! Business failures (duplicate name, missing id) are
//! [`Envelope`](crate::Envelope) values and never appear here.
//!
//! Only the exception stage converts these into client-visible output; every
//! other component just propagates them with `?`.

use thiserror::Error;

/// Result type alias using [`ServiceError`].
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Standard infrastructure error for Stockroom.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A store or downstream operation exceeded its time budget.
    #[error("Timeout: {message}")]
    Timeout {
        /// Human-readable error message.
        message: String,
    },

    /// The request or an inner task was cancelled.
    #[error("Cancelled: {message}")]
    Cancelled {
        /// Human-readable error message.
        message: String,
    },

    /// The entity store failed (connectivity, serialization fault).
    #[error("Store error: {message}")]
    Store {
        /// Human-readable error message.
        message: String,
        /// The underlying fault, kept server-side only.
        #[source]
        source: Option<anyhow::Error>,
    },

    /// Any other unexpected fault.
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message.
        message: String,
        /// The underlying fault, kept server-side only.
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl ServiceError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a cancellation error.
    #[must_use]
    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::Cancelled {
            message: message.into(),
        }
    }

    /// Creates a store error without a source.
    #[must_use]
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a store error wrapping an underlying fault.
    pub fn store_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Creates an internal error without a source.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an internal error wrapping an underlying fault.
    pub fn internal_with_source(
        message: impl Into<String>,
        source: impl Into<anyhow::Error>,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Returns `true` when this failure is a timeout or cancellation.
    ///
    /// The exception stage gives these a distinct client message.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Cancelled { .. })
    }
}
