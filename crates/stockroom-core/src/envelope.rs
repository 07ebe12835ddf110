//! Mutation outcome envelope.
//!
//! Every repository mutation resolves to an [`Envelope`] - a success flag
//! plus a human-readable message. Expected business failures (duplicate
//! name, missing id) are envelopes with `flag == false`, never errors.

use serde::{Deserialize, Serialize};

/// Uniform result of a business mutation.
///
/// # Example
///
/// ```
/// use stockroom_core::Envelope;
///
/// let ok = Envelope::ok("Phone is added to database successfully");
/// assert!(ok.flag);
///
/// let dup = Envelope::fail("Phone is already added");
/// assert!(!dup.flag);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Whether the mutation succeeded.
    pub flag: bool,
    /// Human-readable outcome message.
    pub message: String,
}

impl Envelope {
    /// Creates a success envelope.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            flag: true,
            message: message.into(),
        }
    }

    /// Creates a business-failure envelope.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            flag: false,
            message: message.into(),
        }
    }
}
