//! Client-facing problem body.
//!
//! [`ProblemDetail`] is the wire shape the exception stage emits when a
//! request fails abnormally or an upstream status code triggers a body
//! rewrite. The `detail` field carries a fixed, operator-approved message;
//! raw fault text never appears here.

use bytes::Bytes;
use http_body_util::Full;
use serde::{Deserialize, Serialize};

/// Structured `{title, status, detail}` payload returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetail {
    /// Short classification of the problem.
    pub title: String,
    /// HTTP status code carried in the body.
    pub status: u16,
    /// Human-readable detail, safe for clients.
    pub detail: String,
}

impl ProblemDetail {
    /// Creates a problem body.
    #[must_use]
    pub fn new(title: impl Into<String>, status: u16, detail: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status,
            detail: detail.into(),
        }
    }

    /// Renders this problem as an `application/json` HTTP response.
    ///
    /// The response status matches [`ProblemDetail::status`].
    #[must_use]
    pub fn into_response(self) -> http::Response<Full<Bytes>> {
        let body = serde_json::to_string(&self).unwrap_or_else(|_| {
            // ProblemDetail is plain data; serialization cannot realistically
            // fail, but the response must still be well formed.
            String::from("{\"title\":\"Error\",\"status\":500,\"detail\":\"\"}")
        });

        http::Response::builder()
            .status(self.status)
            .header(http::header::CONTENT_TYPE, "application/json")
            .body(Full::new(Bytes::from(body)))
            .expect("problem response is well formed")
    }
}
