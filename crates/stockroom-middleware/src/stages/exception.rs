//! Exception-handling stage.
//!
//! Wraps everything downstream of the gateway gate. Two distinct paths:
//!
//! - **Normal completion**: specific outbound status codes (429, 401, 403)
//!   get their body rewritten to a [`ProblemDetail`] while the status code
//!   itself is preserved.
//! - **Abnormal completion**: a propagated [`ServiceError`] is logged with
//!   full detail to the operator-facing log and absorbed; the client sees
//!   only the fixed timeout or generic problem body. The stage never
//!   re-raises, so the pipeline always completes with a structured response.

use crate::context::PipelineContext;
use crate::middleware::{BoxFuture, Middleware, Next};
use crate::types::{PipelineResult, Request, Response};
use http::StatusCode;
use stockroom_core::ProblemDetail;

/// Title of the generic internal-error problem body.
pub const GENERIC_TITLE: &str = "Error";

/// Detail of the generic internal-error problem body.
pub const GENERIC_DETAIL: &str = "Sorry, internal server error occurred. Kindly try again";

/// Title of the timeout problem body.
pub const TIMEOUT_TITLE: &str = "Time out";

/// Detail of the timeout problem body.
pub const TIMEOUT_DETAIL: &str = "Request time out!!!Please try again";

/// Stage that classifies failures and rewrites flagged status codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExceptionHandler;

impl ExceptionHandler {
    /// Creates the stage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Rewrites the body of rate-limited and access-denied responses.
    ///
    /// The original status code is preserved; only the body becomes a
    /// problem detail.
    fn rewrite_flagged_status(response: Response) -> Response {
        let status = response.status();
        let problem = match status {
            StatusCode::TOO_MANY_REQUESTS => {
                ProblemDetail::new("Warning", status.as_u16(), "To many request made.")
            }
            StatusCode::UNAUTHORIZED => {
                ProblemDetail::new("Alert", status.as_u16(), "You are not authorized to access.")
            }
            StatusCode::FORBIDDEN => ProblemDetail::new(
                "Out of access.",
                status.as_u16(),
                "You are not allowed/required to access.",
            ),
            _ => return response,
        };
        problem.into_response()
    }
}

impl Middleware for ExceptionHandler {
    fn name(&self) -> &'static str {
        "exception_handler"
    }

    fn process<'a>(
        &'a self,
        ctx: &'a mut PipelineContext,
        request: Request,
        next: Next<'a>,
    ) -> BoxFuture<'a, PipelineResult> {
        Box::pin(async move {
            match next.run(ctx, request).await {
                Ok(response) => Ok(Self::rewrite_flagged_status(response)),
                Err(error) => {
                    // Full original detail goes to the operator log only.
                    tracing::error!(error = ?error, "request failed");

                    let problem = if error.is_timeout() {
                        ProblemDetail::new(TIMEOUT_TITLE, 408, TIMEOUT_DETAIL)
                    } else {
                        ProblemDetail::new(GENERIC_TITLE, 500, GENERIC_DETAIL)
                    };
                    Ok(problem.into_response())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::{Request as HttpRequest, Response as HttpResponse};
    use http_body_util::{BodyExt, Full};
    use stockroom_core::ServiceError;

    fn request() -> Request {
        HttpRequest::builder()
            .uri("/products")
            .body(Full::new(Bytes::new()))
            .unwrap()
    }

    fn status_handler(
        status: StatusCode,
    ) -> impl FnOnce(&mut PipelineContext, Request) -> BoxFuture<'static, PipelineResult> {
        move |_ctx, _req| {
            Box::pin(async move {
                Ok(HttpResponse::builder()
                    .status(status)
                    .body(Full::new(Bytes::from("original body")))
                    .unwrap())
            })
        }
    }

    fn failing_handler(
        error: ServiceError,
    ) -> impl FnOnce(&mut PipelineContext, Request) -> BoxFuture<'static, PipelineResult> {
        move |_ctx, _req| Box::pin(async move { Err(error) })
    }

    async fn problem_from(response: Response) -> ProblemDetail {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).expect("problem body")
    }

    #[tokio::test]
    async fn success_passes_through_untouched() {
        let stage = ExceptionHandler::new();
        let mut ctx = PipelineContext::new();

        let response = stage
            .process(&mut ctx, request(), Next::handler(status_handler(StatusCode::OK)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"original body");
    }

    #[tokio::test]
    async fn rate_limited_body_is_rewritten_status_preserved() {
        let stage = ExceptionHandler::new();
        let mut ctx = PipelineContext::new();

        let response = stage
            .process(
                &mut ctx,
                request(),
                Next::handler(status_handler(StatusCode::TOO_MANY_REQUESTS)),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let problem = problem_from(response).await;
        assert_eq!(problem.title, "Warning");
        assert_eq!(problem.status, 429);
        assert_eq!(problem.detail, "To many request made.");
    }

    #[tokio::test]
    async fn unauthorized_becomes_alert_with_status_preserved() {
        let stage = ExceptionHandler::new();
        let mut ctx = PipelineContext::new();

        let response = stage
            .process(
                &mut ctx,
                request(),
                Next::handler(status_handler(StatusCode::UNAUTHORIZED)),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let problem = problem_from(response).await;
        assert_eq!(problem.title, "Alert");
        assert_eq!(problem.status, 401);
    }

    #[tokio::test]
    async fn forbidden_becomes_out_of_access() {
        let stage = ExceptionHandler::new();
        let mut ctx = PipelineContext::new();

        let response = stage
            .process(
                &mut ctx,
                request(),
                Next::handler(status_handler(StatusCode::FORBIDDEN)),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let problem = problem_from(response).await;
        assert_eq!(problem.title, "Out of access.");
        assert_eq!(problem.detail, "You are not allowed/required to access.");
    }

    #[tokio::test]
    async fn timeout_failure_becomes_408() {
        let stage = ExceptionHandler::new();
        let mut ctx = PipelineContext::new();

        let response = stage
            .process(
                &mut ctx,
                request(),
                Next::handler(failing_handler(ServiceError::timeout("store deadline"))),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let problem = problem_from(response).await;
        assert_eq!(problem.title, TIMEOUT_TITLE);
        assert_eq!(problem.detail, TIMEOUT_DETAIL);
    }

    #[tokio::test]
    async fn cancellation_is_classified_with_timeouts() {
        let stage = ExceptionHandler::new();
        let mut ctx = PipelineContext::new();

        let response = stage
            .process(
                &mut ctx,
                request(),
                Next::handler(failing_handler(ServiceError::cancelled("client gone"))),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn other_failures_become_generic_500_without_leaking_detail() {
        let stage = ExceptionHandler::new();
        let mut ctx = PipelineContext::new();

        let raw = "password=hunter2 leaked in a stack trace";
        let response = stage
            .process(
                &mut ctx,
                request(),
                Next::handler(failing_handler(ServiceError::internal_with_source(
                    "store exploded",
                    anyhow::anyhow!(raw),
                ))),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let problem = problem_from(response).await;
        assert_eq!(problem.title, GENERIC_TITLE);
        assert_eq!(problem.detail, GENERIC_DETAIL);
        assert!(!problem.detail.contains("hunter2"));
    }
}
