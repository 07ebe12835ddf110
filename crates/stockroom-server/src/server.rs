//! HTTP server.
//!
//! A hyper 1.x accept loop: bind, accept, spawn one task per connection,
//! serve HTTP/1.1 over [`TokioIo`]. Every request is buffered and pushed
//! through the middleware pipeline with [`ProductApi::dispatch`] as the
//! terminal handler, so the gateway gate, exception absorption, and
//! request sequencing apply uniformly.

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::handlers::ProductApi;
use bytes::Bytes;
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::Arc;
use stockroom_catalog::ProductStore;
use stockroom_middleware::{Pipeline, PipelineContext, Request, Response, ResponseExt};
use tokio::net::TcpListener;

/// The Stockroom HTTP server.
pub struct Server<S> {
    config: ServerConfig,
    pipeline: Arc<Pipeline>,
    api: Arc<ProductApi<S>>,
}

impl<S: ProductStore + 'static> Server<S> {
    /// Creates a server from its parts.
    pub fn new(config: ServerConfig, pipeline: Pipeline, api: ProductApi<S>) -> Self {
        Self {
            config,
            pipeline: Arc::new(pipeline),
            api: Arc::new(api),
        }
    }

    /// Returns a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Runs the server until interrupted.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured address is invalid or the
    /// listener cannot bind.
    pub async fn run(self) -> Result<(), ServerError> {
        let addr = self
            .config
            .socket_addr()
            .map_err(|source| ServerError::InvalidAddress {
                addr: self.config.http_addr().to_string(),
                source,
            })?;

        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;

        tracing::info!("Server listening on {}", addr);

        loop {
            tokio::select! {
                result = listener.accept() => {
                    match result {
                        Ok((stream, remote_addr)) => {
                            let pipeline = Arc::clone(&self.pipeline);
                            let api = Arc::clone(&self.api);

                            tokio::spawn(async move {
                                let io = TokioIo::new(stream);
                                let service = service_fn(move |req: http::Request<Incoming>| {
                                    let pipeline = Arc::clone(&pipeline);
                                    let api = Arc::clone(&api);
                                    async move {
                                        Ok::<_, Infallible>(
                                            handle_request(&pipeline, api, req).await,
                                        )
                                    }
                                });

                                if let Err(e) =
                                    http1::Builder::new().serve_connection(io, service).await
                                {
                                    tracing::error!(
                                        "Connection error from {}: {}",
                                        remote_addr,
                                        e
                                    );
                                }
                            });
                        }
                        Err(e) => {
                            tracing::error!("Failed to accept connection: {}", e);
                        }
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping server");
                    break;
                }
            }
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}

/// Buffers the request body and runs the request through the pipeline.
///
/// A body that cannot be read still enters the pipeline (with an empty
/// body), so the gate and instrumentation stages see every inbound
/// request; the terminal handler then answers 400 instead of dispatching.
async fn handle_request<S, B>(
    pipeline: &Pipeline,
    api: Arc<ProductApi<S>>,
    req: http::Request<B>,
) -> Response
where
    S: ProductStore + 'static,
    B: hyper::body::Body<Data = Bytes>,
    B::Error: std::fmt::Display,
{
    let (parts, body) = req.into_parts();
    let (bytes, body_ok) = match body.collect().await {
        Ok(collected) => (collected.to_bytes(), true),
        Err(e) => {
            tracing::warn!("Failed to read request body: {}", e);
            (Bytes::new(), false)
        }
    };
    let request: Request = http::Request::from_parts(parts, Full::new(bytes));

    pipeline
        .process(PipelineContext::new(), request, move |_ctx, request| {
            Box::pin(async move {
                if !body_ok {
                    return Ok(Response::plain_text(
                        StatusCode::BAD_REQUEST,
                        "Invalid request body",
                    ));
                }
                api.dispatch(request).await
            })
        })
        .await
}
