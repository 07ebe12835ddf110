//! Stockroom service binary.
//!
//! Wires the pieces together: logging, the in-memory store, the
//! repository, the request pipeline, and the HTTP server.

use std::sync::Arc;
use stockroom_catalog::{MemoryStore, ProductRepository};
use stockroom_middleware::{
    ApiGatewayGate, ExceptionHandler, Pipeline, RequestCounter, RequestLog,
};
use stockroom_server::{ProductApi, Server, ServerConfig};
use stockroom_telemetry::{init_logging, LogConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(&LogConfig::default())?;

    let config = ServerConfig::from_env();
    let counter = Arc::new(RequestCounter::new());

    let pipeline = Pipeline::builder()
        .stage(ApiGatewayGate::new())
        .stage(ExceptionHandler::new())
        .stage(RequestLog::new(Arc::clone(&counter)))
        .build();

    let api = ProductApi::new(ProductRepository::new(MemoryStore::new()));

    Server::new(config, pipeline, api).run().await?;
    Ok(())
}
