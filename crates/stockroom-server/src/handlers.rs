//! Product API handlers.
//!
//! [`ProductApi::dispatch`] is the terminal handler of the pipeline: it
//! routes the request and executes the matching repository operation.
//!
//! Outcome mapping:
//! - mutations resolve to an [`Envelope`], serialized with 200 when
//!   `flag` is set and 400 when it is not;
//! - reads return the JSON entity or a fixed plain-text 404 body;
//! - infrastructure faults propagate as `Err` and are absorbed by the
//!   exception stage upstream.

use crate::router::{self, Route};
use http::StatusCode;
use http_body_util::BodyExt;
use serde::{Deserialize, Serialize};
use stockroom_catalog::{ProductDraft, ProductRepository, ProductStore};
use stockroom_core::{Envelope, ServiceError};
use stockroom_middleware::{PipelineResult, Request, Response, ResponseExt};

/// Body shape accepted by `POST /products` and `PUT /products/{id}`.
///
/// Quantity is signed on the wire so that a negative value is rejected
/// with a message instead of a deserialization error.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductPayload {
    /// Product name.
    pub name: String,
    /// Units in stock.
    pub quantity: i64,
    /// Unit price.
    pub price: f64,
}

impl ProductPayload {
    /// Validates the payload into a draft.
    ///
    /// # Errors
    ///
    /// Returns a business-failure [`Envelope`] naming the first violated
    /// rule: empty name, negative or out-of-range quantity, or a price
    /// that is negative or not a finite number.
    pub fn validate(&self) -> Result<ProductDraft, Envelope> {
        if self.name.trim().is_empty() {
            return Err(Envelope::fail("Product name is required"));
        }
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            if self.quantity < 0 {
                Envelope::fail("Product quantity must not be negative")
            } else {
                Envelope::fail("Product quantity is out of range")
            }
        })?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(Envelope::fail("Product price must not be negative"));
        }
        Ok(ProductDraft::new(self.name.clone(), quantity, self.price))
    }
}

/// The product API over a [`ProductStore`].
#[derive(Debug)]
pub struct ProductApi<S> {
    repository: ProductRepository<S>,
}

impl<S: ProductStore> ProductApi<S> {
    /// Creates the API over the given repository.
    pub fn new(repository: ProductRepository<S>) -> Self {
        Self { repository }
    }

    /// Routes and executes one request.
    pub async fn dispatch(&self, request: Request) -> PipelineResult {
        let route = router::resolve(request.method(), request.uri().path());

        match route {
            Route::ListProducts => self.list_products().await,
            Route::GetProduct(id) => self.get_product(id).await,
            Route::CreateProduct => self.create_product(request).await,
            Route::UpdateProduct(id) => self.update_product(id, request).await,
            Route::DeleteProduct(id) => self.delete_product(id).await,
            Route::Unknown => Ok(Response::plain_text(StatusCode::NOT_FOUND, "Not found")),
        }
    }

    async fn list_products(&self) -> PipelineResult {
        let products = self.repository.get_all().await?;
        if products.is_empty() {
            return Ok(Response::plain_text(
                StatusCode::NOT_FOUND,
                "No products detected in the database",
            ));
        }
        json_response(StatusCode::OK, &products)
    }

    async fn get_product(&self, id: u64) -> PipelineResult {
        match self.repository.find_by_id(id).await? {
            Some(product) => json_response(StatusCode::OK, &product),
            None => Ok(Response::plain_text(
                StatusCode::NOT_FOUND,
                "Product requested not found",
            )),
        }
    }

    async fn create_product(&self, request: Request) -> PipelineResult {
        let payload = match read_payload(request).await {
            Ok(payload) => payload,
            Err(response) => return Ok(response),
        };
        let draft = match payload.validate() {
            Ok(draft) => draft,
            Err(envelope) => return envelope_response(&envelope),
        };

        let envelope = self.repository.create(draft).await?;
        envelope_response(&envelope)
    }

    async fn update_product(&self, id: u64, request: Request) -> PipelineResult {
        if self.repository.find_by_id(id).await?.is_none() {
            return Ok(Response::plain_text(
                StatusCode::NOT_FOUND,
                &format!("Product with ID {id} not found"),
            ));
        }

        let payload = match read_payload(request).await {
            Ok(payload) => payload,
            Err(response) => return Ok(response),
        };
        let draft = match payload.validate() {
            Ok(draft) => draft,
            Err(envelope) => return envelope_response(&envelope),
        };

        let envelope = self.repository.update(draft.with_id(id)).await?;
        envelope_response(&envelope)
    }

    async fn delete_product(&self, id: u64) -> PipelineResult {
        match self.repository.find_by_id(id).await? {
            Some(existing) => {
                let envelope = self.repository.delete(existing).await?;
                envelope_response(&envelope)
            }
            None => Ok(Response::plain_text(
                StatusCode::NOT_FOUND,
                &format!("Product with ID {id} not found"),
            )),
        }
    }
}

/// Reads and parses the JSON request body.
///
/// A body that is not valid JSON for [`ProductPayload`] short-circuits to
/// a 400 envelope response.
async fn read_payload(request: Request) -> Result<ProductPayload, Response> {
    let bytes = match request.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(never) => match never {},
    };

    serde_json::from_slice(&bytes).map_err(|_| {
        Response::plain_text(StatusCode::BAD_REQUEST, "Invalid request body")
    })
}

fn json_response<T: Serialize>(status: StatusCode, value: &T) -> PipelineResult {
    let body = serde_json::to_vec(value)
        .map_err(|e| ServiceError::internal(format!("response serialization failed: {e}")))?;

    http::Response::builder()
        .status(status)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(http_body_util::Full::new(bytes::Bytes::from(body)))
        .map_err(|e| ServiceError::internal(format!("response construction failed: {e}")))
}

fn envelope_response(envelope: &Envelope) -> PipelineResult {
    let status = if envelope.flag {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    json_response(status, envelope)
}
