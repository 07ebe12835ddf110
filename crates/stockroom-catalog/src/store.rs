//! Store abstraction.
//!
//! [`ProductStore`] is the narrow interface the repository consumes. The
//! store owns the product records and provides at least read-your-writes
//! consistency. Uniqueness of names is a store-level constraint: `insert`
//! and `replace` reject duplicates at write time, so the invariant holds
//! even under concurrent mutations that would race a check-then-act
//! sequence at the repository level.

use crate::product::{Product, ProductDraft};
use std::future::Future;
use std::pin::Pin;
use stockroom_core::ServiceError;
use thiserror::Error;

/// A boxed future returned by store operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// An arbitrary field-comparison predicate over products.
pub type ProductFilter<'a> = &'a (dyn Fn(&Product) -> bool + Send + Sync);

/// Errors surfaced by a [`ProductStore`].
///
/// `DuplicateName` and `MissingId` are constraint rejections the repository
/// converts into business envelopes; the remaining variants are
/// infrastructure faults that propagate as [`ServiceError`].
#[derive(Error, Debug)]
pub enum StoreError {
    /// Another live product already holds this name.
    #[error("a product named '{0}' already exists")]
    DuplicateName(String),

    /// No product with this id exists.
    #[error("no product with id {0}")]
    MissingId(u64),

    /// The store did not answer within its time budget.
    #[error("store timeout: {0}")]
    Timeout(String),

    /// The store could not be reached or failed mid-operation.
    #[error("store unavailable: {message}")]
    Unavailable {
        /// Human-readable error message.
        message: String,
        /// The underlying fault.
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl StoreError {
    /// Creates an `Unavailable` error without a source.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            source: None,
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Timeout(message) => Self::timeout(message),
            StoreError::Unavailable { message, source } => Self::Store { message, source },
            // Constraint rejections are business outcomes; reaching here
            // means a caller skipped the repository's envelope mapping.
            other @ (StoreError::DuplicateName(_) | StoreError::MissingId(_)) => {
                Self::internal(other.to_string())
            }
        }
    }
}

/// Persistent collection of products consumed by the repository.
///
/// Implementations must serialize mutations (or enforce the name constraint
/// transactionally) so that at most one of any set of racing inserts for
/// the same name succeeds.
pub trait ProductStore: Send + Sync {
    /// Inserts a draft, assigning a fresh positive id.
    ///
    /// Rejects with [`StoreError::DuplicateName`] when a live product
    /// already holds the draft's name.
    fn insert(&self, draft: ProductDraft) -> BoxFuture<'_, Result<Product, StoreError>>;

    /// Replaces the stored product with `product.id`.
    ///
    /// Rejects with [`StoreError::MissingId`] when the id is absent and
    /// [`StoreError::DuplicateName`] when a different id holds the name.
    fn replace(&self, product: Product) -> BoxFuture<'_, Result<Product, StoreError>>;

    /// Removes the product with the given id, returning it if present.
    fn remove(&self, id: u64) -> BoxFuture<'_, Result<Option<Product>, StoreError>>;

    /// Looks up a product by id.
    fn find_by_id(&self, id: u64) -> BoxFuture<'_, Result<Option<Product>, StoreError>>;

    /// Returns the first product matching the predicate, if any.
    fn find_by<'a>(
        &'a self,
        predicate: ProductFilter<'a>,
    ) -> BoxFuture<'a, Result<Option<Product>, StoreError>>;

    /// Returns a snapshot of all products. The snapshot is not tracked for
    /// further mutation.
    fn list_all(&self) -> BoxFuture<'_, Result<Vec<Product>, StoreError>>;
}
