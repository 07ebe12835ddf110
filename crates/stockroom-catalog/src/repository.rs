//! Invariant-enforcing CRUD over the product store.
//!
//! Mutations always resolve to an [`Envelope`]; the error channel is
//! reserved for infrastructure faults. Reads have no business-failure shape,
//! so store faults propagate directly.
//!
//! The repository pre-checks names and ids to produce the friendly
//! messages, but correctness does not depend on those pre-checks: the store
//! rejects constraint violations at write time, and the repository maps
//! those rejections onto the same envelopes. The loser of a racing create
//! therefore gets the duplicate envelope, never a half-applied write.

use crate::product::{Product, ProductDraft};
use crate::store::{ProductFilter, ProductStore, StoreError};
use stockroom_core::{Envelope, ServiceError, ServiceResult};

/// Generic CRUD operations over a [`ProductStore`].
#[derive(Debug)]
pub struct ProductRepository<S> {
    store: S,
}

impl<S: ProductStore> ProductRepository<S> {
    /// Creates a repository over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Inserts a new product unless its name is already taken.
    pub async fn create(&self, draft: ProductDraft) -> ServiceResult<Envelope> {
        let by_name = |p: &Product| p.name == draft.name;
        if self
            .store
            .find_by(&by_name)
            .await
            .map_err(Into::<ServiceError>::into)?
            .is_some()
        {
            return Ok(Envelope::fail(format!("{} is already added", draft.name)));
        }

        match self.store.insert(draft).await {
            Ok(product) if product.id > 0 => Ok(Envelope::ok(format!(
                "{} is added to database successfully",
                product.name
            ))),
            Ok(product) => Ok(Envelope::fail(format!(
                "Error occured while adding {}",
                product.name
            ))),
            // Lost a race against a concurrent create for the same name.
            Err(StoreError::DuplicateName(name)) => {
                Ok(Envelope::fail(format!("{name} is already added")))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Replaces the stored product's fields, preserving uniqueness.
    pub async fn update(&self, product: Product) -> ServiceResult<Envelope> {
        if self
            .store
            .find_by_id(product.id)
            .await
            .map_err(Into::<ServiceError>::into)?
            .is_none()
        {
            return Ok(Envelope::fail(format!("{} not found", product.name)));
        }

        let clash = |p: &Product| p.name == product.name && p.id != product.id;
        if self
            .store
            .find_by(&clash)
            .await
            .map_err(Into::<ServiceError>::into)?
            .is_some()
        {
            return Ok(Envelope::fail(format!(
                "A product with the name '{}' already exists.",
                product.name
            )));
        }

        match self.store.replace(product.clone()).await {
            Ok(updated) => Ok(Envelope::ok(format!(
                "{} is updated successfully",
                updated.name
            ))),
            Err(StoreError::DuplicateName(name)) => Ok(Envelope::fail(format!(
                "A product with the name '{name}' already exists."
            ))),
            Err(StoreError::MissingId(_)) => {
                Ok(Envelope::fail(format!("{} not found", product.name)))
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Removes the product, failing softly when the id is absent.
    pub async fn delete(&self, product: Product) -> ServiceResult<Envelope> {
        match self
            .store
            .remove(product.id)
            .await
            .map_err(Into::<ServiceError>::into)?
        {
            Some(removed) => Ok(Envelope::ok(format!(
                "{} is deleted successfully",
                removed.name
            ))),
            None => Ok(Envelope::fail(format!("{} not found", product.name))),
        }
    }

    /// Looks up a product by id. Absence is `None`, never an error.
    pub async fn find_by_id(&self, id: u64) -> ServiceResult<Option<Product>> {
        self.store.find_by_id(id).await.map_err(Into::into)
    }

    /// Returns a snapshot of all products.
    pub async fn get_all(&self) -> ServiceResult<Vec<Product>> {
        self.store.list_all().await.map_err(Into::into)
    }

    /// Returns the first product matching an arbitrary predicate.
    pub async fn get_by(&self, predicate: ProductFilter<'_>) -> ServiceResult<Option<Product>> {
        self.store.find_by(predicate).await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::store::BoxFuture;
    use stockroom_core::ServiceError;

    fn repo() -> ProductRepository<MemoryStore> {
        ProductRepository::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn create_then_duplicate_create() {
        let repo = repo();

        let first = repo
            .create(ProductDraft::new("Phone", 10, 500.0))
            .await
            .unwrap();
        assert!(first.flag);
        assert_eq!(first.message, "Phone is added to database successfully");

        let second = repo
            .create(ProductDraft::new("Phone", 3, 450.0))
            .await
            .unwrap();
        assert!(!second.flag);
        assert_eq!(second.message, "Phone is already added");
        assert_eq!(repo.store().len(), 1);
    }

    #[tokio::test]
    async fn create_with_new_name_grows_store_by_one() {
        let repo = repo();
        repo.create(ProductDraft::new("Phone", 10, 500.0))
            .await
            .unwrap();

        let outcome = repo
            .create(ProductDraft::new("Laptop", 2, 1200.0))
            .await
            .unwrap();
        assert!(outcome.flag);
        assert_eq!(repo.store().len(), 2);
    }

    #[tokio::test]
    async fn update_missing_id_fails_softly() {
        let repo = repo();

        let outcome = repo
            .update(Product {
                id: 7,
                name: "Phone".into(),
                quantity: 1,
                price: 100.0,
            })
            .await
            .unwrap();
        assert!(!outcome.flag);
        assert_eq!(outcome.message, "Phone not found");
    }

    #[tokio::test]
    async fn update_rejects_name_held_by_another_id() {
        let repo = repo();
        repo.create(ProductDraft::new("Phone", 10, 500.0))
            .await
            .unwrap();
        repo.create(ProductDraft::new("Laptop", 2, 1200.0))
            .await
            .unwrap();

        let laptop = repo.get_by(&|p| p.name == "Laptop").await.unwrap().unwrap();
        let outcome = repo
            .update(Product {
                name: "Phone".into(),
                ..laptop
            })
            .await
            .unwrap();
        assert!(!outcome.flag);
        assert_eq!(
            outcome.message,
            "A product with the name 'Phone' already exists."
        );

        // Store unchanged.
        let still_laptop = repo.get_by(&|p| p.name == "Laptop").await.unwrap();
        assert!(still_laptop.is_some());
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let repo = repo();
        repo.create(ProductDraft::new("Phone", 10, 500.0))
            .await
            .unwrap();
        let phone = repo.get_by(&|p| p.name == "Phone").await.unwrap().unwrap();

        let outcome = repo
            .update(Product {
                quantity: 4,
                price: 480.0,
                ..phone.clone()
            })
            .await
            .unwrap();
        assert!(outcome.flag);
        assert_eq!(outcome.message, "Phone is updated successfully");

        let stored = repo.find_by_id(phone.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity, 4);
        assert_eq!(stored.price, 480.0);
    }

    #[tokio::test]
    async fn delete_missing_id_fails_softly() {
        let repo = repo();
        repo.create(ProductDraft::new("Phone", 10, 500.0))
            .await
            .unwrap();

        let outcome = repo
            .delete(Product {
                id: 99,
                name: "Phone".into(),
                quantity: 0,
                price: 0.0,
            })
            .await
            .unwrap();
        assert!(!outcome.flag);
        assert_eq!(outcome.message, "Phone not found");
        assert_eq!(repo.store().len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_the_product() {
        let repo = repo();
        repo.create(ProductDraft::new("Phone", 10, 500.0))
            .await
            .unwrap();
        let phone = repo.get_by(&|p| p.name == "Phone").await.unwrap().unwrap();

        let outcome = repo.delete(phone).await.unwrap();
        assert!(outcome.flag);
        assert_eq!(outcome.message, "Phone is deleted successfully");
        assert!(repo.store().is_empty());
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_absent() {
        let repo = repo();
        assert!(repo.find_by_id(123).await.unwrap().is_none());
    }

    /// Store double whose every operation fails with an infrastructure fault.
    struct UnreachableStore;

    impl ProductStore for UnreachableStore {
        fn insert(&self, _: ProductDraft) -> BoxFuture<'_, Result<Product, StoreError>> {
            Box::pin(async { Err(StoreError::unavailable("connection refused")) })
        }

        fn replace(&self, _: Product) -> BoxFuture<'_, Result<Product, StoreError>> {
            Box::pin(async { Err(StoreError::unavailable("connection refused")) })
        }

        fn remove(&self, _: u64) -> BoxFuture<'_, Result<Option<Product>, StoreError>> {
            Box::pin(async { Err(StoreError::unavailable("connection refused")) })
        }

        fn find_by_id(&self, _: u64) -> BoxFuture<'_, Result<Option<Product>, StoreError>> {
            Box::pin(async { Err(StoreError::Timeout("read deadline".into())) })
        }

        fn find_by<'a>(
            &'a self,
            _: ProductFilter<'a>,
        ) -> BoxFuture<'a, Result<Option<Product>, StoreError>> {
            Box::pin(async { Err(StoreError::unavailable("connection refused")) })
        }

        fn list_all(&self) -> BoxFuture<'_, Result<Vec<Product>, StoreError>> {
            Box::pin(async { Err(StoreError::unavailable("connection refused")) })
        }
    }

    #[tokio::test]
    async fn store_faults_propagate_instead_of_becoming_envelopes() {
        let repo = ProductRepository::new(UnreachableStore);

        let created = repo.create(ProductDraft::new("Phone", 1, 1.0)).await;
        assert!(matches!(created, Err(ServiceError::Store { .. })));

        let read = repo.find_by_id(1).await;
        assert!(matches!(read, Err(ServiceError::Timeout { .. })));

        let listed = repo.get_all().await;
        assert!(listed.is_err());
    }
}
