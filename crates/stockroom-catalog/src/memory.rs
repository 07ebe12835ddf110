//! In-memory product store.
//!
//! All state sits behind a single [`parking_lot::Mutex`], so every mutation
//! runs in one critical section: the duplicate-name check and the write are
//! atomic with respect to each other, which is what makes the uniqueness
//! invariant hold under concurrent creates.

use crate::product::{Product, ProductDraft};
use crate::store::{BoxFuture, ProductFilter, ProductStore, StoreError};
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// Mutex-guarded in-memory [`ProductStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    rows: BTreeMap<u64, Product>,
}

impl State {
    fn name_taken(&self, name: &str, excluding: Option<u64>) -> bool {
        self.rows
            .values()
            .any(|p| p.name == name && Some(p.id) != excluding)
    }
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().rows.len()
    }

    /// Returns `true` when the store holds no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().rows.is_empty()
    }
}

impl ProductStore for MemoryStore {
    fn insert(&self, draft: ProductDraft) -> BoxFuture<'_, Result<Product, StoreError>> {
        Box::pin(async move {
            let mut state = self.state.lock();
            if state.name_taken(&draft.name, None) {
                return Err(StoreError::DuplicateName(draft.name));
            }
            state.next_id += 1;
            let product = draft.with_id(state.next_id);
            state.rows.insert(product.id, product.clone());
            Ok(product)
        })
    }

    fn replace(&self, product: Product) -> BoxFuture<'_, Result<Product, StoreError>> {
        Box::pin(async move {
            let mut state = self.state.lock();
            if !state.rows.contains_key(&product.id) {
                return Err(StoreError::MissingId(product.id));
            }
            if state.name_taken(&product.name, Some(product.id)) {
                return Err(StoreError::DuplicateName(product.name));
            }
            state.rows.insert(product.id, product.clone());
            Ok(product)
        })
    }

    fn remove(&self, id: u64) -> BoxFuture<'_, Result<Option<Product>, StoreError>> {
        Box::pin(async move { Ok(self.state.lock().rows.remove(&id)) })
    }

    fn find_by_id(&self, id: u64) -> BoxFuture<'_, Result<Option<Product>, StoreError>> {
        Box::pin(async move { Ok(self.state.lock().rows.get(&id).cloned()) })
    }

    fn find_by<'a>(
        &'a self,
        predicate: ProductFilter<'a>,
    ) -> BoxFuture<'a, Result<Option<Product>, StoreError>> {
        Box::pin(async move {
            let state = self.state.lock();
            Ok(state.rows.values().find(|p| predicate(p)).cloned())
        })
    }

    fn list_all(&self) -> BoxFuture<'_, Result<Vec<Product>, StoreError>> {
        Box::pin(async move { Ok(self.state.lock().rows.values().cloned().collect()) })
    }
}
