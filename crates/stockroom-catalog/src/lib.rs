//! # Stockroom Catalog
//!
//! The catalog data layer: the [`Product`] entity, the [`ProductStore`]
//! abstraction over persistent storage, an in-memory store implementation,
//! and the invariant-enforcing [`ProductRepository`].
//!
//! ## Invariants
//!
//! - No two live products share a name (exact, case-sensitive match).
//! - Identifiers are positive and assigned by the store on insert.
//!
//! Uniqueness is enforced by the store at write time, inside its own
//! critical section, so it holds even when concurrent creates race on the
//! same name.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod memory;
mod product;
mod repository;
mod store;

pub use memory::MemoryStore;
pub use product::{Product, ProductDraft};
pub use repository::ProductRepository;
pub use store::{BoxFuture, ProductFilter, ProductStore, StoreError};
