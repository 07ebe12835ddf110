//! The catalog entity.

use serde::{Deserialize, Serialize};

/// A catalog product.
///
/// The `id` is assigned by the store on insert and is always positive for
/// stored products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: u64,
    /// Product name, unique among live products.
    pub name: String,
    /// Units in stock.
    pub quantity: u32,
    /// Unit price, non-negative.
    pub price: f64,
}

/// A product awaiting insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// Product name.
    pub name: String,
    /// Units in stock.
    pub quantity: u32,
    /// Unit price.
    pub price: f64,
}

impl ProductDraft {
    /// Creates a draft.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            price,
        }
    }

    /// Materializes this draft with a store-assigned id.
    #[must_use]
    pub fn with_id(self, id: u64) -> Product {
        Product {
            id,
            name: self.name,
            quantity: self.quantity,
            price: self.price,
        }
    }
}
