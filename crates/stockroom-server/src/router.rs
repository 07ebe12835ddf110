//! Request routing.
//!
//! The product surface is small and fixed, so routing is a direct match
//! over method and path segments rather than a registration table. A path
//! id that is not a valid integer falls through to [`Route::Unknown`].

use http::Method;

/// A resolved route over the product API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `GET /products`
    ListProducts,
    /// `GET /products/{id}`
    GetProduct(u64),
    /// `POST /products`
    CreateProduct,
    /// `PUT /products/{id}`
    UpdateProduct(u64),
    /// `DELETE /products/{id}`
    DeleteProduct(u64),
    /// Anything else.
    Unknown,
}

/// Resolves a method and path to a [`Route`].
#[must_use]
pub fn resolve(method: &Method, path: &str) -> Route {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method, segments.as_slice()) {
        (m, ["products"]) if m == Method::GET => Route::ListProducts,
        (m, ["products"]) if m == Method::POST => Route::CreateProduct,
        (m, ["products", id]) if m == Method::GET => {
            id.parse().map_or(Route::Unknown, Route::GetProduct)
        }
        (m, ["products", id]) if m == Method::PUT => {
            id.parse().map_or(Route::Unknown, Route::UpdateProduct)
        }
        (m, ["products", id]) if m == Method::DELETE => {
            id.parse().map_or(Route::Unknown, Route::DeleteProduct)
        }
        _ => Route::Unknown,
    }
}
