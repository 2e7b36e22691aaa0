//! Catalog error types.

use common::{Money, ProductId};
use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Referenced product does not exist.
    #[error("Product not found: {0}")]
    NotFound(ProductId),

    /// Stock of an inactive product cannot be adjusted.
    #[error("Product is inactive: {name}")]
    ProductInactive { name: String },

    /// Requested consumption exceeds the available quantity.
    #[error("Insufficient stock for product: {name} (available {available}, requested {requested})")]
    InsufficientStock {
        name: String,
        available: u32,
        requested: u32,
    },

    /// SKU is already assigned to another product.
    #[error("SKU already exists: {0}")]
    DuplicateSku(String),

    /// Product name is empty.
    #[error("Product name is required")]
    EmptyName,

    /// Price must be strictly positive.
    #[error("Invalid price: {0} (must be greater than 0)")]
    InvalidPrice(Money),

    /// Stock thresholds are inconsistent.
    #[error("Invalid stock levels: min {min} exceeds max {max}, or max is 0")]
    InvalidStockLevels { min: u32, max: u32 },
}
