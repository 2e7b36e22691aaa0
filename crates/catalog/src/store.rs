//! Catalog store trait.

use async_trait::async_trait;
use common::ProductId;

use crate::Result;
use crate::product::Product;

/// A signed stock movement for one product.
///
/// Negative deltas consume stock, positive deltas restore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockAdjustment {
    pub product_id: ProductId,
    pub delta: i64,
}

impl StockAdjustment {
    /// Creates an adjustment.
    pub fn new(product_id: ProductId, delta: i64) -> Self {
        Self { product_id, delta }
    }
}

/// Authoritative store of products and their stock levels.
///
/// Implementations must make every adjust operation conditional: a delta
/// that would drive a quantity below zero is rejected before anything is
/// written, and concurrent adjustments of the same product serialize so
/// the rejected caller observes the other's committed quantity.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Reads a product snapshot, failing when it does not exist.
    async fn get(&self, product_id: ProductId) -> Result<Product>;

    /// Adds a product after validating its invariants and SKU uniqueness.
    async fn create(&self, product: Product) -> Result<Product>;

    /// Replaces a product record, re-running the create-time validation.
    async fn update(&self, product: Product) -> Result<Product>;

    /// Applies one signed stock movement and returns the updated product.
    ///
    /// Fails without writing when the product is missing or inactive, or
    /// when the delta would drive the quantity below zero.
    async fn adjust_stock(&self, product_id: ProductId, delta: i64) -> Result<Product>;

    /// Applies a set of stock movements, all or nothing.
    ///
    /// Every adjustment is validated against current state inside one
    /// exclusive critical section before any is applied; a single failure
    /// leaves every product untouched. Returns the updated products in
    /// adjustment order.
    async fn adjust_stock_batch(&self, adjustments: &[StockAdjustment]) -> Result<Vec<Product>>;

    /// Lists active products.
    async fn list_active(&self) -> Result<Vec<Product>>;

    /// Lists active products at or below their minimum stock threshold.
    async fn find_low_stock(&self) -> Result<Vec<Product>>;
}
