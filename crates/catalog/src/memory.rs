//! In-memory catalog store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::ProductId;
use tokio::sync::RwLock;

use crate::Result;
use crate::error::CatalogError;
use crate::product::Product;
use crate::store::{CatalogStore, StockAdjustment};

/// In-memory catalog store.
///
/// Holds the write guard across validate-then-apply, which is what makes
/// batch adjustments all-or-nothing and serializes concurrent adjustments
/// of the same product. A relational implementation would use conditional
/// updates inside one transaction to satisfy the same contract.
#[derive(Clone, Default)]
pub struct InMemoryCatalogStore {
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
}

impl InMemoryCatalogStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of products stored.
    pub async fn product_count(&self) -> usize {
        self.products.read().await.len()
    }

    fn check_unique_sku(
        products: &HashMap<ProductId, Product>,
        candidate: &Product,
    ) -> Result<()> {
        if let Some(sku) = &candidate.sku {
            let taken = products
                .values()
                .any(|p| p.id != candidate.id && p.sku.as_deref() == Some(sku.as_str()));
            if taken {
                return Err(CatalogError::DuplicateSku(sku.clone()));
            }
        }
        Ok(())
    }

    /// Validates and applies a set of adjustments against `products`.
    ///
    /// Duplicate product ids in one batch accumulate: each delta is checked
    /// against the running quantity, so a batch can never sneak a quantity
    /// below zero through interleaved signs.
    fn apply_adjustments(
        products: &mut HashMap<ProductId, Product>,
        adjustments: &[StockAdjustment],
    ) -> Result<Vec<Product>> {
        let mut pending: HashMap<ProductId, i64> = HashMap::new();

        for adjustment in adjustments {
            let product = products
                .get(&adjustment.product_id)
                .ok_or(CatalogError::NotFound(adjustment.product_id))?;
            if !product.active {
                return Err(CatalogError::ProductInactive {
                    name: product.name.clone(),
                });
            }

            let current = pending
                .get(&adjustment.product_id)
                .copied()
                .unwrap_or(i64::from(product.stock_quantity));
            let new_quantity = current + adjustment.delta;
            if new_quantity < 0 {
                return Err(CatalogError::InsufficientStock {
                    name: product.name.clone(),
                    available: current as u32,
                    requested: (-adjustment.delta) as u32,
                });
            }
            pending.insert(adjustment.product_id, new_quantity);
        }

        let now = Utc::now();
        for (product_id, new_quantity) in &pending {
            if let Some(product) = products.get_mut(product_id) {
                product.stock_quantity = *new_quantity as u32;
                product.updated_at = now;
            }
        }

        metrics::counter!("catalog_stock_adjustments_total").increment(adjustments.len() as u64);

        Ok(adjustments
            .iter()
            .map(|a| products[&a.product_id].clone())
            .collect())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn get(&self, product_id: ProductId) -> Result<Product> {
        self.products
            .read()
            .await
            .get(&product_id)
            .cloned()
            .ok_or(CatalogError::NotFound(product_id))
    }

    async fn create(&self, product: Product) -> Result<Product> {
        product.validate()?;

        let mut products = self.products.write().await;
        Self::check_unique_sku(&products, &product)?;
        products.insert(product.id, product.clone());

        tracing::info!(product = %product.name, id = %product.id, "product created");
        Ok(product)
    }

    async fn update(&self, mut product: Product) -> Result<Product> {
        product.validate()?;

        let mut products = self.products.write().await;
        if !products.contains_key(&product.id) {
            return Err(CatalogError::NotFound(product.id));
        }
        Self::check_unique_sku(&products, &product)?;

        product.updated_at = Utc::now();
        products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn adjust_stock(&self, product_id: ProductId, delta: i64) -> Result<Product> {
        let mut products = self.products.write().await;
        Self::apply_adjustments(&mut products, &[StockAdjustment::new(product_id, delta)])?;
        products
            .get(&product_id)
            .cloned()
            .ok_or(CatalogError::NotFound(product_id))
    }

    async fn adjust_stock_batch(&self, adjustments: &[StockAdjustment]) -> Result<Vec<Product>> {
        let mut products = self.products.write().await;
        Self::apply_adjustments(&mut products, adjustments)
    }

    async fn list_active(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.values().filter(|p| p.active).cloned().collect())
    }

    async fn find_low_stock(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .filter(|p| p.active && p.is_low_stock())
            .cloned()
            .collect())
    }
}
