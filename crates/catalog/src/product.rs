//! Product model and stock threshold predicates.

use chrono::{DateTime, Utc};
use common::{CategoryId, Money, ProductId};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// A product in the catalog.
///
/// Stock quantity is unsigned; it only changes through the catalog store's
/// conditional adjust operations, which reject any result below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Optional longer description.
    pub description: Option<String>,

    /// Optional secondary identifier, unique across the catalog when set.
    pub sku: Option<String>,

    /// Selling price per unit.
    pub price: Money,

    /// Acquisition cost per unit.
    pub cost_price: Money,

    /// Units currently on hand.
    pub stock_quantity: u32,

    /// Reorder threshold; at or below it the product counts as low stock.
    pub min_stock_level: u32,

    /// Capacity threshold; at or above it the product counts as overstocked.
    pub max_stock_level: u32,

    /// Category the product belongs to.
    pub category_id: CategoryId,

    /// Inactive products are hidden from ordering and stock adjustment.
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates an active product with default thresholds and no stock.
    pub fn new(
        name: impl Into<String>,
        price: Money,
        cost_price: Money,
        category_id: CategoryId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            name: name.into(),
            description: None,
            sku: None,
            price,
            cost_price,
            stock_quantity: 0,
            min_stock_level: 0,
            max_stock_level: 1000,
            category_id,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the SKU.
    pub fn with_sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial stock quantity.
    pub fn with_stock(mut self, quantity: u32) -> Self {
        self.stock_quantity = quantity;
        self
    }

    /// Sets the minimum and maximum stock thresholds.
    pub fn with_stock_levels(mut self, min: u32, max: u32) -> Self {
        self.min_stock_level = min;
        self.max_stock_level = max;
        self
    }

    /// Checks the invariants enforced at create/update time.
    ///
    /// Stock mutations do not re-run these checks; they only guard the
    /// quantity itself.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if !self.price.is_positive() {
            return Err(CatalogError::InvalidPrice(self.price));
        }
        if self.max_stock_level < 1 || self.min_stock_level > self.max_stock_level {
            return Err(CatalogError::InvalidStockLevels {
                min: self.min_stock_level,
                max: self.max_stock_level,
            });
        }
        Ok(())
    }

    /// True when stock is at or below the minimum threshold.
    pub fn is_low_stock(&self) -> bool {
        self.stock_quantity <= self.min_stock_level
    }

    /// True when there is no stock at all.
    pub fn is_out_of_stock(&self) -> bool {
        self.stock_quantity == 0
    }

    /// True when stock is at or above the maximum threshold.
    pub fn is_overstocked(&self) -> bool {
        self.stock_quantity >= self.max_stock_level
    }

    /// Per-unit profit.
    pub fn profit_amount(&self) -> Money {
        self.price - self.cost_price
    }

    /// Per-unit profit as a fraction of cost, zero when cost is zero.
    pub fn profit_margin(&self) -> f64 {
        if self.cost_price.is_zero() {
            return 0.0;
        }
        self.profit_amount().cents() as f64 / self.cost_price.cents() as f64
    }
}
