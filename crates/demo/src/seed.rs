//! Catalog seed data for the walkthrough.

use catalog::{CatalogStore, InMemoryCatalogStore, Product};
use common::{CategoryId, Money};

/// Seeds a small catalog and returns the created products.
pub async fn seed_catalog(catalog: &InMemoryCatalogStore) -> Vec<Product> {
    let electronics = CategoryId::new();
    let accessories = CategoryId::new();

    let definitions = [
        ("Laptop Pro 14", "SKU-LAP-014", 129_900, 95_000, 25, 5, electronics),
        ("Wireless Mouse", "SKU-MOU-001", 2_999, 1_200, 120, 20, accessories),
        ("Mechanical Keyboard", "SKU-KEY-087", 8_950, 5_100, 40, 10, accessories),
        ("4K Monitor 27\"", "SKU-MON-027", 39_900, 28_500, 12, 4, electronics),
        ("USB-C Dock", "SKU-DCK-003", 15_900, 9_800, 6, 8, accessories),
    ];

    let mut products = Vec::with_capacity(definitions.len());
    for (name, sku, price, cost, stock, min, category) in definitions {
        let product = catalog
            .create(
                Product::new(
                    name,
                    Money::from_cents(price),
                    Money::from_cents(cost),
                    category,
                )
                .with_sku(sku)
                .with_stock(stock)
                .with_stock_levels(min, 500),
            )
            .await
            .expect("seed product is valid");
        products.push(product);
    }

    tracing::info!(count = products.len(), "catalog seeded");
    products
}
