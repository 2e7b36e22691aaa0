//! Order line items.

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// One product-quantity-price entry within an order.
///
/// The unit price is captured when the order is created and never re-read
/// from the catalog, so later price changes do not affect existing orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// The product being ordered.
    pub product_id: ProductId,

    /// Product name snapshot at order time.
    pub product_name: String,

    /// Units ordered, at least 1.
    pub quantity: u32,

    /// Price per unit at the time of the order.
    pub unit_price: Money,

    /// Line-level discount, subtracted from the line total only.
    pub discount: Money,

    /// Optional free-form note.
    pub notes: Option<String>,
}

impl LineItem {
    /// Creates a line item with no discount.
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: u32,
        unit_price: Money,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price,
            discount: Money::zero(),
            notes: None,
        }
    }

    /// Sets the line-level discount.
    pub fn with_discount(mut self, discount: Money) -> Self {
        self.discount = discount;
        self
    }

    /// Sets the note.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Price times quantity, before any discount.
    pub fn subtotal(&self) -> Money {
        self.unit_price * self.quantity
    }

    /// Line subtotal minus the line discount.
    pub fn total(&self) -> Money {
        self.subtotal() - self.discount
    }

    /// True when a discount applies to this line.
    pub fn has_discount(&self) -> bool {
        self.discount.is_positive()
    }

    /// Discount as a percentage of the line subtotal, zero when there is
    /// no discount.
    pub fn discount_percentage(&self) -> f64 {
        let subtotal = self.subtotal();
        if !self.has_discount() || subtotal.is_zero() {
            return 0.0;
        }
        self.discount.cents() as f64 / subtotal.cents() as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: u32, unit_cents: i64) -> LineItem {
        LineItem::new(
            ProductId::new(),
            "Widget",
            quantity,
            Money::from_cents(unit_cents),
        )
    }

    #[test]
    fn subtotal_is_price_times_quantity() {
        assert_eq!(item(3, 999).subtotal(), Money::from_cents(2997));
    }

    #[test]
    fn total_subtracts_discount() {
        let line = item(2, 1000).with_discount(Money::from_cents(300));
        assert_eq!(line.subtotal(), Money::from_cents(2000));
        assert_eq!(line.total(), Money::from_cents(1700));
    }

    #[test]
    fn discount_percentage_of_subtotal() {
        let line = item(2, 1000).with_discount(Money::from_cents(500));
        assert!((line.discount_percentage() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn no_discount_means_zero_percentage() {
        let line = item(2, 1000);
        assert!(!line.has_discount());
        assert_eq!(line.discount_percentage(), 0.0);
    }

    #[test]
    fn serialization_roundtrip() {
        let line = item(2, 999)
            .with_discount(Money::from_cents(100))
            .with_notes("gift wrap");
        let json = serde_json::to_string(&line).unwrap();
        let back: LineItem = serde_json::from_str(&json).unwrap();
        assert_eq!(line, back);
    }
}
