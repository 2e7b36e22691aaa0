//! Order aggregate.

use chrono::{DateTime, Utc};
use common::{Money, OrderId, ProductId, UserId};
use serde::{Deserialize, Serialize};

use crate::error::OrderError;
use crate::line_item::LineItem;
use crate::status::{OrderStatus, PaymentMethod, PaymentStatus};

/// Customer contact fields captured on the order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub shipping_address: Option<String>,
}

impl CustomerDetails {
    /// Creates customer details with just a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Sets the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Sets the shipping address.
    pub fn with_shipping_address(mut self, address: impl Into<String>) -> Self {
        self.shipping_address = Some(address.into());
        self
    }
}

/// Order aggregate root.
///
/// Owns its line items exclusively and keeps the monetary fields
/// consistent: `subtotal` is recomputed from the line items on every
/// mutation of the set, and `total_amount = subtotal + tax − discount`.
/// Status changes go through [`Order::transition_to`], which enforces the
/// state machine in [`OrderStatus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    order_number: String,
    placed_by: UserId,
    customer: CustomerDetails,
    order_status: OrderStatus,
    payment_status: PaymentStatus,
    payment_method: Option<PaymentMethod>,
    subtotal: Money,
    tax_amount: Money,
    discount_amount: Money,
    total_amount: Money,
    line_items: Vec<LineItem>,
    notes: String,
    order_date: DateTime<Utc>,
    shipped_date: Option<DateTime<Utc>>,
    delivered_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates an empty `Pending`/`Pending` order.
    pub fn new(
        order_number: impl Into<String>,
        placed_by: UserId,
        customer: CustomerDetails,
        payment_method: Option<PaymentMethod>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::new(),
            order_number: order_number.into(),
            placed_by,
            customer,
            order_status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method,
            subtotal: Money::zero(),
            tax_amount: Money::zero(),
            discount_amount: Money::zero(),
            total_amount: Money::zero(),
            line_items: Vec::new(),
            notes: String::new(),
            order_date: now,
            shipped_date: None,
            delivered_date: None,
            created_at: now,
            updated_at: now,
        }
    }
}

// Query methods
impl Order {
    pub fn id(&self) -> OrderId {
        self.id
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    /// The user the order is attributed to.
    pub fn placed_by(&self) -> UserId {
        self.placed_by
    }

    pub fn customer(&self) -> &CustomerDetails {
        &self.customer
    }

    pub fn order_status(&self) -> OrderStatus {
        self.order_status
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    pub fn tax_amount(&self) -> Money {
        self.tax_amount
    }

    pub fn discount_amount(&self) -> Money {
        self.discount_amount
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn order_date(&self) -> DateTime<Utc> {
        self.order_date
    }

    pub fn shipped_date(&self) -> Option<DateTime<Utc>> {
        self.shipped_date
    }

    pub fn delivered_date(&self) -> Option<DateTime<Utc>> {
        self.delivered_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// True iff the order is delivered and paid.
    pub fn is_completed(&self) -> bool {
        self.order_status == OrderStatus::Delivered && self.payment_status == PaymentStatus::Paid
    }

    /// True iff the order was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.order_status == OrderStatus::Cancelled
    }
}

// Mutations
impl Order {
    /// Appends a line item and recomputes the totals.
    pub fn add_line_item(&mut self, item: LineItem) -> Result<(), OrderError> {
        if item.quantity < 1 {
            return Err(OrderError::InvalidQuantity(item.quantity));
        }
        if !item.unit_price.is_positive() {
            return Err(OrderError::InvalidUnitPrice(item.unit_price));
        }
        if item.discount.is_negative() {
            return Err(OrderError::InvalidDiscount(item.discount));
        }

        self.line_items.push(item);
        self.recalculate_totals();
        Ok(())
    }

    /// Removes the line item for a product and recomputes the totals.
    pub fn remove_line_item(&mut self, product_id: &ProductId) -> Result<LineItem, OrderError> {
        let index = self
            .line_items
            .iter()
            .position(|item| item.product_id == *product_id)
            .ok_or(OrderError::ItemNotFound(*product_id))?;

        let removed = self.line_items.remove(index);
        self.recalculate_totals();
        Ok(removed)
    }

    /// Sets the order-level tax and discount and recomputes the total.
    pub fn set_charges(&mut self, tax_amount: Money, discount_amount: Money) {
        self.tax_amount = tax_amount;
        self.discount_amount = discount_amount;
        self.recalculate_totals();
    }

    /// Applies a status transition.
    ///
    /// Stamps `shipped_date`/`delivered_date` on the first transition to
    /// `Shipped`/`Delivered` only; repeating a status never overwrites an
    /// existing stamp.
    pub fn transition_to(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.order_status.can_transition_to(next) {
            return Err(OrderError::InvalidStateTransition {
                from: self.order_status,
                to: next,
            });
        }

        let now = Utc::now();
        match next {
            OrderStatus::Shipped if self.shipped_date.is_none() => {
                self.shipped_date = Some(now);
            }
            OrderStatus::Delivered if self.delivered_date.is_none() => {
                self.delivered_date = Some(now);
            }
            _ => {}
        }

        self.order_status = next;
        self.updated_at = now;
        Ok(())
    }

    /// Sets the payment status; the axis carries no transition rules.
    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        self.payment_status = status;
        self.updated_at = Utc::now();
    }

    /// Appends a note, newline-joined. Blank notes are ignored.
    pub fn append_note(&mut self, note: &str) {
        let note = note.trim();
        if note.is_empty() {
            return;
        }
        if !self.notes.is_empty() {
            self.notes.push('\n');
        }
        self.notes.push_str(note);
        self.updated_at = Utc::now();
    }

    fn recalculate_totals(&mut self) {
        self.subtotal = self.line_items.iter().map(LineItem::subtotal).sum();
        self.total_amount = self.subtotal + self.tax_amount - self.discount_amount;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_order() -> Order {
        Order::new(
            "ORD-TEST-1",
            UserId::new(),
            CustomerDetails::named("Ada"),
            Some(PaymentMethod::Cash),
        )
    }

    fn line(quantity: u32, unit_cents: i64) -> LineItem {
        LineItem::new(
            ProductId::new(),
            "Widget",
            quantity,
            Money::from_cents(unit_cents),
        )
    }

    #[test]
    fn new_order_starts_pending_with_zero_totals() {
        let order = empty_order();
        assert_eq!(order.order_status(), OrderStatus::Pending);
        assert_eq!(order.payment_status(), PaymentStatus::Pending);
        assert!(order.subtotal().is_zero());
        assert!(order.total_amount().is_zero());
        assert!(order.line_items().is_empty());
        assert!(order.shipped_date().is_none());
        assert!(order.delivered_date().is_none());
    }

    #[test]
    fn adding_items_recomputes_totals() {
        let mut order = empty_order();
        order.add_line_item(line(3, 999)).unwrap();
        order.add_line_item(line(1, 500)).unwrap();

        assert_eq!(order.subtotal(), Money::from_cents(3497));
        assert_eq!(order.total_amount(), Money::from_cents(3497));
    }

    #[test]
    fn removing_an_item_recomputes_totals() {
        let mut order = empty_order();
        let keep = line(2, 1000);
        let drop = line(1, 500);
        let drop_id = drop.product_id;
        order.add_line_item(keep).unwrap();
        order.add_line_item(drop).unwrap();

        let removed = order.remove_line_item(&drop_id).unwrap();
        assert_eq!(removed.product_id, drop_id);
        assert_eq!(order.subtotal(), Money::from_cents(2000));
        assert_eq!(order.line_items().len(), 1);
    }

    #[test]
    fn removing_unknown_item_fails() {
        let mut order = empty_order();
        let result = order.remove_line_item(&ProductId::new());
        assert!(matches!(result, Err(OrderError::ItemNotFound(_))));
    }

    #[test]
    fn line_discounts_do_not_affect_order_subtotal() {
        let mut order = empty_order();
        order
            .add_line_item(line(2, 1000).with_discount(Money::from_cents(300)))
            .unwrap();

        assert_eq!(order.subtotal(), Money::from_cents(2000));
        assert_eq!(order.total_amount(), Money::from_cents(2000));
    }

    #[test]
    fn charges_enter_the_total() {
        let mut order = empty_order();
        order.add_line_item(line(2, 1000)).unwrap();
        order.set_charges(Money::from_cents(150), Money::from_cents(50));

        assert_eq!(order.subtotal(), Money::from_cents(2000));
        assert_eq!(order.total_amount(), Money::from_cents(2100));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let mut order = empty_order();
        let result = order.add_line_item(line(0, 1000));
        assert!(matches!(result, Err(OrderError::InvalidQuantity(0))));
        assert!(order.line_items().is_empty());
    }

    #[test]
    fn non_positive_price_is_rejected() {
        let mut order = empty_order();
        let result = order.add_line_item(line(1, 0));
        assert!(matches!(result, Err(OrderError::InvalidUnitPrice(_))));
    }

    #[test]
    fn negative_discount_is_rejected() {
        let mut order = empty_order();
        let result = order.add_line_item(line(1, 100).with_discount(Money::from_cents(-1)));
        assert!(matches!(result, Err(OrderError::InvalidDiscount(_))));
    }

    #[test]
    fn full_forward_transition_chain() {
        let mut order = empty_order();
        for next in [
            OrderStatus::Confirmed,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ] {
            order.transition_to(next).unwrap();
            assert_eq!(order.order_status(), next);
        }
        assert!(order.shipped_date().is_some());
        assert!(order.delivered_date().is_some());
    }

    #[test]
    fn illegal_transition_is_rejected() {
        let mut order = empty_order();
        let result = order.transition_to(OrderStatus::Shipped);
        assert!(matches!(
            result,
            Err(OrderError::InvalidStateTransition {
                from: OrderStatus::Pending,
                to: OrderStatus::Shipped,
            })
        ));
        assert_eq!(order.order_status(), OrderStatus::Pending);
    }

    #[test]
    fn shipped_date_is_stamped_once() {
        let mut order = empty_order();
        order.transition_to(OrderStatus::Confirmed).unwrap();
        order.transition_to(OrderStatus::Processing).unwrap();
        order.transition_to(OrderStatus::Shipped).unwrap();
        let first = order.shipped_date().unwrap();

        order.transition_to(OrderStatus::Shipped).unwrap();
        assert_eq!(order.shipped_date(), Some(first));
    }

    #[test]
    fn delivered_date_is_stamped_once() {
        let mut order = empty_order();
        order.transition_to(OrderStatus::Confirmed).unwrap();
        order.transition_to(OrderStatus::Processing).unwrap();
        order.transition_to(OrderStatus::Shipped).unwrap();
        order.transition_to(OrderStatus::Delivered).unwrap();
        let first = order.delivered_date().unwrap();

        order.transition_to(OrderStatus::Delivered).unwrap();
        assert_eq!(order.delivered_date(), Some(first));
    }

    #[test]
    fn completed_requires_delivered_and_paid() {
        let mut order = empty_order();
        order.transition_to(OrderStatus::Confirmed).unwrap();
        order.transition_to(OrderStatus::Processing).unwrap();
        order.transition_to(OrderStatus::Shipped).unwrap();
        order.transition_to(OrderStatus::Delivered).unwrap();
        assert!(!order.is_completed());

        order.set_payment_status(PaymentStatus::Paid);
        assert!(order.is_completed());
    }

    #[test]
    fn notes_are_newline_joined() {
        let mut order = empty_order();
        order.append_note("first");
        order.append_note("   ");
        order.append_note("second");
        assert_eq!(order.notes(), "first\nsecond");
    }

    #[test]
    fn serialization_roundtrip() {
        let mut order = empty_order();
        order.add_line_item(line(2, 999)).unwrap();

        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, back);
    }
}
