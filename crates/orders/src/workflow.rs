//! Order workflow service.
//!
//! The only component permitted to mutate an order together with catalog
//! stock. Creation and cancellation keep their order mutation and their
//! stock mutations in one logical unit: every line is validated before any
//! stock moves, the stock movement itself is a single all-or-nothing batch
//! adjustment, and a rejected order insert compensates the adjustment
//! before the error surfaces.

use catalog::{CatalogError, CatalogStore, StockAdjustment};
use common::{Money, OrderId, ProductId, UserId};

use crate::aggregate::{CustomerDetails, Order};
use crate::error::WorkflowError;
use crate::line_item::LineItem;
use crate::number::generate_order_number;
use crate::status::{OrderStatus, PaymentMethod, PaymentStatus};
use crate::store::OrderStore;

/// One requested order line.
#[derive(Debug, Clone)]
pub struct LineRequest {
    /// The product to order.
    pub product_id: ProductId,
    /// Units requested, at least 1.
    pub quantity: u32,
    /// Unit price as quoted to the customer; captured verbatim on the
    /// line item, not re-read from the catalog.
    pub unit_price: Money,
    /// Line-level discount.
    pub discount: Money,
    /// Optional line note.
    pub notes: Option<String>,
}

impl LineRequest {
    /// Creates a line request with no discount.
    pub fn new(product_id: ProductId, quantity: u32, unit_price: Money) -> Self {
        Self {
            product_id,
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

    /// Sets the line note.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// A request to create an order.
#[derive(Debug, Clone)]
pub struct CreateOrderRequest {
    pub customer: CustomerDetails,
    pub payment_method: Option<PaymentMethod>,
    pub lines: Vec<LineRequest>,
    /// Order-level tax, zero unless supplied.
    pub tax_amount: Money,
    /// Order-level discount, zero unless supplied.
    pub discount_amount: Money,
    pub notes: Option<String>,
}

impl CreateOrderRequest {
    /// Creates a request with zero tax and discount.
    pub fn new(customer: CustomerDetails, lines: Vec<LineRequest>) -> Self {
        Self {
            customer,
            payment_method: None,
            lines,
            tax_amount: Money::zero(),
            discount_amount: Money::zero(),
            notes: None,
        }
    }

    /// Sets the payment method.
    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    /// Sets the order-level tax.
    pub fn with_tax(mut self, tax: Money) -> Self {
        self.tax_amount = tax;
        self
    }

    /// Sets the order-level discount.
    pub fn with_discount(mut self, discount: Money) -> Self {
        self.discount_amount = discount;
        self
    }

    /// Sets the order notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Orchestrates order creation, status updates, and cancellation against
/// the catalog and order stores.
pub struct OrderWorkflow<C: CatalogStore, O: OrderStore> {
    catalog: C,
    orders: O,
}

impl<C: CatalogStore, O: OrderStore> OrderWorkflow<C, O> {
    /// Creates a workflow over the given stores.
    pub fn new(catalog: C, orders: O) -> Self {
        Self { catalog, orders }
    }

    /// Creates an order, consuming stock for every line.
    ///
    /// Every line is validated against the catalog before any stock is
    /// committed; a multi-item order can never partially consume stock and
    /// then fail on a later line.
    #[tracing::instrument(skip(self, request), fields(line_count = request.lines.len()))]
    pub async fn create_order(
        &self,
        placed_by: UserId,
        request: CreateOrderRequest,
    ) -> Result<Order, WorkflowError> {
        let start = std::time::Instant::now();
        let CreateOrderRequest {
            customer,
            payment_method,
            lines,
            tax_amount,
            discount_amount,
            notes,
        } = request;

        if lines.is_empty() {
            return Err(WorkflowError::EmptyOrder);
        }

        let mut order = Order::new(generate_order_number(), placed_by, customer, payment_method);
        let mut adjustments = Vec::with_capacity(lines.len());

        for line in lines {
            let product = self.catalog.get(line.product_id).await?;
            if product.stock_quantity < line.quantity {
                return Err(CatalogError::InsufficientStock {
                    name: product.name,
                    available: product.stock_quantity,
                    requested: line.quantity,
                }
                .into());
            }

            let mut item =
                LineItem::new(line.product_id, product.name, line.quantity, line.unit_price)
                    .with_discount(line.discount);
            if let Some(line_notes) = line.notes {
                item = item.with_notes(line_notes);
            }
            order.add_line_item(item)?;
            adjustments.push(StockAdjustment::new(
                line.product_id,
                -i64::from(line.quantity),
            ));
        }

        order.set_charges(tax_amount, discount_amount);
        if let Some(notes) = notes {
            order.append_note(&notes);
        }

        // Commit point: the batch re-validates under the store's exclusive
        // section, so a concurrent competing order fails here with nothing
        // applied.
        self.catalog.adjust_stock_batch(&adjustments).await?;

        if let Err(insert_err) = self.orders.insert(order.clone()).await {
            let restore: Vec<StockAdjustment> = adjustments
                .iter()
                .map(|a| StockAdjustment::new(a.product_id, -a.delta))
                .collect();
            if let Err(restore_err) = self.catalog.adjust_stock_batch(&restore).await {
                tracing::error!(
                    error = %restore_err,
                    order_number = %order.order_number(),
                    "failed to restore stock after rejected order insert"
                );
            }
            return Err(insert_err);
        }

        metrics::counter!("orders_created_total").increment(1);
        metrics::histogram!("order_create_duration_seconds").record(start.elapsed().as_secs_f64());
        tracing::info!(
            order_number = %order.order_number(),
            total = %order.total_amount(),
            "order created"
        );
        Ok(order)
    }

    /// Updates the order and/or payment status.
    ///
    /// `None` leaves an axis unchanged. A requested transition to
    /// `Cancelled` is routed through [`OrderWorkflow::cancel_order`] so
    /// stock restoration cannot be bypassed; the notes become the
    /// cancellation reason.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(
        &self,
        order_id: OrderId,
        order_status: Option<OrderStatus>,
        payment_status: Option<PaymentStatus>,
        notes: Option<&str>,
    ) -> Result<Order, WorkflowError> {
        if order_status == Some(OrderStatus::Cancelled) {
            return self.cancel_order(order_id, notes.unwrap_or_default()).await;
        }

        let mut order = self.load(order_id).await?;

        if let Some(next) = order_status {
            order.transition_to(next)?;
        }
        if let Some(payment) = payment_status {
            order.set_payment_status(payment);
        }
        if let Some(notes) = notes {
            order.append_note(notes);
        }

        self.orders.update(order.clone()).await?;

        metrics::counter!("order_status_updates_total").increment(1);
        tracing::info!(
            order_number = %order.order_number(),
            order_status = %order.order_status(),
            payment_status = %order.payment_status(),
            "order status updated"
        );
        Ok(order)
    }

    /// Cancels an order, restoring stock for every line item.
    ///
    /// The restoration is a single all-or-nothing batch; if any line
    /// cannot be restored the cancellation is not committed.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_order(
        &self,
        order_id: OrderId,
        reason: &str,
    ) -> Result<Order, WorkflowError> {
        let mut order = self.load(order_id).await?;

        match order.order_status() {
            OrderStatus::Cancelled => return Err(WorkflowError::AlreadyCancelled(order_id)),
            OrderStatus::Delivered => return Err(WorkflowError::CannotCancelDelivered(order_id)),
            _ => {}
        }

        let restore: Vec<StockAdjustment> = order
            .line_items()
            .iter()
            .map(|item| StockAdjustment::new(item.product_id, i64::from(item.quantity)))
            .collect();
        self.catalog.adjust_stock_batch(&restore).await?;

        order.transition_to(OrderStatus::Cancelled)?;
        let reason = reason.trim();
        if !reason.is_empty() {
            order.append_note(&format!("Cancellation reason: {reason}"));
        }

        self.orders.update(order.clone()).await?;

        metrics::counter!("orders_cancelled_total").increment(1);
        tracing::info!(order_number = %order.order_number(), "order cancelled");
        Ok(order)
    }

    /// Loads an order, failing when it does not exist.
    pub async fn get_order(&self, order_id: OrderId) -> Result<Order, WorkflowError> {
        self.load(order_id).await
    }

    async fn load(&self, order_id: OrderId) -> Result<Order, WorkflowError> {
        self.orders
            .get(order_id)
            .await?
            .ok_or(WorkflowError::OrderNotFound(order_id))
    }
}
