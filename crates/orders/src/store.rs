//! Order store trait.

use async_trait::async_trait;
use common::OrderId;

use crate::aggregate::Order;
use crate::error::WorkflowError;
use crate::status::OrderStatus;

/// Persistence boundary for orders.
///
/// Orders are business records: they are inserted once, updated in place
/// by the workflow, and never deleted.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a new order, enforcing order-number uniqueness.
    async fn insert(&self, order: Order) -> Result<(), WorkflowError>;

    /// Replaces an existing order.
    async fn update(&self, order: Order) -> Result<(), WorkflowError>;

    /// Loads an order by id, `None` when absent.
    async fn get(&self, order_id: OrderId) -> Result<Option<Order>, WorkflowError>;

    /// Lists orders currently in the given status.
    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, WorkflowError>;
}
