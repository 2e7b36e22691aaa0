//! In-memory order store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::OrderId;
use tokio::sync::RwLock;

use crate::aggregate::Order;
use crate::error::WorkflowError;
use crate::status::OrderStatus;
use crate::store::OrderStore;

/// In-memory order store.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of orders stored.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: Order) -> Result<(), WorkflowError> {
        let mut orders = self.orders.write().await;

        let number_taken = orders
            .values()
            .any(|existing| existing.order_number() == order.order_number());
        if number_taken {
            return Err(WorkflowError::DuplicateOrderNumber(
                order.order_number().to_string(),
            ));
        }

        orders.insert(order.id(), order);
        Ok(())
    }

    async fn update(&self, order: Order) -> Result<(), WorkflowError> {
        let mut orders = self.orders.write().await;
        if !orders.contains_key(&order.id()) {
            return Err(WorkflowError::OrderNotFound(order.id()));
        }
        orders.insert(order.id(), order);
        Ok(())
    }

    async fn get(&self, order_id: OrderId) -> Result<Option<Order>, WorkflowError> {
        Ok(self.orders.read().await.get(&order_id).cloned())
    }

    async fn find_by_status(&self, status: OrderStatus) -> Result<Vec<Order>, WorkflowError> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .filter(|order| order.order_status() == status)
            .cloned()
            .collect())
    }
}
