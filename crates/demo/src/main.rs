//! Walkthrough binary for the order workflow.
//!
//! Seeds an in-memory catalog, then drives one order through its full
//! lifecycle and cancels a second one, logging stock movements along the
//! way. Set `RUST_LOG` to adjust verbosity.

use common::{Money, UserId};
use orders::{
    CreateOrderRequest, CustomerDetails, InMemoryOrderStore, LineRequest, OrderStatus,
    OrderStore, OrderWorkflow, PaymentMethod, PaymentStatus,
};

use catalog::{CatalogStore, InMemoryCatalogStore};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod seed;

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let catalog = InMemoryCatalogStore::new();
    let order_store = InMemoryOrderStore::new();
    let workflow = OrderWorkflow::new(catalog.clone(), order_store.clone());

    let products = seed::seed_catalog(&catalog).await;
    let sales_rep = UserId::new();

    let laptop = &products[0];
    let mouse = &products[1];

    // A fulfilled order: create, confirm, pay, process, ship, deliver.
    let order = workflow
        .create_order(
            sales_rep,
            CreateOrderRequest::new(
                CustomerDetails::named("Grace Hopper")
                    .with_email("grace@example.com")
                    .with_shipping_address("1 Navy Way, Arlington"),
                vec![
                    LineRequest::new(laptop.id, 1, laptop.price),
                    LineRequest::new(mouse.id, 2, mouse.price)
                        .with_discount(Money::from_cents(500)),
                ],
            )
            .with_payment_method(PaymentMethod::CreditCard)
            .with_notes("First corporate order"),
        )
        .await
        .expect("order creation succeeds against seeded stock");

    tracing::info!(
        order_number = order.order_number(),
        subtotal = %order.subtotal(),
        total = %order.total_amount(),
        "created order"
    );

    workflow
        .update_status(
            order.id(),
            Some(OrderStatus::Confirmed),
            Some(PaymentStatus::Paid),
            Some("card cleared"),
        )
        .await
        .expect("confirm");
    for next in [
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
    ] {
        workflow
            .update_status(order.id(), Some(next), None, None)
            .await
            .expect("forward transition");
    }

    let delivered = workflow.get_order(order.id()).await.expect("reload");
    tracing::info!(
        order_number = delivered.order_number(),
        completed = delivered.is_completed(),
        shipped = ?delivered.shipped_date(),
        delivered = ?delivered.delivered_date(),
        "order fulfilled"
    );

    // A cancelled order: stock is restored in full.
    let doomed = workflow
        .create_order(
            sales_rep,
            CreateOrderRequest::new(
                CustomerDetails::named("Ada Lovelace"),
                vec![LineRequest::new(laptop.id, 3, laptop.price)],
            ),
        )
        .await
        .expect("second order creation");

    let before = catalog.get(laptop.id).await.expect("laptop exists");
    let cancelled = workflow
        .cancel_order(doomed.id(), "customer withdrew the purchase")
        .await
        .expect("cancellation");
    let after = catalog.get(laptop.id).await.expect("laptop exists");

    tracing::info!(
        order_number = cancelled.order_number(),
        stock_before = before.stock_quantity,
        stock_after = after.stock_quantity,
        "order cancelled, stock restored"
    );

    let cancelled_orders = order_store
        .find_by_status(OrderStatus::Cancelled)
        .await
        .expect("status query");
    tracing::info!(count = cancelled_orders.len(), "cancelled orders on file");

    for product in catalog.find_low_stock().await.expect("low stock query") {
        tracing::warn!(
            product = %product.name,
            stock = product.stock_quantity,
            min = product.min_stock_level,
            "low stock"
        );
    }
}
