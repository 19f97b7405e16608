//! Logs order milestones as they happen.
//!
//! The engine publishes events only after the corresponding unit of work has committed, so every line written here
//! describes a change that is durable in the database.
//!
//! 1. OrderCheckedOutEvent - Stock has been taken from the catalog for the order. The order's lines are logged.
//! 2. OrderCompletedEvent - The order has been paid for.
use std::{future::Future, pin::Pin};

use log::*;
use oms_engine::events::{EventHandlers, EventHooks, OrderCheckedOutEvent, OrderCompletedEvent};

pub const ORDER_LOG_BUFFER_SIZE: usize = 25;

type HookFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

pub fn create_order_log_handlers() -> EventHandlers {
    let mut hooks = EventHooks::default();
    hooks.on_order_checked_out(|ev| Box::pin(async move { log_checked_out(ev) }) as HookFuture);
    hooks.on_order_completed(|ev| Box::pin(async move { log_completed(ev) }) as HookFuture);
    EventHandlers::new(ORDER_LOG_BUFFER_SIZE, hooks)
}

fn log_checked_out(ev: OrderCheckedOutEvent) {
    let order = ev.order;
    info!(
        "📝️ Order [{}] for customer {} checked out. {} lines, total {}",
        order.id,
        order.customer_id,
        order.items().len(),
        order.total_amount()
    );
    for item in order.items() {
        debug!("📝️   {} x {} @ {} = {}", item.quantity, item.product_id, item.price, item.subtotal);
    }
}

fn log_completed(ev: OrderCompletedEvent) {
    let order = ev.order;
    let method = order.payment_method.map(|m| m.to_string()).unwrap_or_else(|| "unknown".into());
    info!("📝️ Order [{}] completed. Paid {} by {method}", order.id, order.total_amount());
}
