use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{CustomerId, Order, OrderId, PaymentMethod, ProductId},
    events::{EventProducers, OrderCheckedOutEvent, OrderCompletedEvent},
    oms_api::{
        errors::OrderFlowError,
        order_objects::{merge_order_lines, OrderLine, OrderOperation},
    },
    stock_ledger::{check_stock, commit_stock},
    traits::{CustomerDirectory, OrderStore, UnitOfWork},
};

/// `OrderFlowApi` drives orders through their lifecycle: create, add items, check out, choose a payment method and
/// pay.
///
/// Every call runs inside a single unit of work. Either all of its reads and writes take effect, or none do. Stock is
/// removed from the catalog at checkout, with a guarded decrement that refuses to take stock below zero.
pub struct OrderFlowApi<B> {
    db: B,
    producers: EventProducers,
}

impl<B> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi")
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B, producers: EventProducers) -> Self {
        Self { db, producers }
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub fn db_mut(&mut self) -> &mut B {
        &mut self.db
    }
}

impl<B> OrderFlowApi<B>
where B: OrderStore
{
    /// Creates a new cart for the customer, optionally pre-filled with `items`.
    ///
    /// Duplicate lines are merged. Every line is checked against current stock, and the whole request fails with
    /// `StockUnavailable` if any line cannot be served. Stock is not reserved until checkout.
    pub async fn create_order(&self, customer_id: &CustomerId, items: &[OrderLine]) -> Result<Order, OrderFlowError> {
        let lines = merge_order_lines(items)?;
        let mut work = self.db.begin().await?;
        let result = create_order_in(&mut work, customer_id, &lines).await;
        let order = finish(work, result).await?;
        debug!("🔄️📦️ Order [{}] created for customer {customer_id} with {} items", order.id, order.items().len());
        Ok(order)
    }

    /// Adds `quantity` units of a product to an order in the `cart` state.
    ///
    /// If the product is already in the order, the stock check covers the merged quantity, and the whole line is
    /// repriced at the current catalog price.
    pub async fn add_item(
        &self,
        order_id: &OrderId,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<Order, OrderFlowError> {
        if quantity <= 0 {
            return Err(OrderFlowError::InvalidQuantity(quantity));
        }
        let mut work = self.db.begin().await?;
        let result = add_item_in(&mut work, order_id, product_id, quantity).await;
        let order = finish(work, result).await?;
        debug!("🔄️📦️ Added {quantity} x {product_id} to order [{order_id}]. New total: {}", order.total_amount());
        Ok(order)
    }

    /// Checks out a non-empty cart.
    ///
    /// All items are re-verified against current stock, and the stock for every item is removed from the catalog in
    /// the same unit of work that moves the order to `checkout`.
    pub async fn checkout(&self, order_id: &OrderId) -> Result<Order, OrderFlowError> {
        let mut work = self.db.begin().await?;
        let result = checkout_in(&mut work, order_id).await;
        let order = finish(work, result).await?;
        info!("🔄️📦️ Order [{order_id}] checked out. Total: {}", order.total_amount());
        self.call_checked_out_hook(&order).await;
        Ok(order)
    }

    /// Records the payment method for a checked-out order and moves it to `awaiting_payment`.
    pub async fn set_payment(&self, order_id: &OrderId, method: PaymentMethod) -> Result<Order, OrderFlowError> {
        if !method.is_supported() {
            return Err(OrderFlowError::UnsupportedPaymentMethod(method));
        }
        let mut work = self.db.begin().await?;
        let result = set_payment_in(&mut work, order_id, method).await;
        let order = finish(work, result).await?;
        debug!("🔄️💰️ Order [{order_id}] will be paid by {method}");
        Ok(order)
    }

    /// Marks an order that is awaiting payment as complete.
    pub async fn pay(&self, order_id: &OrderId) -> Result<Order, OrderFlowError> {
        let mut work = self.db.begin().await?;
        let result = pay_in(&mut work, order_id).await;
        let order = finish(work, result).await?;
        info!("🔄️💰️ Order [{order_id}] has been paid");
        self.call_completed_hook(&order).await;
        Ok(order)
    }

    async fn call_checked_out_hook(&self, order: &Order) {
        for emitter in &self.producers.order_checked_out_producer {
            debug!("🔄️📦️ Notifying order checked out hook subscribers");
            let event = OrderCheckedOutEvent::new(order.clone());
            emitter.publish_event(event).await;
        }
    }

    async fn call_completed_hook(&self, order: &Order) {
        for emitter in &self.producers.order_completed_producer {
            debug!("🔄️📦️ Notifying order completed hook subscribers");
            let event = OrderCompletedEvent::new(order.clone());
            emitter.publish_event(event).await;
        }
    }
}

/// Commits the unit of work if `result` is a success, and rolls it back otherwise. The original error is returned
/// unchanged after a rollback.
async fn finish<W: UnitOfWork, T>(work: W, result: Result<T, OrderFlowError>) -> Result<T, OrderFlowError> {
    match result {
        Ok(value) => {
            work.commit().await?;
            Ok(value)
        },
        Err(e) => {
            trace!("🔄️ Rolling back unit of work: {e}");
            if let Err(rb) = work.rollback().await {
                warn!("🔄️ Rollback failed: {rb}. The transaction will be discarded when its connection is released.");
            }
            Err(e)
        },
    }
}

async fn fetch_order<W: UnitOfWork>(work: &mut W, order_id: &OrderId) -> Result<Order, OrderFlowError> {
    work.fetch_order(order_id).await?.ok_or_else(|| OrderFlowError::OrderNotFound(order_id.clone()))
}

async fn create_order_in<W: UnitOfWork>(
    work: &mut W,
    customer_id: &CustomerId,
    lines: &[OrderLine],
) -> Result<Order, OrderFlowError> {
    if !work.customer_exists(customer_id).await? {
        return Err(OrderFlowError::CustomerNotFound(customer_id.clone()));
    }
    let mut order = Order::new(customer_id.clone());
    let checked = check_stock(work, lines).await?;
    for line in &checked {
        order.add_or_merge_item(&line.product_id, line.price, line.quantity)?;
    }
    Ok(work.insert_order(&order).await?)
}

async fn add_item_in<W: UnitOfWork>(
    work: &mut W,
    order_id: &OrderId,
    product_id: &ProductId,
    quantity: i64,
) -> Result<Order, OrderFlowError> {
    let mut order = fetch_order(work, order_id).await?;
    order.ensure_can(OrderOperation::AddItem)?;
    let merged =
        order.quantity_of(product_id).checked_add(quantity).ok_or(OrderFlowError::InvalidQuantity(quantity))?;
    let checked = check_stock(work, &[OrderLine::new(product_id.clone(), merged)]).await?;
    for line in &checked {
        order.add_or_merge_item(&line.product_id, line.price, quantity)?;
    }
    Ok(work.save_order(&order).await?)
}

async fn checkout_in<W: UnitOfWork>(work: &mut W, order_id: &OrderId) -> Result<Order, OrderFlowError> {
    let mut order = fetch_order(work, order_id).await?;
    order.ensure_can(OrderOperation::Checkout)?;
    let checked = check_stock(work, &order.item_requests()).await?;
    commit_stock(work, &checked).await?;
    order.transition(OrderOperation::Checkout)?;
    Ok(work.save_order(&order).await?)
}

async fn set_payment_in<W: UnitOfWork>(
    work: &mut W,
    order_id: &OrderId,
    method: PaymentMethod,
) -> Result<Order, OrderFlowError> {
    let mut order = fetch_order(work, order_id).await?;
    order.transition(OrderOperation::SetPayment)?;
    order.set_payment_method(method);
    Ok(work.save_order(&order).await?)
}

async fn pay_in<W: UnitOfWork>(work: &mut W, order_id: &OrderId) -> Result<Order, OrderFlowError> {
    let mut order = fetch_order(work, order_id).await?;
    order.transition(OrderOperation::Pay)?;
    Ok(work.save_order(&order).await?)
}
