//! Behaviour of the [`Order`] aggregate.
//!
//! Items and the order total only change through the methods here. Every mutation of the item list ends by
//! recomputing the total, so `total_amount == Σ item.subtotal` and `item.subtotal == item.price × item.quantity` hold
//! for every order that leaves this module.
use std::fmt::Display;

use chrono::Utc;
use oms_common::Money;
use thiserror::Error;

use crate::{
    db_types::{CustomerId, Order, OrderId, OrderItem, OrderItemId, OrderStatusType, PaymentMethod, ProductId},
    order_objects::{OrderLine, OrderOperation},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct InvalidTransition {
    pub operation: OrderOperation,
    pub status: OrderStatusType,
    pub reason: Option<String>,
}

impl InvalidTransition {
    pub fn new(operation: OrderOperation, status: OrderStatusType) -> Self {
        Self { operation, status, reason: None }
    }

    pub fn with_reason<S: Into<String>>(mut self, reason: S) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl Display for InvalidTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cannot {} an order with status '{}'", self.operation, self.status)?;
        match &self.reason {
            Some(reason) => write!(f, ": {reason}."),
            None => write!(f, "."),
        }
    }
}

/// Raised when a subtotal or the order total cannot be represented as [`Money`]. The order is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "The amount for product {product_id} is too large. The order total cannot exceed {max}.",
    max = Money::from(i64::MAX)
)]
pub struct AmountOverflow {
    pub product_id: ProductId,
}

impl Order {
    /// A new, empty cart for the given customer.
    pub fn new(customer_id: CustomerId) -> Self {
        let now = Utc::now();
        Self {
            id: OrderId::random(),
            customer_id,
            total_amount: Money::default(),
            status: OrderStatusType::Cart,
            payment_method: None,
            created_at: now,
            updated_at: now,
            items: Vec::new(),
        }
    }

    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn item_for(&self, product_id: &ProductId) -> Option<&OrderItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// The quantity of `product_id` already in the order, or zero.
    pub fn quantity_of(&self, product_id: &ProductId) -> i64 {
        self.item_for(product_id).map(|i| i.quantity).unwrap_or(0)
    }

    /// The order's items expressed as stock requests.
    pub fn item_requests(&self) -> Vec<OrderLine> {
        self.items.iter().map(|i| OrderLine::new(i.product_id.clone(), i.quantity)).collect()
    }

    /// Adds `quantity` units of the product to the order. If the product is already in the order, the quantities are
    /// merged and the whole line takes the new unit price.
    ///
    /// The new subtotal and total are computed before anything changes, so an overflow leaves the order as it was.
    pub fn add_or_merge_item(
        &mut self,
        product_id: &ProductId,
        price: Money,
        quantity: i64,
    ) -> Result<(), AmountOverflow> {
        let overflow = || AmountOverflow { product_id: product_id.clone() };
        let merged = self.quantity_of(product_id).checked_add(quantity).ok_or_else(overflow)?;
        let subtotal = price.checked_mul(merged).ok_or_else(overflow)?;
        let others = self.items.iter().filter(|i| &i.product_id != product_id).map(|i| i.subtotal);
        let total = Money::checked_sum(others).and_then(|t| t.checked_add(subtotal)).ok_or_else(overflow)?;
        let now = Utc::now();
        match self.items.iter_mut().find(|i| &i.product_id == product_id) {
            Some(item) => {
                item.quantity = merged;
                item.price = price;
                item.subtotal = subtotal;
                item.updated_at = now;
            },
            None => {
                let item = OrderItem {
                    id: OrderItemId::random(),
                    order_id: self.id.clone(),
                    product_id: product_id.clone(),
                    price,
                    quantity,
                    subtotal,
                    created_at: now,
                    updated_at: now,
                };
                self.items.push(item);
            },
        }
        self.total_amount = total;
        self.updated_at = now;
        Ok(())
    }

    /// Sets the total to the sum of the item subtotals. Fails, leaving the total unchanged, if the sum overflows.
    pub fn recompute_total(&mut self) -> Result<(), AmountOverflow> {
        let mut total = Money::default();
        for item in &self.items {
            total = total
                .checked_add(item.subtotal)
                .ok_or_else(|| AmountOverflow { product_id: item.product_id.clone() })?;
        }
        self.total_amount = total;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// `true` if every subtotal matches its line and the total matches the sum of the subtotals.
    pub fn is_consistent(&self) -> bool {
        let lines_ok = self.items.iter().all(|i| i.quantity > 0 && i.price.checked_mul(i.quantity) == Some(i.subtotal));
        let total = Money::checked_sum(self.items.iter().map(|i| i.subtotal));
        lines_ok && total == Some(self.total_amount)
    }

    /// Checks that `operation` may be applied to the order in its current state.
    pub fn ensure_can(&self, operation: OrderOperation) -> Result<(), InvalidTransition> {
        match operation.required_status() {
            Some(status) if status == self.status => {},
            _ => return Err(InvalidTransition::new(operation, self.status)),
        }
        if operation == OrderOperation::Checkout && self.items.is_empty() {
            return Err(InvalidTransition::new(operation, self.status).with_reason("the order has no items"));
        }
        Ok(())
    }

    /// Moves the order to the status that follows `operation`.
    pub fn transition(&mut self, operation: OrderOperation) -> Result<(), InvalidTransition> {
        self.ensure_can(operation)?;
        self.status = operation.resulting_status();
        self.updated_at = Utc::now();
        Ok(())
    }

    pub(crate) fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = Some(method);
        self.updated_at = Utc::now();
    }

    pub(crate) fn with_items(mut self, items: Vec<OrderItem>) -> Self {
        self.items = items;
        self
    }
}
