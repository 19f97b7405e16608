use serde::{Deserialize, Serialize};

use crate::db_types::Order;

/// Emitted after an order has been checked out and its stock has been taken from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCheckedOutEvent {
    pub order: Order,
}

impl OrderCheckedOutEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}

/// Emitted after an order has been paid for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCompletedEvent {
    pub order: Order,
}

impl OrderCompletedEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}
