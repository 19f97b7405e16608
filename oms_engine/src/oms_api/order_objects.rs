use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{
    db_types::{OrderStatusType, ProductId},
    oms_api::errors::OrderFlowError,
};

//--------------------------------------      OrderLine        ---------------------------------------------------------
/// A request for `quantity` units of a product, as supplied by a caller creating or extending an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new<P: Into<ProductId>>(product_id: P, quantity: i64) -> Self {
        Self { product_id: product_id.into(), quantity }
    }
}

/// Validates the quantities in `lines` and merges lines that refer to the same product, keeping the position of the
/// first occurrence.
pub fn merge_order_lines(lines: &[OrderLine]) -> Result<Vec<OrderLine>, OrderFlowError> {
    let mut merged: Vec<OrderLine> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.quantity <= 0 {
            return Err(OrderFlowError::InvalidQuantity(line.quantity));
        }
        match merged.iter_mut().find(|l| l.product_id == line.product_id) {
            Some(existing) => {
                existing.quantity = existing
                    .quantity
                    .checked_add(line.quantity)
                    .ok_or(OrderFlowError::InvalidQuantity(line.quantity))?;
            },
            None => merged.push(line.clone()),
        }
    }
    Ok(merged)
}

//--------------------------------------    OrderOperation     ---------------------------------------------------------
/// The operations of the order lifecycle.
///
/// ```text
///   create ──► cart ──checkout──► checkout ──set_payment──► awaiting_payment ──pay──► complete
///              ▲  │
///              └──┘ add_item
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderOperation {
    Create,
    AddItem,
    Checkout,
    SetPayment,
    Pay,
}

impl OrderOperation {
    /// The status an order must be in for this operation to apply. `Create` applies to no existing order.
    pub fn required_status(&self) -> Option<OrderStatusType> {
        match self {
            OrderOperation::Create => None,
            OrderOperation::AddItem | OrderOperation::Checkout => Some(OrderStatusType::Cart),
            OrderOperation::SetPayment => Some(OrderStatusType::Checkout),
            OrderOperation::Pay => Some(OrderStatusType::AwaitingPayment),
        }
    }

    /// The status of the order once the operation has been applied.
    pub fn resulting_status(&self) -> OrderStatusType {
        match self {
            OrderOperation::Create | OrderOperation::AddItem => OrderStatusType::Cart,
            OrderOperation::Checkout => OrderStatusType::Checkout,
            OrderOperation::SetPayment => OrderStatusType::AwaitingPayment,
            OrderOperation::Pay => OrderStatusType::Complete,
        }
    }
}

impl Display for OrderOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderOperation::Create => write!(f, "create"),
            OrderOperation::AddItem => write!(f, "add_item"),
            OrderOperation::Checkout => write!(f, "checkout"),
            OrderOperation::SetPayment => write!(f, "set_payment"),
            OrderOperation::Pay => write!(f, "pay"),
        }
    }
}
