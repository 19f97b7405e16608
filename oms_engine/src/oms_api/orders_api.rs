use std::fmt::Debug;

use crate::{
    db_types::{CustomerId, Order, OrderId},
    oms_api::{
        errors::OrderFlowError,
        query_objects::{Page, Pagination},
    },
    traits::OrderManagement,
};

/// Read-only access to orders.
pub struct OrderApi<B> {
    db: B,
}

impl<B: Debug> Debug for OrderApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderApi ({:?})", self.db)
    }
}

impl<B> OrderApi<B>
where B: OrderManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn fetch_order(&self, order_id: &OrderId) -> Result<Order, OrderFlowError> {
        self.db.fetch_order(order_id).await?.ok_or_else(|| OrderFlowError::OrderNotFound(order_id.clone()))
    }

    /// Returns one page of the customer's orders, newest first.
    pub async fn orders_for_customer(
        &self,
        customer_id: &CustomerId,
        pagination: &Pagination,
    ) -> Result<Page<Order>, OrderFlowError> {
        let (orders, total) = self.db.fetch_orders_for_customer(customer_id, pagination).await?;
        Ok(Page::new(pagination, total, orders))
    }
}
