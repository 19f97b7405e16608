use crate::{
    db_types::{CustomerId, Order, OrderId},
    query_objects::Pagination,
    traits::StoreError,
};

/// Read-only order queries.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    async fn fetch_order(&self, order_id: &OrderId) -> Result<Option<Order>, StoreError>;

    /// Returns one page of the customer's orders, newest first, along with the customer's total number of orders.
    async fn fetch_orders_for_customer(
        &self,
        customer_id: &CustomerId,
        pagination: &Pagination,
    ) -> Result<(Vec<Order>, i64), StoreError>;
}
