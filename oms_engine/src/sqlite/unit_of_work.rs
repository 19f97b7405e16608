use sqlx::{Sqlite, Transaction};

use super::db::{customers, orders, products};
use crate::{
    db_types::{CustomerId, Order, OrderId, Product, ProductId},
    traits::{CatalogLookup, CustomerDirectory, StockWriter, StoreError, UnitOfWork},
};

/// A unit of work backed by a single SQLite transaction. Dropping it without calling [`UnitOfWork::commit`] rolls the
/// transaction back.
pub struct SqliteUnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl SqliteUnitOfWork {
    pub fn new(tx: Transaction<'static, Sqlite>) -> Self {
        Self { tx }
    }
}

impl CatalogLookup for SqliteUnitOfWork {
    async fn fetch_products_by_ids(&mut self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError> {
        products::fetch_products_by_ids(ids, &mut *self.tx).await
    }
}

impl StockWriter for SqliteUnitOfWork {
    async fn decrement_stock(&mut self, product_id: &ProductId, quantity: i64) -> Result<bool, StoreError> {
        products::decrement_stock(product_id, quantity, &mut *self.tx).await
    }
}

impl CustomerDirectory for SqliteUnitOfWork {
    async fn customer_exists(&mut self, customer_id: &CustomerId) -> Result<bool, StoreError> {
        customers::customer_exists(customer_id, &mut *self.tx).await
    }
}

impl UnitOfWork for SqliteUnitOfWork {
    async fn fetch_order(&mut self, order_id: &OrderId) -> Result<Option<Order>, StoreError> {
        orders::fetch_order(order_id, &mut *self.tx).await
    }

    async fn insert_order(&mut self, order: &Order) -> Result<Order, StoreError> {
        orders::insert_order(order, &mut *self.tx).await
    }

    async fn save_order(&mut self, order: &Order) -> Result<Order, StoreError> {
        orders::update_order(order, &mut *self.tx).await
    }

    async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback().await?;
        Ok(())
    }
}
