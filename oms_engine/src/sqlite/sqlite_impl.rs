//! `SqliteDatabase` is a concrete implementation of an order engine backend.
//!
//! Unsurprisingly, it uses SQLite as the backend and implements all the traits defined in the [`crate::traits`]
//! module.
use std::fmt::Debug;

use log::*;
use sqlx::SqlitePool;

use super::{
    db::{customers, db_url, new_pool, orders, products},
    SqliteUnitOfWork,
};
use crate::{
    db_types::{Customer, CustomerId, NewCustomer, NewProduct, Order, OrderId, Product, ProductId, ProductUpdate},
    query_objects::{Pagination, ProductQueryFilter},
    traits::{CustomerManagement, OrderManagement, OrderStore, ProductManagement, StoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqliteDatabase ({})", self.url)
    }
}

impl OrderStore for SqliteDatabase {
    type Work = SqliteUnitOfWork;

    fn url(&self) -> &str {
        self.url.as_str()
    }

    async fn begin(&self) -> Result<Self::Work, StoreError> {
        let tx = self.pool.begin().await?;
        Ok(SqliteUnitOfWork::new(tx))
    }

    async fn close(&mut self) -> Result<(), StoreError> {
        self.pool.close().await;
        Ok(())
    }
}

impl ProductManagement for SqliteDatabase {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut conn = self.pool.acquire().await?;
        products::insert_product(product, &mut conn).await
    }

    async fn fetch_product(&self, id: &ProductId) -> Result<Option<Product>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        products::fetch_product(id, &mut conn).await
    }

    async fn fetch_product_by_name(&self, name: &str) -> Result<Option<Product>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        products::fetch_product_by_name(name, &mut conn).await
    }

    async fn update_product(&self, id: &ProductId, update: ProductUpdate) -> Result<Option<Product>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        products::update_product(id, update, &mut conn).await
    }

    async fn search_products(
        &self,
        filter: &ProductQueryFilter,
        pagination: &Pagination,
    ) -> Result<(Vec<Product>, i64), StoreError> {
        let mut tx = self.pool.begin().await?;
        let total = products::count_products(filter, &mut tx).await?;
        let page = products::search_products(filter, pagination.size(), pagination.offset(), &mut tx).await?;
        tx.commit().await?;
        Ok((page, total))
    }
}

impl CustomerManagement for SqliteDatabase {
    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, StoreError> {
        let mut conn = self.pool.acquire().await?;
        customers::insert_customer(customer, &mut conn).await
    }

    async fn fetch_customer(&self, customer_id: &CustomerId) -> Result<Option<Customer>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        customers::fetch_customer(customer_id, &mut conn).await
    }

    async fn soft_delete_customers(&self, customer_ids: &[CustomerId]) -> Result<u64, StoreError> {
        let mut conn = self.pool.acquire().await?;
        customers::soft_delete_customers(customer_ids, &mut conn).await
    }
}

impl OrderManagement for SqliteDatabase {
    async fn fetch_order(&self, order_id: &OrderId) -> Result<Option<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order(order_id, &mut conn).await
    }

    async fn fetch_orders_for_customer(
        &self,
        customer_id: &CustomerId,
        pagination: &Pagination,
    ) -> Result<(Vec<Order>, i64), StoreError> {
        let mut tx = self.pool.begin().await?;
        let total = orders::count_orders_for_customer(customer_id, &mut tx).await?;
        let page =
            orders::fetch_orders_for_customer(customer_id, pagination.size(), pagination.offset(), &mut tx).await?;
        tx.commit().await?;
        Ok((page, total))
    }
}

impl SqliteDatabase {
    /// Creates a new database API object, using `OMS_DATABASE_URL` or the default database location.
    pub async fn new(max_connections: u32) -> Result<Self, StoreError> {
        let url = db_url();
        SqliteDatabase::new_with_url(url.as_str(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Brings the schema up to date.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }
}
