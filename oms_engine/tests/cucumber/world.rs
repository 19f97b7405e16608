use std::collections::HashMap;

use cucumber::World;
use log::*;
use oms_engine::{
    db_types::{CustomerId, Order, OrderId, ProductId},
    events::EventProducers,
    order_objects::OrderLine,
    test_utils::prepare_env::{prepare_test_env, random_db_path},
    OrderFlowApi,
    OrderFlowError,
    OrderManagement,
    SqliteDatabase,
};

#[derive(Default, Debug, World)]
pub struct OrderWorld {
    pub system: Option<OrderManagementSystem>,
    pub customers: HashMap<String, CustomerId>,
    pub products: HashMap<String, ProductId>,
    pub orders: HashMap<String, OrderId>,
    pub last_error: Option<OrderFlowError>,
}

#[derive(Debug)]
pub struct OrderManagementSystem {
    pub db_path: String,
    pub api: OrderFlowApi<SqliteDatabase>,
}

impl OrderManagementSystem {
    pub async fn new() -> Self {
        let url = random_db_path();
        prepare_test_env(&url).await;
        let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating connection to database");
        debug!("🚀️ Created database: {url}");
        let api = OrderFlowApi::new(db, EventProducers::default());
        Self { db_path: url, api }
    }
}

impl OrderWorld {
    pub fn api(&self) -> &OrderFlowApi<SqliteDatabase> {
        &self.system.as_ref().expect("OrderFlowApi not initialised").api
    }

    pub fn db(&self) -> &SqliteDatabase {
        self.api().db()
    }

    /// Customers that were never registered resolve to an id that does not exist.
    pub fn customer_id(&self, name: &str) -> CustomerId {
        self.customers.get(name).cloned().unwrap_or_else(|| CustomerId::from(format!("unknown-{name}")))
    }

    /// Products that were never added to the catalog resolve to an id that does not exist.
    pub fn product_id(&self, name: &str) -> ProductId {
        self.products.get(name).cloned().unwrap_or_else(|| ProductId::from(format!("unknown-{name}")))
    }

    pub fn order_id(&self, name: &str) -> OrderId {
        self.orders.get(name).cloned().unwrap_or_else(|| panic!("Order {name} has not been created"))
    }

    /// Parses a list such as `P:2, Q:1` into order lines.
    pub fn order_lines(&self, items: &str) -> Vec<OrderLine> {
        items
            .split(',')
            .map(|s| {
                let (name, qty) = s.trim().split_once(':').expect("Items must look like 'name:quantity'");
                let qty = qty.trim().parse::<i64>().expect("Quantity must be an integer");
                OrderLine::new(self.product_id(name.trim()), qty)
            })
            .collect()
    }

    pub async fn order(&self, name: &str) -> Order {
        let id = self.order_id(name);
        self.db().fetch_order(&id).await.expect("Error fetching order").expect("Order does not exist")
    }

    pub fn record(&mut self, result: Result<Order, OrderFlowError>) {
        match result {
            Ok(order) => {
                debug!("🚀️ Request unexpectedly succeeded. Order is now {}", order.status);
                self.last_error = None;
            },
            Err(e) => {
                debug!("🚀️ Request failed as expected: {e}");
                self.last_error = Some(e);
            },
        }
    }

    pub fn take_error(&mut self) -> OrderFlowError {
        self.last_error.take().expect("Expected the last request to fail, but it succeeded")
    }
}
