//! # Order management public API
//!
//! The `oms_api` module exposes the programmatic API of the order engine. Each API is created by supplying a backend
//! that implements the traits it needs, so different concerns can be served by different backends.
//!
//! * [`order_flow_api`] moves orders through their lifecycle and keeps stock consistent while doing so.
//! * [`orders_api`] provides read-only access to orders.
//! * [`catalog_api`] manages the product catalog.
//! * [`customer_api`] manages customer records.
//!
//! ```rust,ignore
//! use oms_engine::{events::EventProducers, OrderFlowApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/oms_store.db", 25).await?;
//! let api = OrderFlowApi::new(db, EventProducers::default());
//! let order = api.create_order(&customer_id, &[OrderLine::new(product_id, 2)]).await?;
//! let order = api.checkout(&order.id).await?;
//! ```

pub mod catalog_api;
pub mod customer_api;
pub mod errors;
pub mod order_flow_api;
pub mod order_objects;
pub mod orders_api;
pub mod query_objects;
