//! Order Management Engine
//!
//! This library holds the core logic of the order management system: the order lifecycle and the stock ledger that
//! keeps the product catalog consistent with the orders placed against it.
//!
//! The library is divided into two main sections:
//! 1. Storage ([`mod@traits`] and the SQLite backend). The engine only talks to storage through the traits in
//!    [`mod@traits`]. The data types used in storage are defined in [`mod@db_types`] and are public.
//! 2. The public API ([`OrderFlowApi`], [`OrderApi`], [`CatalogApi`] and [`CustomerApi`]). A backend that implements
//!    the traits an API needs can serve that API.
//!
//! Orders move through `cart → checkout → awaiting_payment → complete`. Every operation on an order runs in a single
//! unit of work, so a failed operation leaves no trace. Stock is taken from the catalog at checkout, through a guarded
//! decrement that can never drive stock below zero, no matter how many checkouts race for the last units.
//!
//! The engine also emits events when orders are checked out and completed. See [`mod@events`].
pub mod db_types;
pub mod events;
mod oms_api;
pub mod order_aggregate;
pub mod stock_ledger;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(all(feature = "sqlite", any(feature = "test_utils", test)))]
pub mod test_utils;

pub use oms_api::{
    catalog_api::CatalogApi,
    customer_api::CustomerApi,
    errors::{CatalogError, CustomerError, OrderFlowError},
    order_flow_api::OrderFlowApi,
    order_objects,
    orders_api::OrderApi,
    query_objects,
};
#[cfg(feature = "sqlite")]
pub use sqlite::{SqliteDatabase, SqliteUnitOfWork};
pub use traits::{
    CatalogLookup,
    CustomerDirectory,
    CustomerManagement,
    OrderManagement,
    OrderStore,
    ProductManagement,
    StockWriter,
    StoreError,
    UnitOfWork,
};
