//! # Storage backend contracts.
//!
//! The order flow never talks to a database directly. It opens a [`UnitOfWork`] through an [`OrderStore`], reads and
//! writes through it, and commits. A unit of work is all-or-nothing: if it is dropped or rolled back, none of its
//! writes are kept.
//!
//! * [`OrderStore`] opens units of work.
//! * [`UnitOfWork`] reads and writes orders, and brings in [`CatalogLookup`], [`StockWriter`] and
//!   [`CustomerDirectory`] so that stock checks, stock decrements and customer checks share the same transaction.
//! * [`ProductManagement`], [`CustomerManagement`] and [`OrderManagement`] cover catalog administration, customer
//!   records and order queries.
mod catalog;
mod customer_directory;
mod order_management;
mod order_store;
mod store_error;

pub use catalog::{CatalogLookup, ProductManagement, StockWriter};
pub use customer_directory::{CustomerDirectory, CustomerManagement};
pub use order_management::OrderManagement;
pub use order_store::{OrderStore, UnitOfWork};
pub use store_error::StoreError;
