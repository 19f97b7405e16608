//! SQLite backend for the order engine.
mod sqlite_impl;
mod unit_of_work;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
pub use unit_of_work::SqliteUnitOfWork;
