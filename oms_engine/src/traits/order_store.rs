use crate::{
    db_types::{Order, OrderId},
    traits::{CatalogLookup, CustomerDirectory, StockWriter, StoreError},
};

/// A storage backend that can open atomic units of work for the order flow.
#[allow(async_fn_in_trait)]
pub trait OrderStore: Clone {
    type Work: UnitOfWork;

    /// The URL of the database
    fn url(&self) -> &str;

    /// Opens a new unit of work. Nothing done through the unit of work is visible to other callers until
    /// [`UnitOfWork::commit`] is called. Dropping it without committing discards all of its changes.
    async fn begin(&self) -> Result<Self::Work, StoreError>;

    /// Closes the underlying connections. The default implementation does nothing.
    async fn close(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// One atomic unit of work. Every order flow operation reads and writes through exactly one of these.
#[allow(async_fn_in_trait)]
pub trait UnitOfWork: CatalogLookup + StockWriter + CustomerDirectory + Sized {
    /// Fetches the order, with its items in insertion order.
    async fn fetch_order(&mut self, order_id: &OrderId) -> Result<Option<Order>, StoreError>;

    /// Stores a new order along with its items and returns the stored record.
    async fn insert_order(&mut self, order: &Order) -> Result<Order, StoreError>;

    /// Writes the order header and all of its items back to storage and returns the stored record.
    async fn save_order(&mut self, order: &Order) -> Result<Order, StoreError>;

    async fn commit(self) -> Result<(), StoreError>;

    async fn rollback(self) -> Result<(), StoreError>;
}
