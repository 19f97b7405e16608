use crate::{
    db_types::{NewProduct, Product, ProductId, ProductUpdate},
    query_objects::{Pagination, ProductQueryFilter},
    traits::StoreError,
};

/// Read access to the product catalog from inside a unit of work.
#[allow(async_fn_in_trait)]
pub trait CatalogLookup {
    /// Fetches the products with the given ids. Ids that do not exist are simply absent from the result. The order of
    /// the result is unspecified.
    async fn fetch_products_by_ids(&mut self, ids: &[ProductId]) -> Result<Vec<Product>, StoreError>;
}

/// Write access to stock levels from inside a unit of work.
#[allow(async_fn_in_trait)]
pub trait StockWriter {
    /// Atomically removes `quantity` units from the product's stock, provided at least that many are on hand.
    ///
    /// Returns `false`, and leaves the stock untouched, if the product does not exist or has too few units.
    async fn decrement_stock(&mut self, product_id: &ProductId, quantity: i64) -> Result<bool, StoreError>;
}

/// Catalog administration. Each call is independent and runs in its own transaction.
#[allow(async_fn_in_trait)]
pub trait ProductManagement {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, StoreError>;

    async fn fetch_product(&self, id: &ProductId) -> Result<Option<Product>, StoreError>;

    async fn fetch_product_by_name(&self, name: &str) -> Result<Option<Product>, StoreError>;

    /// Applies the non-empty fields of `update` to the product. Returns `None` if the product does not exist.
    async fn update_product(&self, id: &ProductId, update: ProductUpdate) -> Result<Option<Product>, StoreError>;

    /// Returns one page of the products matching `filter`, along with the total number of matches.
    async fn search_products(
        &self,
        filter: &ProductQueryFilter,
        pagination: &Pagination,
    ) -> Result<(Vec<Product>, i64), StoreError>;
}
