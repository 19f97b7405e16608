//! Catalog administration: adding, updating and searching products.

use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{NewProduct, Product, ProductId, ProductUpdate},
    oms_api::{
        errors::CatalogError,
        query_objects::{Page, Pagination, ProductQueryFilter},
    },
    traits::ProductManagement,
};

pub struct CatalogApi<B> {
    db: B,
}

impl<B: Debug> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi ({:?})", self.db)
    }
}

impl<B> CatalogApi<B>
where B: ProductManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogError> {
        validate_new_product(&product)?;
        let product = self.db.insert_product(product).await?;
        debug!("🗃️ Product [{}] '{}' added with {} units", product.id, product.name, product.quantity);
        Ok(product)
    }

    pub async fn fetch_product(&self, id: &ProductId) -> Result<Product, CatalogError> {
        self.db.fetch_product(id).await?.ok_or_else(|| CatalogError::ProductNotFound(id.clone()))
    }

    pub async fn update_product(&self, id: &ProductId, update: ProductUpdate) -> Result<Product, CatalogError> {
        validate_update(&update)?;
        if update.is_empty() {
            return self.fetch_product(id).await;
        }
        self.db.update_product(id, update).await?.ok_or_else(|| CatalogError::ProductNotFound(id.clone()))
    }

    pub async fn search_products(
        &self,
        filter: &ProductQueryFilter,
        pagination: &Pagination,
    ) -> Result<Page<Product>, CatalogError> {
        trace!("🗃️ Searching products. {filter}");
        let (products, total) = self.db.search_products(filter, pagination).await?;
        Ok(Page::new(pagination, total, products))
    }

    /// Inserts each product whose name is not yet in the catalog. Existing products are left untouched. Returns the
    /// products that were inserted.
    pub async fn ensure_products(&self, products: Vec<NewProduct>) -> Result<Vec<Product>, CatalogError> {
        let mut inserted = Vec::new();
        for product in products {
            if self.db.fetch_product_by_name(&product.name).await?.is_some() {
                trace!("🗃️ Product '{}' already exists", product.name);
                continue;
            }
            inserted.push(self.create_product(product).await?);
        }
        if !inserted.is_empty() {
            info!("🗃️ Seeded {} products", inserted.len());
        }
        Ok(inserted)
    }
}

fn validate_new_product(product: &NewProduct) -> Result<(), CatalogError> {
    if product.name.trim().is_empty() {
        return Err(CatalogError::InvalidProduct("Product name cannot be empty".into()));
    }
    if product.price.is_negative() {
        return Err(CatalogError::InvalidProduct(format!("Price cannot be negative. Got {}", product.price)));
    }
    if product.quantity < 0 {
        return Err(CatalogError::InvalidProduct(format!("Quantity cannot be negative. Got {}", product.quantity)));
    }
    Ok(())
}

fn validate_update(update: &ProductUpdate) -> Result<(), CatalogError> {
    if matches!(&update.name, Some(name) if name.trim().is_empty()) {
        return Err(CatalogError::InvalidProduct("Product name cannot be empty".into()));
    }
    if matches!(update.price, Some(p) if p.is_negative()) {
        return Err(CatalogError::InvalidProduct("Price cannot be negative".into()));
    }
    if matches!(update.quantity, Some(q) if q < 0) {
        return Err(CatalogError::InvalidProduct("Quantity cannot be negative".into()));
    }
    Ok(())
}
