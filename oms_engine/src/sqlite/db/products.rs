use log::{debug, trace};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::{
    db_types::{NewProduct, Product, ProductId, ProductUpdate},
    query_objects::ProductQueryFilter,
    traits::StoreError,
};

pub async fn insert_product(product: NewProduct, conn: &mut SqliteConnection) -> Result<Product, StoreError> {
    let id = ProductId::random();
    let product = sqlx::query_as(
        r#"
            INSERT INTO products (id, name, description, price, quantity)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *;
        "#,
    )
    .bind(id.as_str())
    .bind(product.name)
    .bind(product.description)
    .bind(product.price)
    .bind(product.quantity)
    .fetch_one(conn)
    .await?;
    Ok(product)
}

pub async fn fetch_product(id: &ProductId, conn: &mut SqliteConnection) -> Result<Option<Product>, StoreError> {
    let product =
        sqlx::query_as("SELECT * FROM products WHERE id = $1").bind(id.as_str()).fetch_optional(conn).await?;
    Ok(product)
}

pub async fn fetch_product_by_name(name: &str, conn: &mut SqliteConnection) -> Result<Option<Product>, StoreError> {
    let product = sqlx::query_as("SELECT * FROM products WHERE name = $1 ORDER BY created_at LIMIT 1")
        .bind(name)
        .fetch_optional(conn)
        .await?;
    Ok(product)
}

/// Fetches every product whose id is in `ids`. Unknown ids are ignored.
pub async fn fetch_products_by_ids(
    ids: &[ProductId],
    conn: &mut SqliteConnection,
) -> Result<Vec<Product>, StoreError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut builder = QueryBuilder::new("SELECT * FROM products WHERE id IN (");
    let mut id_list = builder.separated(", ");
    for id in ids {
        id_list.push_bind(id.as_str());
    }
    builder.push(")");
    trace!("🗃️ Executing query: {}", builder.sql());
    let products = builder.build_query_as::<Product>().fetch_all(conn).await?;
    Ok(products)
}

/// Removes `quantity` units from the product, but only if at least that many are in stock. Returns whether the stock
/// was changed.
pub async fn decrement_stock(
    id: &ProductId,
    quantity: i64,
    conn: &mut SqliteConnection,
) -> Result<bool, StoreError> {
    let result = sqlx::query(
        r#"
            UPDATE products
            SET quantity = quantity - $1, updated_at = CURRENT_TIMESTAMP
            WHERE id = $2 AND quantity >= $3
        "#,
    )
    .bind(quantity)
    .bind(id.as_str())
    .bind(quantity)
    .execute(conn)
    .await?;
    let updated = result.rows_affected() == 1;
    if updated {
        debug!("🗃️ Took {quantity} units of product {id} from stock");
    }
    Ok(updated)
}

pub async fn update_product(
    id: &ProductId,
    update: ProductUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<Product>, StoreError> {
    if update.is_empty() {
        debug!("🗃️ No fields to update for product {id}. Update request skipped.");
        return fetch_product(id, conn).await;
    }
    let mut builder = QueryBuilder::new("UPDATE products SET updated_at = CURRENT_TIMESTAMP, ");
    let mut set_clause = builder.separated(", ");
    if let Some(name) = update.name {
        set_clause.push("name = ");
        set_clause.push_bind_unseparated(name);
    }
    if let Some(description) = update.description {
        set_clause.push("description = ");
        set_clause.push_bind_unseparated(description);
    }
    if let Some(price) = update.price {
        set_clause.push("price = ");
        set_clause.push_bind_unseparated(price);
    }
    if let Some(quantity) = update.quantity {
        set_clause.push("quantity = ");
        set_clause.push_bind_unseparated(quantity);
    }
    builder.push(" WHERE id = ");
    builder.push_bind(id.as_str());
    builder.push(" RETURNING *");
    trace!("🗃️ Executing query: {}", builder.sql());
    let product = builder.build_query_as::<Product>().fetch_optional(conn).await?;
    Ok(product)
}

fn push_filter<'a>(builder: &mut QueryBuilder<'a, Sqlite>, filter: &'a ProductQueryFilter) {
    if filter.is_empty() {
        return;
    }
    builder.push(" WHERE ");
    let mut where_clause = builder.separated(" AND ");
    if let Some(name) = &filter.name {
        where_clause.push("name LIKE ");
        where_clause.push_bind_unseparated(format!("%{name}%"));
    }
    if filter.in_stock {
        where_clause.push("quantity > 0");
    }
}

/// Returns the products matching `filter`, ordered by creation time and then by name.
pub async fn search_products(
    filter: &ProductQueryFilter,
    limit: i64,
    offset: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Product>, StoreError> {
    let mut builder = QueryBuilder::new("SELECT * FROM products");
    push_filter(&mut builder, filter);
    builder.push(" ORDER BY created_at, name LIMIT ");
    builder.push_bind(limit);
    builder.push(" OFFSET ");
    builder.push_bind(offset);
    trace!("🗃️ Executing query: {}", builder.sql());
    let products = builder.build_query_as::<Product>().fetch_all(conn).await?;
    Ok(products)
}

pub async fn count_products(filter: &ProductQueryFilter, conn: &mut SqliteConnection) -> Result<i64, StoreError> {
    let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM products");
    push_filter(&mut builder, filter);
    let count = builder.build_query_scalar::<i64>().fetch_one(conn).await?;
    Ok(count)
}
