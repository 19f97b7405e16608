use log::{debug, trace};
use sqlx::SqliteConnection;

use crate::{
    db_types::{CustomerId, Order, OrderId},
    sqlite::db::order_items,
    traits::StoreError,
};

/// Inserts a new order and its items. This is not atomic. Embed the call inside a transaction, and pass `&mut *tx`
/// as the connection argument, if the header and items must be written together.
pub async fn insert_order(order: &Order, conn: &mut SqliteConnection) -> Result<Order, StoreError> {
    sqlx::query(
        r#"
            INSERT INTO orders (id, customer_id, total_amount, status, payment_method, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(order.id.as_str())
    .bind(order.customer_id.as_str())
    .bind(order.total_amount())
    .bind(order.status.to_string())
    .bind(order.payment_method.map(|m| m.to_string()))
    .bind(order.created_at)
    .bind(order.updated_at)
    .execute(&mut *conn)
    .await?;
    order_items::upsert_items(order.items(), &mut *conn).await?;
    debug!("🗃️ Order [{}] inserted with {} items", order.id, order.items().len());
    fetch_stored(&order.id, conn).await
}

/// Writes the order header back and upserts its items.
pub async fn update_order(order: &Order, conn: &mut SqliteConnection) -> Result<Order, StoreError> {
    let result = sqlx::query(
        r#"
            UPDATE orders
            SET total_amount = $1, status = $2, payment_method = $3, updated_at = $4
            WHERE id = $5
        "#,
    )
    .bind(order.total_amount())
    .bind(order.status.to_string())
    .bind(order.payment_method.map(|m| m.to_string()))
    .bind(order.updated_at)
    .bind(order.id.as_str())
    .execute(&mut *conn)
    .await?;
    if result.rows_affected() != 1 {
        return Err(StoreError::DatabaseError(format!("Order {} could not be updated", order.id)));
    }
    order_items::upsert_items(order.items(), &mut *conn).await?;
    trace!("🗃️ Order [{}] saved with status {}", order.id, order.status);
    fetch_stored(&order.id, conn).await
}

/// Fetches the order with the given id, along with its items.
pub async fn fetch_order(id: &OrderId, conn: &mut SqliteConnection) -> Result<Option<Order>, StoreError> {
    let order: Option<Order> =
        sqlx::query_as("SELECT * FROM orders WHERE id = $1").bind(id.as_str()).fetch_optional(&mut *conn).await?;
    match order {
        Some(order) => {
            let items = order_items::fetch_items_for_order(&order.id, conn).await?;
            Ok(Some(order.with_items(items)))
        },
        None => Ok(None),
    }
}

async fn fetch_stored(id: &OrderId, conn: &mut SqliteConnection) -> Result<Order, StoreError> {
    fetch_order(id, conn).await?.ok_or_else(|| StoreError::DatabaseError(format!("Order {id} was not stored")))
}

/// Fetches a page of the customer's orders, newest first.
pub async fn fetch_orders_for_customer(
    customer_id: &CustomerId,
    limit: i64,
    offset: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Order>, StoreError> {
    let headers: Vec<Order> = sqlx::query_as(
        "SELECT * FROM orders WHERE customer_id = $1 ORDER BY created_at DESC, id LIMIT $2 OFFSET $3",
    )
    .bind(customer_id.as_str())
    .bind(limit)
    .bind(offset)
    .fetch_all(&mut *conn)
    .await?;
    let mut orders = Vec::with_capacity(headers.len());
    for order in headers {
        let items = order_items::fetch_items_for_order(&order.id, &mut *conn).await?;
        orders.push(order.with_items(items));
    }
    Ok(orders)
}

pub async fn count_orders_for_customer(
    customer_id: &CustomerId,
    conn: &mut SqliteConnection,
) -> Result<i64, StoreError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE customer_id = $1")
        .bind(customer_id.as_str())
        .fetch_one(conn)
        .await?;
    Ok(count)
}
