use sqlx::SqliteConnection;

use crate::{
    db_types::{OrderId, OrderItem},
    traits::StoreError,
};

/// Fetches the items of an order in the order they were added.
pub async fn fetch_items_for_order(
    order_id: &OrderId,
    conn: &mut SqliteConnection,
) -> Result<Vec<OrderItem>, StoreError> {
    let items = sqlx::query_as("SELECT * FROM order_items WHERE order_id = $1 ORDER BY position")
        .bind(order_id.as_str())
        .fetch_all(conn)
        .await?;
    Ok(items)
}

/// Inserts new items and overwrites the quantity, price and subtotal of existing ones. The slice order is stored as
/// the item position.
pub async fn upsert_items(items: &[OrderItem], conn: &mut SqliteConnection) -> Result<(), StoreError> {
    for (position, item) in items.iter().enumerate() {
        sqlx::query(
            r#"
                INSERT INTO order_items
                    (id, order_id, product_id, price, quantity, subtotal, position, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (id) DO UPDATE SET
                    price = excluded.price,
                    quantity = excluded.quantity,
                    subtotal = excluded.subtotal,
                    position = excluded.position,
                    updated_at = excluded.updated_at
            "#,
        )
        .bind(item.id.as_str())
        .bind(item.order_id.as_str())
        .bind(item.product_id.as_str())
        .bind(item.price)
        .bind(item.quantity)
        .bind(item.subtotal)
        .bind(position as i64)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}
