use log::debug;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{Customer, CustomerId, NewCustomer},
    traits::StoreError,
};

pub async fn insert_customer(customer: NewCustomer, conn: &mut SqliteConnection) -> Result<Customer, StoreError> {
    let id = CustomerId::random();
    let customer = sqlx::query_as(
        r#"
            INSERT INTO customers (id, name, email, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *;
        "#,
    )
    .bind(id.as_str())
    .bind(customer.name)
    .bind(customer.email)
    .bind(customer.phone)
    .bind(customer.address)
    .fetch_one(conn)
    .await?;
    Ok(customer)
}

pub async fn fetch_customer(id: &CustomerId, conn: &mut SqliteConnection) -> Result<Option<Customer>, StoreError> {
    let customer =
        sqlx::query_as("SELECT * FROM customers WHERE id = $1").bind(id.as_str()).fetch_optional(conn).await?;
    Ok(customer)
}

/// `true` if the customer exists and has not been deleted.
pub async fn customer_exists(id: &CustomerId, conn: &mut SqliteConnection) -> Result<bool, StoreError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM customers WHERE id = $1 AND deleted_at IS NULL)",
    )
    .bind(id.as_str())
    .fetch_one(conn)
    .await?;
    Ok(exists)
}

pub async fn soft_delete_customers(ids: &[CustomerId], conn: &mut SqliteConnection) -> Result<u64, StoreError> {
    if ids.is_empty() {
        return Ok(0);
    }
    let mut builder = QueryBuilder::new(
        "UPDATE customers SET deleted_at = CURRENT_TIMESTAMP, updated_at = CURRENT_TIMESTAMP WHERE deleted_at IS NULL \
         AND id IN (",
    );
    let mut id_list = builder.separated(", ");
    for id in ids {
        id_list.push_bind(id.as_str());
    }
    builder.push(")");
    let result = builder.build().execute(conn).await?;
    debug!("🗃️ Soft-deleted {} customers", result.rows_affected());
    Ok(result.rows_affected())
}
