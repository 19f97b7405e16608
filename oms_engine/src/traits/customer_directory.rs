use crate::{
    db_types::{Customer, CustomerId, NewCustomer},
    traits::StoreError,
};

/// Customer lookups from inside a unit of work.
#[allow(async_fn_in_trait)]
pub trait CustomerDirectory {
    /// `true` if the customer exists and has not been soft-deleted.
    async fn customer_exists(&mut self, customer_id: &CustomerId) -> Result<bool, StoreError>;
}

#[allow(async_fn_in_trait)]
pub trait CustomerManagement {
    async fn insert_customer(&self, customer: NewCustomer) -> Result<Customer, StoreError>;

    /// Fetches the customer record, including soft-deleted customers.
    async fn fetch_customer(&self, customer_id: &CustomerId) -> Result<Option<Customer>, StoreError>;

    /// Marks the given customers as deleted. Returns the number of customers that were deleted by this call.
    async fn soft_delete_customers(&self, customer_ids: &[CustomerId]) -> Result<u64, StoreError>;
}
