use std::fmt::Debug;

use log::*;

use crate::{
    db_types::{Customer, CustomerId, NewCustomer},
    oms_api::errors::CustomerError,
    traits::CustomerManagement,
};

/// Registration and lookup of the customers that own orders.
pub struct CustomerApi<B> {
    db: B,
}

impl<B: Debug> Debug for CustomerApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CustomerApi ({:?})", self.db)
    }
}

impl<B> CustomerApi<B>
where B: CustomerManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn register_customer(&self, customer: NewCustomer) -> Result<Customer, CustomerError> {
        if customer.name.trim().is_empty() {
            return Err(CustomerError::InvalidCustomer("Customer name cannot be empty".into()));
        }
        let customer = self.db.insert_customer(customer).await?;
        debug!("🗃️ Customer [{}] registered", customer.id);
        Ok(customer)
    }

    /// Fetches an active customer. Soft-deleted customers are reported as not found.
    pub async fn fetch_customer(&self, customer_id: &CustomerId) -> Result<Customer, CustomerError> {
        match self.db.fetch_customer(customer_id).await? {
            Some(c) if !c.is_deleted() => Ok(c),
            _ => Err(CustomerError::CustomerNotFound(customer_id.clone())),
        }
    }

    pub async fn soft_delete_customers(&self, customer_ids: &[CustomerId]) -> Result<u64, CustomerError> {
        let deleted = self.db.soft_delete_customers(customer_ids).await?;
        info!("🗃️ {deleted} of {} customers deleted", customer_ids.len());
        Ok(deleted)
    }
}
