use thiserror::Error;

use crate::{
    db_types::{CustomerId, OrderId, PaymentMethod, ProductId},
    order_aggregate::{AmountOverflow, InvalidTransition},
    stock_ledger::StockUnavailable,
    traits::StoreError,
};

#[derive(Debug, Clone, Error)]
pub enum OrderFlowError {
    #[error("Order {0} does not exist.")]
    OrderNotFound(OrderId),
    #[error("Customer {0} does not exist.")]
    CustomerNotFound(CustomerId),
    #[error("{0}")]
    InvalidTransition(#[from] InvalidTransition),
    #[error("{0}")]
    StockUnavailable(#[from] StockUnavailable),
    #[error("Payment method '{0}' is not supported. Only bank transfers are accepted.")]
    UnsupportedPaymentMethod(PaymentMethod),
    #[error("Quantity must be a positive whole number. Got {0}.")]
    InvalidQuantity(i64),
    #[error("{0}")]
    AmountOverflow(#[from] AmountOverflow),
    #[error("{0}")]
    StoreError(#[from] StoreError),
}

impl OrderFlowError {
    /// `true` if the error was caused by the request rather than by the backend.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, OrderFlowError::StoreError(_))
    }
}

#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("Product {0} does not exist.")]
    ProductNotFound(ProductId),
    #[error("Invalid product data: {0}")]
    InvalidProduct(String),
    #[error("{0}")]
    StoreError(#[from] StoreError),
}

#[derive(Debug, Clone, Error)]
pub enum CustomerError {
    #[error("Customer {0} does not exist.")]
    CustomerNotFound(CustomerId),
    #[error("Invalid customer data: {0}")]
    InvalidCustomer(String),
    #[error("{0}")]
    StoreError(#[from] StoreError),
}
