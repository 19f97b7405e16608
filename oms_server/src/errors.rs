use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use log::error;
use oms_engine::{stock_ledger::StockUnavailable, CatalogError, CustomerError, OrderFlowError};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Could not read request path: {0}")]
    InvalidRequestPath(String),
    #[error("Could not read request query: {0}")]
    InvalidRequestQuery(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    StockUnavailable(StockUnavailable),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestPath(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequestQuery(_) => StatusCode::BAD_REQUEST,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::StockUnavailable(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            Self::StockUnavailable(e) => {
                let errors = e
                    .shortfalls()
                    .iter()
                    .map(|s| json!({ "field": s.product_id, "message": s.message() }))
                    .collect::<Vec<_>>();
                json!({ "error": self.to_string(), "errors": errors })
            },
            _ => json!({ "error": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).insert_header(ContentType::json()).body(body.to_string())
    }
}

impl From<OrderFlowError> for ServerError {
    fn from(e: OrderFlowError) -> Self {
        match e {
            OrderFlowError::OrderNotFound(_) | OrderFlowError::CustomerNotFound(_) => Self::NoRecordFound(e.to_string()),
            OrderFlowError::StockUnavailable(s) => Self::StockUnavailable(s),
            OrderFlowError::InvalidTransition(_) |
            OrderFlowError::UnsupportedPaymentMethod(_) |
            OrderFlowError::InvalidQuantity(_) |
            OrderFlowError::AmountOverflow(_) => Self::InvalidRequest(e.to_string()),
            OrderFlowError::StoreError(e) => {
                error!("💻️ Order operation failed on the backend. {e}");
                Self::BackendError(e.to_string())
            },
        }
    }
}

impl From<CatalogError> for ServerError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::ProductNotFound(_) => Self::NoRecordFound(e.to_string()),
            CatalogError::InvalidProduct(_) => Self::InvalidRequest(e.to_string()),
            CatalogError::StoreError(e) => {
                error!("💻️ Catalog operation failed on the backend. {e}");
                Self::BackendError(e.to_string())
            },
        }
    }
}

impl From<CustomerError> for ServerError {
    fn from(e: CustomerError) -> Self {
        match e {
            CustomerError::CustomerNotFound(_) => Self::NoRecordFound(e.to_string()),
            CustomerError::InvalidCustomer(_) => Self::InvalidRequest(e.to_string()),
            CustomerError::StoreError(e) => {
                error!("💻️ Customer operation failed on the backend. {e}");
                Self::BackendError(e.to_string())
            },
        }
    }
}
