use oms_engine::{
    db_types::{CustomerId, PaymentMethod, ProductId},
    order_objects::OrderLine,
    query_objects::{Pagination, ProductQueryFilter},
};
use serde::{Deserialize, Serialize};

/// Body of `POST /orders`. `items` may be omitted to create an empty cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: CustomerId,
    #[serde(default)]
    pub items: Vec<OrderLine>,
}

/// Body of `POST /orders/{id}/add-product`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddProductRequest {
    pub product_id: ProductId,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetPaymentRequest {
    pub payment_method: PaymentMethod,
}

/// Query string of `GET /products`, e.g. `?name=shirt&in_stock=true&page=2&size=20`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductSearchParams {
    pub name: Option<String>,
    pub in_stock: Option<bool>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl ProductSearchParams {
    pub fn filter(&self) -> ProductQueryFilter {
        let name = self.name.as_ref().map(|s| s.trim()).filter(|s| !s.is_empty()).map(String::from);
        ProductQueryFilter { name, in_stock: self.in_stock.unwrap_or(false) }
    }

    pub fn pagination(&self) -> Pagination {
        Pagination { page: self.page, size: self.size }
    }
}
