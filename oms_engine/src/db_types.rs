use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use log::error;
use oms_common::Money;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error)]
#[error("Conversion error: {0}")]
pub struct ConversionError(String);

/// Generates a string-backed identifier type. Fresh identifiers are random v4 UUIDs.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Type, Serialize, Deserialize)]
        #[sqlx(transparent)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn random() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl FromStr for $name {
            type Err = ConversionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                if s.is_empty() {
                    return Err(ConversionError(format!("{} cannot be empty", stringify!($name))));
                }
                Ok(Self(s.to_string()))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

//--------------------------------------     Identifiers     ---------------------------------------------------------
string_id!(
    /// The unique identifier of an order.
    OrderId
);
string_id!(
    /// The unique identifier of a catalog product.
    ProductId
);
string_id!(
    /// The unique identifier of a customer.
    CustomerId
);
string_id!(OrderItemId);

//--------------------------------------   OrderStatusType     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatusType {
    /// The order is open. Items can be added to it.
    Cart,
    /// Stock has been reserved for the order and it is waiting for a payment method.
    Checkout,
    /// A payment method has been chosen. The order is waiting for the payment to be confirmed.
    AwaitingPayment,
    /// The order has been paid for.
    Complete,
    /// Reserved for orders that can no longer progress. No operation produces this status.
    Failed,
}

impl Display for OrderStatusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatusType::Cart => write!(f, "cart"),
            OrderStatusType::Checkout => write!(f, "checkout"),
            OrderStatusType::AwaitingPayment => write!(f, "awaiting_payment"),
            OrderStatusType::Complete => write!(f, "complete"),
            OrderStatusType::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for OrderStatusType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cart" => Ok(Self::Cart),
            "checkout" => Ok(Self::Checkout),
            "awaiting_payment" => Ok(Self::AwaitingPayment),
            "complete" => Ok(Self::Complete),
            "failed" => Ok(Self::Failed),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

//--------------------------------------    PaymentMethod      ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    EWallet,
}

/// The payment methods that the order flow currently accepts.
pub const SUPPORTED_PAYMENT_METHODS: [PaymentMethod; 1] = [PaymentMethod::BankTransfer];

impl PaymentMethod {
    pub fn is_supported(&self) -> bool {
        SUPPORTED_PAYMENT_METHODS.contains(self)
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::BankTransfer => write!(f, "bank_transfer"),
            PaymentMethod::EWallet => write!(f, "e_wallet"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank_transfer" => Ok(Self::BankTransfer),
            "e_wallet" => Ok(Self::EWallet),
            s => {
                error!("Invalid payment method: {s}");
                Err(ConversionError(format!("Invalid payment method: {s}")))
            },
        }
    }
}

//--------------------------------------       Product         ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Money,
    /// Units currently on hand. Never negative.
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    pub quantity: i64,
}

impl NewProduct {
    pub fn new<S: Into<String>>(name: S, price: Money, quantity: i64) -> Self {
        Self { name: name.into(), description: String::new(), price, quantity }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Money>,
    pub quantity: Option<i64>,
}

impl ProductUpdate {
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price(mut self, price: Money) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.price.is_none() && self.quantity.is_none()
    }
}

//--------------------------------------       Customer        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Set when the customer has been soft-deleted. Deleted customers cannot place orders.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl NewCustomer {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_phone<S: Into<String>>(mut self, phone: S) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_address<S: Into<String>>(mut self, address: S) -> Self {
        self.address = address.into();
        self
    }
}

//--------------------------------------      OrderItem        ---------------------------------------------------------
/// A line of an order. `price` is the unit price captured when the line was last verified against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub price: Money,
    pub quantity: i64,
    pub subtotal: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------        Order          ---------------------------------------------------------
/// An order and its items. The items and the total are only changed through the methods in `order_aggregate`, so
/// that `total_amount` always equals the sum of the item subtotals.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub(crate) total_amount: Money,
    pub status: OrderStatusType,
    pub payment_method: Option<PaymentMethod>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    #[serde(default)]
    pub(crate) items: Vec<OrderItem>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn status_strings_match_storage_format() {
        for status in [
            OrderStatusType::Cart,
            OrderStatusType::Checkout,
            OrderStatusType::AwaitingPayment,
            OrderStatusType::Complete,
            OrderStatusType::Failed,
        ] {
            let s = status.to_string();
            assert_eq!(s.parse::<OrderStatusType>().unwrap(), status);
            assert_eq!(serde_json::to_string(&status).unwrap(), format!("\"{s}\""));
        }
        assert!("paid".parse::<OrderStatusType>().is_err());
    }

    #[test]
    fn only_bank_transfer_is_supported() {
        assert!(PaymentMethod::BankTransfer.is_supported());
        assert!(!PaymentMethod::EWallet.is_supported());
        assert_eq!("e_wallet".parse::<PaymentMethod>().unwrap(), PaymentMethod::EWallet);
        assert!("credit_card".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn ids() {
        let a = ProductId::random();
        let b = ProductId::random();
        assert_ne!(a, b);
        assert_eq!(" p1 ".parse::<ProductId>().unwrap(), ProductId::from("p1"));
        assert!("  ".parse::<CustomerId>().is_err());
        assert_eq!(serde_json::to_string(&OrderId::from("o-1")).unwrap(), "\"o-1\"");
    }

    #[test]
    fn product_update_builder() {
        let update = ProductUpdate::default();
        assert!(update.is_empty());
        let update = update.with_price(Money::from(500)).with_quantity(3);
        assert!(!update.is_empty());
        assert_eq!(update.name, None);
    }
}
