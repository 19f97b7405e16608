//! Shared value types for the order management system (OMS) crates.
//!
//! * [`Money`] is the fixed-point currency type used for every price, subtotal and order total.
//! * [`op!`] generates the operator impls for single-field numeric newtypes.
mod helpers;
mod money;

pub mod op;

pub use helpers::parse_boolean_flag;
pub use money::{Money, MoneyConversionError, DEFAULT_CURRENCY_CODE, MINOR_UNITS_PER_MAJOR};
