//! Stock verification and stock commitment.
//!
//! [`check_stock`] compares a set of requested quantities against the catalog and reports every line that cannot be
//! served. [`commit_stock`] removes verified quantities from stock through guarded decrements, so that two units of
//! work racing for the last units can never both succeed.
use std::fmt::Display;

use log::*;
use oms_common::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    db_types::{Product, ProductId},
    oms_api::errors::OrderFlowError,
    order_aggregate::AmountOverflow,
    order_objects::OrderLine,
    traits::{CatalogLookup, StockWriter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockCheckStatus {
    Ok,
    OutOfStock,
    NotExist,
}

impl StockCheckStatus {
    pub fn message(&self) -> &'static str {
        match self {
            StockCheckStatus::Ok => "Product is available.",
            StockCheckStatus::OutOfStock => "Product out of stock or insufficient.",
            StockCheckStatus::NotExist => "Product does not exist.",
        }
    }
}

/// The outcome of checking one requested line against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockCheckResult {
    pub product_id: ProductId,
    pub quantity: i64,
    /// Current catalog unit price. Zero if the product does not exist.
    pub price: Money,
    pub subtotal: Money,
    /// Units on hand at the time of the check.
    pub stock: i64,
    pub status: StockCheckStatus,
}

/// A line that could not be served, keyed by product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockShortfall {
    pub product_id: ProductId,
    pub status: StockCheckStatus,
}

impl StockShortfall {
    pub fn message(&self) -> &'static str {
        self.status.message()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct StockUnavailable(pub Vec<StockShortfall>);

impl StockUnavailable {
    pub fn shortfalls(&self) -> &[StockShortfall] {
        &self.0
    }
}

impl Display for StockUnavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Some products may currently be unavailable.")?;
        for s in &self.0 {
            write!(f, " [{}] {}", s.product_id, s.message())?;
        }
        Ok(())
    }
}

/// Classifies each requested line against the given catalog snapshot. The result has one entry per request, in
/// request order. Fails if the subtotal of any line that exists in the catalog cannot be represented.
pub fn classify_stock(
    requests: &[OrderLine],
    products: &[Product],
) -> Result<Vec<StockCheckResult>, AmountOverflow> {
    requests
        .iter()
        .map(|req| match products.iter().find(|p| p.id == req.product_id) {
            Some(product) => {
                let subtotal = product
                    .price
                    .checked_mul(req.quantity)
                    .ok_or_else(|| AmountOverflow { product_id: req.product_id.clone() })?;
                let status =
                    if product.quantity >= req.quantity { StockCheckStatus::Ok } else { StockCheckStatus::OutOfStock };
                Ok(StockCheckResult {
                    product_id: req.product_id.clone(),
                    quantity: req.quantity,
                    price: product.price,
                    subtotal,
                    stock: product.quantity,
                    status,
                })
            },
            None => Ok(StockCheckResult {
                product_id: req.product_id.clone(),
                quantity: req.quantity,
                price: Money::default(),
                subtotal: Money::default(),
                stock: 0,
                status: StockCheckStatus::NotExist,
            }),
        })
        .collect()
}

pub fn shortfalls(results: &[StockCheckResult]) -> Vec<StockShortfall> {
    results
        .iter()
        .filter(|r| r.status != StockCheckStatus::Ok)
        .map(|r| StockShortfall { product_id: r.product_id.clone(), status: r.status })
        .collect()
}

/// Verifies that every request can be served from current stock.
///
/// Requests must already be merged so that each product appears at most once. Returns the check results, in request
/// order, if every line is available. Otherwise, returns [`OrderFlowError::StockUnavailable`] listing every line that
/// failed.
pub async fn check_stock<C: CatalogLookup>(
    catalog: &mut C,
    requests: &[OrderLine],
) -> Result<Vec<StockCheckResult>, OrderFlowError> {
    if let Some(bad) = requests.iter().find(|r| r.quantity <= 0) {
        return Err(OrderFlowError::InvalidQuantity(bad.quantity));
    }
    if requests.is_empty() {
        return Ok(Vec::new());
    }
    let ids = requests.iter().map(|r| r.product_id.clone()).collect::<Vec<_>>();
    let products = catalog.fetch_products_by_ids(&ids).await?;
    let results = classify_stock(requests, &products)?;
    let missing = shortfalls(&results);
    if missing.is_empty() {
        trace!("📦️ Stock check passed for {} lines", results.len());
        Ok(results)
    } else {
        debug!("📦️ Stock check failed for {} of {} lines", missing.len(), results.len());
        Err(StockUnavailable(missing).into())
    }
}

/// Decrements stock for every verified line. If any guarded decrement fails, the error lists the lines that could not
/// be decremented and the caller must discard the unit of work.
pub async fn commit_stock<W: StockWriter>(work: &mut W, checked: &[StockCheckResult]) -> Result<(), OrderFlowError> {
    let mut missing = Vec::new();
    for line in checked {
        if !work.decrement_stock(&line.product_id, line.quantity).await? {
            warn!("📦️ Stock for product {} changed during the unit of work", line.product_id);
            missing.push(StockShortfall { product_id: line.product_id.clone(), status: StockCheckStatus::OutOfStock });
        }
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(StockUnavailable(missing).into())
    }
}
