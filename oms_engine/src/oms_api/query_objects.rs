use std::fmt::Display;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Page selection for list queries. Pages are 1-based. Missing or out-of-range values are clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl Pagination {
    pub fn new(page: i64, size: i64) -> Self {
        Self { page: Some(page), size: Some(size) }
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    pub fn size(&self) -> i64 {
        self.size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.size())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: i64,
    pub size: i64,
    pub total: i64,
}

/// One page of a list query, with the total number of matching records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub pagination: PageInfo,
    pub content: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(pagination: &Pagination, total: i64, content: Vec<T>) -> Self {
        let pagination = PageInfo { page: pagination.page(), size: pagination.size(), total };
        Self { pagination, content }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQueryFilter {
    /// Case-insensitive substring match on the product name.
    pub name: Option<String>,
    /// Only return products with at least one unit in stock.
    #[serde(default)]
    pub in_stock: bool,
}

impl ProductQueryFilter {
    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn in_stock(mut self) -> Self {
        self.in_stock = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && !self.in_stock
    }
}

impl Display for ProductQueryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "No filters.");
        }
        if let Some(name) = &self.name {
            write!(f, "name: {name}. ")?;
        }
        if self.in_stock {
            write!(f, "in stock only. ")?;
        }
        Ok(())
    }
}
