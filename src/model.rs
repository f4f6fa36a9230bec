// Product model: the single entity the inventory manager handles.
// Raw shapes (CSV rows, API payloads) are converted into `Product` through
// `TryFrom`, so ids and prices are validated once, at construction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while building a `Product` from untyped input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    #[error("invalid product identifier: '{0}'")]
    InvalidId(String),

    #[error("invalid price: '{0}' (expected a non-negative decimal)")]
    InvalidPrice(String),

    #[error("no identifier left after {0}")]
    IdExhausted(u64),
}

/// Positive integer identifier. Assigned once at creation, never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub const FIRST: ProductId = ProductId(1);

    pub fn new(value: u64) -> Result<Self, ProductError> {
        if value == 0 {
            return Err(ProductError::InvalidId(value.to_string()));
        }
        Ok(ProductId(value))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The following id, or `IdExhausted` at `u64::MAX`.
    pub fn next(self) -> Result<ProductId, ProductError> {
        self.0
            .checked_add(1)
            .map(ProductId)
            .ok_or(ProductError::IdExhausted(self.0))
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = ProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<u64>()
            .map_err(|_| ProductError::InvalidId(trimmed.to_string()))?;
        ProductId::new(value)
    }
}

/// Parse a price, keeping the scale the user typed (`2.50` stays `2.50`).
pub fn parse_price(raw: &str) -> Result<Decimal, ProductError> {
    let trimmed = raw.trim();
    let price = Decimal::from_str(trimmed).map_err(|_| ProductError::InvalidPrice(trimmed.to_string()))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ProductError::InvalidPrice(trimmed.to_string()));
    }
    Ok(price)
}

/// The four mutable fields of a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub aisle: String,
    pub department: String,
    pub price: Decimal,
}

impl ProductFields {
    /// Build the field set, rejecting negative prices.
    pub fn new(
        name: impl Into<String>,
        aisle: impl Into<String>,
        department: impl Into<String>,
        price: Decimal,
    ) -> Result<Self, ProductError> {
        if price.is_sign_negative() && !price.is_zero() {
            return Err(ProductError::InvalidPrice(price.to_string()));
        }
        Ok(ProductFields {
            name: name.into(),
            aisle: aisle.into(),
            department: department.into(),
            price,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub aisle: String,
    pub department: String,
    pub price: Decimal,
}

impl Product {
    pub fn new(id: ProductId, fields: ProductFields) -> Self {
        Product {
            id,
            name: fields.name,
            aisle: fields.aisle,
            department: fields.department,
            price: fields.price,
        }
    }

    /// Replace every non-id field.
    pub fn apply(&mut self, fields: ProductFields) {
        self.name = fields.name;
        self.aisle = fields.aisle;
        self.department = fields.department;
        self.price = fields.price;
    }

    pub fn fields(&self) -> ProductFields {
        ProductFields {
            name: self.name.clone(),
            aisle: self.aisle.clone(),
            department: self.department.clone(),
            price: self.price,
        }
    }
}

/// One CSV row, exactly as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub aisle: String,
    pub department: String,
    pub price: String,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ProductError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        Ok(Product {
            id: record.id.parse()?,
            price: parse_price(&record.price)?,
            name: record.name,
            aisle: record.aisle,
            department: record.department,
        })
    }
}

impl From<&Product> for ProductRecord {
    fn from(product: &Product) -> Self {
        ProductRecord {
            id: product.id.to_string(),
            name: product.name.clone(),
            aisle: product.aisle.clone(),
            department: product.department.clone(),
            price: product.price.to_string(),
        }
    }
}
