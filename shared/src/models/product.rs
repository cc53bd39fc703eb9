//! Product Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::StoreContext;

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    /// Store context that owns this record (and its inventory)
    pub store: StoreContext,
    /// Brand reference (raw brand id, may point at a folded duplicate)
    #[serde(default)]
    pub brand_id: Option<String>,
    /// Category tag. Frequently missing or carrying a legacy value,
    /// see the membership classifier for how it is interpreted.
    #[serde(default)]
    pub category: Option<String>,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub in_stock: bool,
    /// Image references (upload pipeline is external)
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Free-text details (flavor notes, puff count, ...)
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub created_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCreate {
    pub brand_id: Option<String>,
    pub category: Option<String>,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub in_stock: bool,
    #[serde(default)]
    pub images: Vec<String>,
    pub description: Option<String>,
    pub details: Option<String>,
}

/// Update product payload (partial, `None` leaves the field untouched)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub brand_id: Option<String>,
    pub category: Option<String>,
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<i64>,
    pub in_stock: Option<bool>,
    pub images: Option<Vec<String>>,
    pub description: Option<String>,
    pub details: Option<String>,
}

impl Product {
    /// Apply a partial update in place
    pub fn apply(&mut self, data: ProductUpdate) {
        if let Some(v) = data.brand_id {
            self.brand_id = Some(v);
        }
        if let Some(v) = data.category {
            self.category = Some(v);
        }
        if let Some(v) = data.name {
            self.name = v;
        }
        if let Some(v) = data.price {
            self.price = v;
        }
        if let Some(v) = data.stock_quantity {
            self.stock_quantity = v;
        }
        if let Some(v) = data.in_stock {
            self.in_stock = v;
        }
        if let Some(v) = data.images {
            self.images = v;
        }
        if let Some(v) = data.description {
            self.description = Some(v);
        }
        if let Some(v) = data.details {
            self.details = Some(v);
        }
    }
}
