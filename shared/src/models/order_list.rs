//! Order List scope

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StoreContext;

/// Entity kinds that carry a persisted custom display order.
///
/// Categories are absent: their `order` field is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Brand,
    Product,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Brand => "brand",
            Self::Product => "product",
        }
    }
}

/// (entity kind, store context) key of one order list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderScope {
    pub kind: EntityKind,
    pub store: StoreContext,
}

impl OrderScope {
    pub fn new(kind: EntityKind, store: StoreContext) -> Self {
        Self { kind, store }
    }

    pub fn brands(store: StoreContext) -> Self {
        Self::new(EntityKind::Brand, store)
    }

    pub fn products(store: StoreContext) -> Self {
        Self::new(EntityKind::Product, store)
    }

    /// Storage key, e.g. `brand_order:primary`
    pub fn key(&self) -> String {
        format!("{}_order:{}", self.kind.as_str(), self.store)
    }
}

impl fmt::Display for OrderScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}
