//! Batch mutation protocol types
//!
//! CatalogMutation: strongly typed write carried by `batch_write`.
//! A batch commits all-or-nothing; callers chunk large batches.

use serde::{Deserialize, Serialize};

/// One write inside an atomic batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum CatalogMutation {
    // ── Product ──
    SetProductStock {
        id: String,
        in_stock: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stock_quantity: Option<i64>,
    },
    DeleteProduct {
        id: String,
    },

    // ── Category ──
    SetCategoryOrder {
        id: String,
        order: i32,
    },
}

impl CatalogMutation {
    /// Identity of the record this mutation touches
    pub fn target_id(&self) -> &str {
        match self {
            Self::SetProductStock { id, .. }
            | Self::DeleteProduct { id }
            | Self::SetCategoryOrder { id, .. } => id,
        }
    }

    /// Resource name of the target record
    pub fn resource(&self) -> &'static str {
        match self {
            Self::SetProductStock { .. } | Self::DeleteProduct { .. } => "product",
            Self::SetCategoryOrder { .. } => "category",
        }
    }
}

/// New `order` value for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrderItem {
    pub id: String,
    pub order: i32,
}

impl From<SortOrderItem> for CatalogMutation {
    fn from(item: SortOrderItem) -> Self {
        CatalogMutation::SetCategoryOrder {
            id: item.id,
            order: item.order,
        }
    }
}

/// Outcome of a chunked batch commit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Mutations committed
    pub committed: usize,
    /// Chunks committed
    pub chunks: usize,
}
