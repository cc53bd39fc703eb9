//! Brand Model

use serde::{Deserialize, Serialize};

use super::StoreContext;

/// Brand entity
///
/// Raw brand records come from two sources: the compiled-in seed list and
/// the remote store. Remote records may be missing a name entirely.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Category tag (e.g. "disposable-vapes", "thc-disposables")
    #[serde(default)]
    pub category: Option<String>,
    /// `None` for seed brands, which belong to both stores
    #[serde(default)]
    pub store: Option<StoreContext>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Capacity / range text (e.g. "5,000 puffs")
    #[serde(default)]
    pub capacity: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Canonical brand produced by reconciliation
///
/// Carries the identities of every raw record folded into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalBrand {
    #[serde(flatten)]
    pub brand: Brand,
    #[serde(default)]
    pub duplicate_ids: Vec<String>,
}

impl CanonicalBrand {
    pub fn new(brand: Brand) -> Self {
        Self {
            brand,
            duplicate_ids: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.brand.id
    }

    pub fn name(&self) -> &str {
        &self.brand.name
    }

    /// True when `id` is this record's identity or one it absorbed
    pub fn answers_to(&self, id: &str) -> bool {
        self.brand.id == id || self.duplicate_ids.iter().any(|d| d == id)
    }
}

/// Create brand payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandCreate {
    /// Explicit identity (slug-style); generated when absent
    pub id: Option<String>,
    pub name: String,
    pub category: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<String>,
    pub image: Option<String>,
}

/// Update brand payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandUpdate {
    pub name: Option<String>,
    pub category: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<String>,
    pub image: Option<String>,
}

impl Brand {
    /// Apply a partial update in place
    pub fn apply(&mut self, data: BrandUpdate) {
        if let Some(v) = data.name {
            self.name = v;
        }
        if let Some(v) = data.category {
            self.category = Some(v);
        }
        if let Some(v) = data.tagline {
            self.tagline = Some(v);
        }
        if let Some(v) = data.description {
            self.description = Some(v);
        }
        if let Some(v) = data.capacity {
            self.capacity = Some(v);
        }
        if let Some(v) = data.image {
            self.image = Some(v);
        }
    }
}
