//! Category Model

use serde::{Deserialize, Serialize};

use super::StoreContext;

/// Category entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub store: StoreContext,
    pub name: String,
    pub slug: String,
    /// Authoritative display position (0-based after a reorder)
    #[serde(default)]
    pub order: i32,
}

/// Create category payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub name: String,
    /// Derived from the name when absent
    pub slug: Option<String>,
    /// Appended after the current maximum when absent
    pub order: Option<i32>,
}

/// Update category payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub order: Option<i32>,
}

impl Category {
    /// Apply a partial update in place
    pub fn apply(&mut self, data: CategoryUpdate) {
        if let Some(v) = data.name {
            self.name = v;
        }
        if let Some(v) = data.slug {
            self.slug = v;
        }
        if let Some(v) = data.order {
            self.order = v;
        }
    }
}

/// Build a URL slug from a display name: "THC Disposables" -> "thc-disposables"
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}
