//! Shared types for the catalog engine
//!
//! Common types used across crates: catalog models, the batch mutation
//! protocol, error types, and small utilities.

pub mod error;
pub mod models;
pub mod mutation;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{
    Brand, BrandCreate, BrandUpdate, CanonicalBrand, Category, CategoryCreate, CategoryUpdate,
    EntityKind, OrderScope, Product, ProductCreate, ProductUpdate, StoreContext,
};
pub use mutation::{BatchReport, CatalogMutation, SortOrderItem};
pub use serde::{Deserialize, Serialize};
