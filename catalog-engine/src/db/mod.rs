//! Persistence boundary
//!
//! The remote catalog store is an external collaborator. The engine talks to
//! it only through [`CatalogStore`]; [`MemoryStore`] is the in-process
//! implementation used by tests and local runs.

pub mod memory;
pub mod subscription;

pub use memory::{MEMORY_MAX_BATCH_SIZE, MemoryStore};
pub use subscription::Subscription;

use async_trait::async_trait;
use shared::models::{
    Brand, BrandCreate, BrandUpdate, Category, CategoryCreate, CategoryUpdate, OrderScope,
    Product, ProductCreate, ProductUpdate, StoreContext,
};
use shared::mutation::CatalogMutation;
use shared::{AppError, ErrorCode};
use thiserror::Error;

/// Repository error types
#[derive(Debug, Clone, Error)]
pub enum RepoError {
    #[error("Not found: {resource} {id}")]
    NotFound { resource: &'static str, id: String },

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Batch of {size} exceeds maximum of {max}")]
    BatchTooLarge { size: usize, max: usize },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

impl RepoError {
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        let code = match &err {
            RepoError::NotFound { resource, id } => {
                let code = match *resource {
                    "product" => ErrorCode::ProductNotFound,
                    "brand" => ErrorCode::BrandNotFound,
                    "category" => ErrorCode::CategoryNotFound,
                    _ => return AppError::not_found(format!("{resource} {id}")),
                };
                return AppError::with_message(code, err.to_string())
                    .with_detail("resource", *resource)
                    .with_detail("id", id.as_str());
            }
            RepoError::Duplicate(_) => ErrorCode::AlreadyExists,
            RepoError::Validation(_) => ErrorCode::ValidationFailed,
            RepoError::BatchTooLarge { .. } => ErrorCode::BatchTooLarge,
            RepoError::Unavailable(_) => ErrorCode::NetworkError,
        };
        AppError::with_message(code, err.to_string())
    }
}

/// Remote catalog store consumed by the engine
///
/// Individual writes are atomic per record; `batch_write` is atomic per call.
/// Creates assign the record identity (brands may request one explicitly).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // ── Reads ──

    /// Push subscription: a full product snapshot for `store` on every change
    fn subscribe_products(&self, store: StoreContext) -> Subscription<Product>;

    async fn list_brands(&self, store: StoreContext) -> RepoResult<Vec<Brand>>;

    async fn list_categories(&self, store: StoreContext) -> RepoResult<Vec<Category>>;

    // ── Product ──

    async fn create_product(&self, store: StoreContext, data: ProductCreate) -> RepoResult<Product>;

    async fn update_product(&self, id: &str, data: ProductUpdate) -> RepoResult<Product>;

    async fn delete_product(&self, id: &str) -> RepoResult<()>;

    // ── Brand ──

    async fn create_brand(&self, store: StoreContext, data: BrandCreate) -> RepoResult<Brand>;

    async fn update_brand(&self, id: &str, data: BrandUpdate) -> RepoResult<Brand>;

    async fn delete_brand(&self, id: &str) -> RepoResult<()>;

    // ── Category ──

    async fn create_category(
        &self,
        store: StoreContext,
        data: CategoryCreate,
    ) -> RepoResult<Category>;

    async fn update_category(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category>;

    async fn delete_category(&self, id: &str) -> RepoResult<()>;

    // ── Order lists ──

    /// Persisted order list; empty when none was ever written
    async fn get_order_list(&self, scope: OrderScope) -> RepoResult<Vec<String>>;

    async fn set_order_list(&self, scope: OrderScope, ids: Vec<String>) -> RepoResult<()>;

    // ── Batch ──

    /// Commit every mutation or none of them
    async fn batch_write(&self, mutations: Vec<CatalogMutation>) -> RepoResult<()>;

    /// Documented backend limit for one `batch_write` call
    fn max_batch_size(&self) -> usize;
}
