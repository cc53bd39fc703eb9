//! Dual-store propagation
//!
//! Creating a product, brand or category in one store context creates a
//! mirror in the sibling context. Updates are never propagated. Mirrored
//! products start out of stock since inventory is per location.

use std::sync::Arc;

use serde::Serialize;
use shared::models::{
    Brand, BrandCreate, Category, CategoryCreate, Product, ProductCreate, StoreContext,
};
use shared::{AppError, AppResult};

use crate::db::{CatalogStore, RepoError};

/// A created record and its sibling mirror
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Mirrored<T> {
    pub source: T,
    pub mirror: T,
}

/// Payload recreating `product` in the sibling context, without stock
pub fn mirror_product_payload(product: &Product) -> ProductCreate {
    ProductCreate {
        brand_id: product.brand_id.clone(),
        category: product.category.clone(),
        name: product.name.clone(),
        price: product.price,
        stock_quantity: 0,
        in_stock: false,
        images: product.images.clone(),
        description: product.description.clone(),
        details: product.details.clone(),
    }
}

/// Payload recreating `brand` in the sibling context
///
/// The mirror gets its own identity; reconciliation folds it by name.
pub fn mirror_brand_payload(brand: &Brand) -> BrandCreate {
    BrandCreate {
        id: None,
        name: brand.name.clone(),
        category: brand.category.clone(),
        tagline: brand.tagline.clone(),
        description: brand.description.clone(),
        capacity: brand.capacity.clone(),
        image: brand.image.clone(),
    }
}

pub fn mirror_category_payload(category: &Category) -> CategoryCreate {
    CategoryCreate {
        name: category.name.clone(),
        slug: Some(category.slug.clone()),
        order: Some(category.order),
    }
}

fn mirror_error(resource: &str, source_id: &str, target: StoreContext, e: RepoError) -> AppError {
    tracing::error!(
        resource,
        source_id,
        target_store = %target,
        error = %e,
        "Mirror creation failed, source record kept"
    );
    AppError::mirror_failed(
        source_id,
        format!("Failed to mirror {resource} {source_id} into {target}: {e}"),
    )
    .with_detail("target_store", target.as_str())
}

#[derive(Clone)]
pub struct DualStorePropagator {
    store: Arc<dyn CatalogStore>,
}

impl std::fmt::Debug for DualStorePropagator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DualStorePropagator").finish_non_exhaustive()
    }
}

impl DualStorePropagator {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn create_product(
        &self,
        store: StoreContext,
        data: ProductCreate,
    ) -> AppResult<Mirrored<Product>> {
        let source = self.store.create_product(store, data).await?;
        let target = store.sibling();
        let mirror = self
            .store
            .create_product(target, mirror_product_payload(&source))
            .await
            .map_err(|e| mirror_error("product", &source.id, target, e))?;
        tracing::debug!(source_id = %source.id, mirror_id = %mirror.id, "Product mirrored");
        Ok(Mirrored { source, mirror })
    }

    pub async fn create_brand(
        &self,
        store: StoreContext,
        data: BrandCreate,
    ) -> AppResult<Mirrored<Brand>> {
        let source = self.store.create_brand(store, data).await?;
        let target = store.sibling();
        let mirror = self
            .store
            .create_brand(target, mirror_brand_payload(&source))
            .await
            .map_err(|e| mirror_error("brand", &source.id, target, e))?;
        tracing::debug!(source_id = %source.id, mirror_id = %mirror.id, "Brand mirrored");
        Ok(Mirrored { source, mirror })
    }

    pub async fn create_category(
        &self,
        store: StoreContext,
        data: CategoryCreate,
    ) -> AppResult<Mirrored<Category>> {
        let source = self.store.create_category(store, data).await?;
        let target = store.sibling();
        let mirror = self
            .store
            .create_category(target, mirror_category_payload(&source))
            .await
            .map_err(|e| mirror_error("category", &source.id, target, e))?;
        tracing::debug!(source_id = %source.id, mirror_id = %mirror.id, "Category mirrored");
        Ok(Mirrored { source, mirror })
    }
}
