//! Admin mutation flows
//!
//! Validates input, writes through the [`CatalogStore`], mirrors creations
//! into the sibling store context, and commits bulk changes in chunks.
//! Every successful mutation emits an audit line.

use std::sync::Arc;

use shared::models::{
    Brand, BrandCreate, BrandUpdate, Category, CategoryCreate, CategoryUpdate, OrderScope,
    Product, ProductCreate, ProductUpdate, StoreContext, slugify,
};
use shared::mutation::{BatchReport, CatalogMutation, SortOrderItem};
use shared::{AppError, AppResult, ErrorCode};

use crate::audit_log;
use crate::core::Config;
use crate::db::CatalogStore;
use crate::ordering::{self, OptimisticOrder, move_item};
use crate::sync::{BatchWriter, DualStorePropagator, Mirrored};
use crate::taxonomy::{normalize_name, seed_categories};
use crate::utils::validation::{
    validate_brand_create, validate_brand_update, validate_category_create,
    validate_category_update, validate_product_create, validate_product_update,
};

#[derive(Clone)]
pub struct AdminService {
    catalog: Arc<dyn CatalogStore>,
    propagator: DualStorePropagator,
    batch: BatchWriter,
}

impl std::fmt::Debug for AdminService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminService")
            .field("batch", &self.batch)
            .finish_non_exhaustive()
    }
}

impl AdminService {
    pub fn new(catalog: Arc<dyn CatalogStore>, config: &Config) -> Self {
        Self {
            propagator: DualStorePropagator::new(catalog.clone()),
            batch: BatchWriter::new(catalog.clone(), config.batch_chunk_size),
            catalog,
        }
    }

    // =========================================================================
    // Product
    // =========================================================================

    pub async fn create_product(
        &self,
        store: StoreContext,
        data: ProductCreate,
    ) -> AppResult<Mirrored<Product>> {
        validate_product_create(&data)?;
        let created = self.propagator.create_product(store, data).await?;
        audit_log!("create", format!("product:{}", created.source.id), store);
        Ok(created)
    }

    pub async fn update_product(&self, id: &str, data: ProductUpdate) -> AppResult<Product> {
        validate_product_update(&data)?;
        let product = self.catalog.update_product(id, data).await?;
        audit_log!("update", format!("product:{id}"), product.store);
        Ok(product)
    }

    pub async fn delete_product(&self, id: &str) -> AppResult<()> {
        self.catalog.delete_product(id).await?;
        audit_log!("delete", format!("product:{id}"), "-");
        Ok(())
    }

    pub async fn batch_delete_products(&self, ids: &[String]) -> AppResult<BatchReport> {
        let mutations = ids
            .iter()
            .map(|id| CatalogMutation::DeleteProduct { id: id.clone() })
            .collect();
        let report = self.batch.commit(mutations).await?;
        audit_log!(
            "batch_delete",
            "product",
            "-",
            format!("{} products in {} chunks", report.committed, report.chunks)
        );
        Ok(report)
    }

    /// Mark products in or out of stock; out of stock also zeroes the quantity
    pub async fn batch_set_stock_status(
        &self,
        ids: &[String],
        in_stock: bool,
    ) -> AppResult<BatchReport> {
        let mutations = ids
            .iter()
            .map(|id| CatalogMutation::SetProductStock {
                id: id.clone(),
                in_stock,
                stock_quantity: (!in_stock).then_some(0),
            })
            .collect();
        let report = self.batch.commit(mutations).await?;
        audit_log!(
            "batch_stock",
            "product",
            "-",
            format!("in_stock={} for {} products", in_stock, report.committed)
        );
        Ok(report)
    }

    // =========================================================================
    // Brand
    // =========================================================================

    pub async fn create_brand(
        &self,
        store: StoreContext,
        data: BrandCreate,
    ) -> AppResult<Mirrored<Brand>> {
        validate_brand_create(&data)?;
        let created = self.propagator.create_brand(store, data).await?;
        audit_log!("create", format!("brand:{}", created.source.id), store);
        Ok(created)
    }

    pub async fn update_brand(&self, id: &str, data: BrandUpdate) -> AppResult<Brand> {
        validate_brand_update(&data)?;
        let brand = self.catalog.update_brand(id, data).await?;
        audit_log!(
            "update",
            format!("brand:{id}"),
            brand.store.map_or("-", |s| s.as_str())
        );
        Ok(brand)
    }

    pub async fn delete_brand(&self, id: &str) -> AppResult<()> {
        self.catalog.delete_brand(id).await?;
        audit_log!("delete", format!("brand:{id}"), "-");
        Ok(())
    }

    // =========================================================================
    // Category
    // =========================================================================

    /// Create a category; slug derives from the name, order goes after the last one
    pub async fn create_category(
        &self,
        store: StoreContext,
        mut data: CategoryCreate,
    ) -> AppResult<Mirrored<Category>> {
        validate_category_create(&data)?;
        let existing = self.catalog.list_categories(store).await?;

        let slug = data.slug.take().unwrap_or_else(|| slugify(&data.name));
        if slug.is_empty() {
            return Err(AppError::validation("Category name yields an empty slug")
                .with_detail("field", "slug"));
        }
        if existing.iter().any(|c| c.slug == slug) {
            return Err(AppError::with_message(
                ErrorCode::CategorySlugExists,
                format!("Category slug '{slug}' already exists in {store}"),
            )
            .with_detail("slug", slug));
        }
        data.slug = Some(slug);
        if data.order.is_none() {
            data.order = Some(existing.iter().map(|c| c.order + 1).max().unwrap_or(0));
        }

        let created = self.propagator.create_category(store, data).await?;
        audit_log!("create", format!("category:{}", created.source.id), store);
        Ok(created)
    }

    pub async fn update_category(&self, id: &str, data: CategoryUpdate) -> AppResult<Category> {
        validate_category_update(&data)?;
        let category = self.catalog.update_category(id, data).await?;
        audit_log!("update", format!("category:{id}"), category.store);
        Ok(category)
    }

    pub async fn delete_category(&self, id: &str) -> AppResult<()> {
        self.catalog.delete_category(id).await?;
        audit_log!("delete", format!("category:{id}"), "-");
        Ok(())
    }

    /// Create the seed categories a store context is missing, without mirroring
    pub async fn install_seed_categories(&self, store: StoreContext) -> AppResult<Vec<Category>> {
        let existing = self.catalog.list_categories(store).await?;
        let mut created = Vec::new();
        for seed in seed_categories() {
            let key = normalize_name(&seed.name);
            if existing.iter().any(|c| normalize_name(&c.name) == key) {
                continue;
            }
            created.push(self.catalog.create_category(store, seed).await?);
        }
        if !created.is_empty() {
            tracing::info!(store = %store, count = created.len(), "Seed categories installed");
            audit_log!("seed", "category", store, format!("{} created", created.len()));
        }
        Ok(created)
    }

    // =========================================================================
    // Ordering
    // =========================================================================

    /// Drag a brand within the displayed sequence and persist the result
    pub async fn reorder_brands(
        &self,
        store: StoreContext,
        displayed: &[String],
        from: usize,
        to: usize,
    ) -> AppResult<Vec<String>> {
        self.reorder(OrderScope::brands(store), displayed, from, to)
            .await
    }

    /// Drag a product within the displayed sequence and persist the result
    pub async fn reorder_products(
        &self,
        store: StoreContext,
        displayed: &[String],
        from: usize,
        to: usize,
    ) -> AppResult<Vec<String>> {
        self.reorder(OrderScope::products(store), displayed, from, to)
            .await
    }

    async fn reorder(
        &self,
        scope: OrderScope,
        displayed: &[String],
        from: usize,
        to: usize,
    ) -> AppResult<Vec<String>> {
        let seq = move_item(displayed, from, to)?;
        self.persist_order(scope, seq).await
    }

    /// Persist the tentative sequence of `order` after applying a drag
    ///
    /// Success commits it. On failure it stays pending; the caller decides
    /// between `commit` and `revert`.
    pub async fn reorder_optimistic(
        &self,
        scope: OrderScope,
        order: &mut OptimisticOrder,
        from: usize,
        to: usize,
    ) -> AppResult<Vec<String>> {
        let seq = order.apply_move(from, to)?.to_vec();
        let persisted = self.persist_order(scope, seq).await?;
        order.commit();
        Ok(persisted)
    }

    /// Write a full order list; an unchanged list is not rewritten
    async fn persist_order(&self, scope: OrderScope, seq: Vec<String>) -> AppResult<Vec<String>> {
        let current = self.catalog.get_order_list(scope).await?;
        if current == seq {
            tracing::debug!(scope = %scope.key(), "Order list unchanged, skipping write");
            return Ok(seq);
        }
        self.catalog.set_order_list(scope, seq.clone()).await?;
        audit_log!(
            "reorder",
            scope.key(),
            scope.store,
            format!("{} entries", seq.len())
        );
        Ok(seq)
    }

    /// Drag a category and commit every resulting `order` value in one batch
    pub async fn reorder_categories(
        &self,
        displayed: &[Category],
        from: usize,
        to: usize,
    ) -> AppResult<Vec<SortOrderItem>> {
        let orders = ordering::reorder_categories(displayed, from, to)?;
        let mutations = orders.iter().cloned().map(CatalogMutation::from).collect();
        let report = self.batch.commit(mutations).await?;
        if let Some(first) = displayed.first() {
            audit_log!(
                "reorder",
                "category",
                first.store,
                format!("{} orders in {} chunks", report.committed, report.chunks)
            );
        }
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use rust_decimal::Decimal;

    fn service(store: &Arc<MemoryStore>) -> AdminService {
        AdminService::new(store.clone(), &Config::for_tests())
    }

    fn product(name: &str) -> ProductCreate {
        ProductCreate {
            brand_id: None,
            category: None,
            name: name.into(),
            price: Decimal::new(999, 2),
            stock_quantity: 4,
            in_stock: true,
            images: vec![],
            description: None,
            details: None,
        }
    }

    #[tokio::test]
    async fn test_create_product_rejects_negative_price() {
        let store = Arc::new(MemoryStore::new());
        let admin = service(&store);
        let mut data = product("Bad");
        data.price = Decimal::new(-1, 0);

        let err = admin
            .create_product(StoreContext::Primary, data)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductInvalidPrice);
        assert!(store.products(StoreContext::Primary).is_empty());
    }

    #[tokio::test]
    async fn test_update_is_not_propagated() {
        let store = Arc::new(MemoryStore::new());
        let admin = service(&store);
        let created = admin
            .create_product(StoreContext::Primary, product("Pulse"))
            .await
            .unwrap();

        admin
            .update_product(
                &created.source.id,
                ProductUpdate {
                    name: Some("Pulse X".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(store.product(&created.source.id).unwrap().name, "Pulse X");
        assert_eq!(store.product(&created.mirror.id).unwrap().name, "Pulse");
    }

    #[tokio::test]
    async fn test_missing_records_report_typed_not_found() {
        let store = Arc::new(MemoryStore::new());
        let admin = service(&store);

        let err = admin
            .update_product("ghost", ProductUpdate::default())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ProductNotFound);
        assert_eq!(err.detail("id"), Some(&serde_json::json!("ghost")));

        let err = admin.delete_brand("ghost").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BrandNotFound);

        let err = admin.delete_category("ghost").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);

        let err = admin
            .batch_delete_products(&["ghost".to_string()])
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BatchChunkFailed);
    }

    #[tokio::test]
    async fn test_category_defaults() {
        let store = Arc::new(MemoryStore::new());
        let admin = service(&store);
        admin
            .install_seed_categories(StoreContext::Primary)
            .await
            .unwrap();

        let created = admin
            .create_category(
                StoreContext::Primary,
                CategoryCreate {
                    name: "Hookah Tobacco".into(),
                    slug: None,
                    order: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(created.source.slug, "hookah-tobacco");
        assert_eq!(created.source.order, 4);
        assert_eq!(created.mirror.store, StoreContext::Secondary);

        let err = admin
            .create_category(
                StoreContext::Primary,
                CategoryCreate {
                    name: "Edibles".into(),
                    slug: None,
                    order: None,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CategorySlugExists);
    }

    #[tokio::test]
    async fn test_install_seed_categories_skips_existing() {
        let store = Arc::new(MemoryStore::new());
        let admin = service(&store);
        let first = admin
            .install_seed_categories(StoreContext::Secondary)
            .await
            .unwrap();
        assert_eq!(first.len(), seed_categories().len());
        let second = admin
            .install_seed_categories(StoreContext::Secondary)
            .await
            .unwrap();
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn test_reorder_same_sequence_twice_is_noop() {
        let store = Arc::new(MemoryStore::new());
        let admin = service(&store);
        let displayed: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();

        let persisted = admin
            .reorder_brands(StoreContext::Primary, &displayed, 2, 0)
            .await
            .unwrap();
        assert_eq!(persisted, vec!["c", "a", "b"]);

        // Second write would fail if attempted
        store.fail_after(0);
        let again = admin
            .reorder_brands(StoreContext::Primary, &persisted, 1, 1)
            .await
            .unwrap();
        assert_eq!(again, persisted);
    }

    #[tokio::test]
    async fn test_optimistic_reorder_left_pending_on_failure() {
        let store = Arc::new(MemoryStore::new());
        let admin = service(&store);
        let scope = OrderScope::products(StoreContext::Primary);
        let mut order = OptimisticOrder::new(vec!["x".into(), "y".into()]);

        store.fail_after(0);
        let err = admin
            .reorder_optimistic(scope, &mut order, 0, 1)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NetworkError);
        assert!(order.is_pending());
        assert_eq!(order.current(), ["y".to_string(), "x".to_string()].as_slice());

        store.heal();
        order.revert();
        let persisted = admin
            .reorder_optimistic(scope, &mut order, 1, 0)
            .await
            .unwrap();
        assert_eq!(persisted, vec!["y", "x"]);
        assert!(!order.is_pending());
    }

    #[tokio::test]
    async fn test_batch_stock_out_zeroes_quantity() {
        let store = Arc::new(MemoryStore::new());
        let admin = service(&store);
        let a = admin
            .create_product(StoreContext::Primary, product("a"))
            .await
            .unwrap();

        let report = admin
            .batch_set_stock_status(std::slice::from_ref(&a.source.id), false)
            .await
            .unwrap();
        assert_eq!(report.committed, 1);
        let p = store.product(&a.source.id).unwrap();
        assert!(!p.in_stock);
        assert_eq!(p.stock_quantity, 0);
    }
}
