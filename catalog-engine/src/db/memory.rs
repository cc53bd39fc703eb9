//! In-memory catalog store
//!
//! Implements [`CatalogStore`] with the same observable contract as the remote
//! store: per-record atomic writes, all-or-nothing batches with a documented
//! size limit, and a full product snapshot pushed per store context after
//! every write that touches that context.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use shared::models::{
    Brand, BrandCreate, BrandUpdate, Category, CategoryCreate, CategoryUpdate, OrderScope,
    Product, ProductCreate, ProductUpdate, StoreContext, slugify,
};
use shared::mutation::CatalogMutation;
use shared::util::{new_record_id, now_millis};
use tokio::sync::watch;

use super::{CatalogStore, RepoError, RepoResult, Subscription};

/// Maximum mutations accepted by one `batch_write`
pub const MEMORY_MAX_BATCH_SIZE: usize = 500;

#[derive(Debug, Default)]
struct Tables {
    products: Vec<Product>,
    brands: Vec<Brand>,
    categories: Vec<Category>,
}

impl Tables {
    fn product_mut(&mut self, id: &str) -> RepoResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RepoError::not_found("product", id))
    }

    fn brand_mut(&mut self, id: &str) -> RepoResult<&mut Brand> {
        self.brands
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| RepoError::not_found("brand", id))
    }

    fn category_mut(&mut self, id: &str) -> RepoResult<&mut Category> {
        self.categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RepoError::not_found("category", id))
    }

    /// Store context touched by a mutation, or NotFound
    fn locate(&self, mutation: &CatalogMutation) -> RepoResult<StoreContext> {
        let id = mutation.target_id();
        match mutation {
            CatalogMutation::SetProductStock { .. } | CatalogMutation::DeleteProduct { .. } => self
                .products
                .iter()
                .find(|p| p.id == id)
                .map(|p| p.store)
                .ok_or_else(|| RepoError::not_found("product", id)),
            CatalogMutation::SetCategoryOrder { .. } => self
                .categories
                .iter()
                .find(|c| c.id == id)
                .map(|c| c.store)
                .ok_or_else(|| RepoError::not_found("category", id)),
        }
    }

    fn apply(&mut self, mutation: CatalogMutation) -> RepoResult<()> {
        match mutation {
            CatalogMutation::SetProductStock {
                id,
                in_stock,
                stock_quantity,
            } => {
                let product = self.product_mut(&id)?;
                product.in_stock = in_stock;
                if let Some(quantity) = stock_quantity {
                    product.stock_quantity = quantity;
                }
            }
            CatalogMutation::DeleteProduct { id } => self.products.retain(|p| p.id != id),
            CatalogMutation::SetCategoryOrder { id, order } => {
                self.category_mut(&id)?.order = order;
            }
        }
        Ok(())
    }
}

/// In-process [`CatalogStore`]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    order_lists: DashMap<String, Vec<String>>,
    product_feeds: HashMap<StoreContext, watch::Sender<Arc<Vec<Product>>>>,
    /// Remaining successful writes before every write fails (`None` = unlimited)
    write_budget: Mutex<Option<usize>>,
    reads_failing: AtomicBool,
    max_batch_size: usize,
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tables = self.tables.read();
        f.debug_struct("MemoryStore")
            .field("products", &tables.products.len())
            .field("brands", &tables.brands.len())
            .field("categories", &tables.categories.len())
            .field("order_lists", &self.order_lists.len())
            .finish()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let product_feeds = StoreContext::ALL
            .into_iter()
            .map(|store| (store, watch::channel(Arc::new(Vec::new())).0))
            .collect();
        Self {
            tables: RwLock::new(Tables::default()),
            order_lists: DashMap::new(),
            product_feeds,
            write_budget: Mutex::new(None),
            reads_failing: AtomicBool::new(false),
            max_batch_size: MEMORY_MAX_BATCH_SIZE,
        }
    }

    pub fn with_max_batch_size(mut self, max: usize) -> Self {
        self.max_batch_size = max.max(1);
        self
    }

    /// Let the next `n` writes succeed, then fail every write
    pub fn fail_after(&self, n: usize) {
        *self.write_budget.lock() = Some(n);
    }

    /// Make list and order-list reads fail until `heal`
    pub fn fail_reads(&self) {
        self.reads_failing.store(true, Ordering::SeqCst);
    }

    /// Remove injected failures
    pub fn heal(&self) {
        *self.write_budget.lock() = None;
        self.reads_failing.store(false, Ordering::SeqCst);
    }

    // ── Raw inserts (existing remote data, bypasses create semantics) ──

    pub fn insert_product(&self, product: Product) {
        let store = product.store;
        self.tables.write().products.push(product);
        self.publish(store);
    }

    pub fn insert_brand(&self, brand: Brand) {
        let store = brand.store;
        self.tables.write().brands.push(brand);
        self.publish_for(store);
    }

    pub fn insert_category(&self, category: Category) {
        let store = category.store;
        self.tables.write().categories.push(category);
        self.publish(store);
    }

    // ── Inspection ──

    pub fn products(&self, store: StoreContext) -> Vec<Product> {
        self.tables
            .read()
            .products
            .iter()
            .filter(|p| p.store == store)
            .cloned()
            .collect()
    }

    pub fn product(&self, id: &str) -> Option<Product> {
        self.tables.read().products.iter().find(|p| p.id == id).cloned()
    }

    pub fn category(&self, id: &str) -> Option<Category> {
        self.tables.read().categories.iter().find(|c| c.id == id).cloned()
    }

    fn check_read(&self) -> RepoResult<()> {
        if self.reads_failing.load(Ordering::SeqCst) {
            return Err(RepoError::Unavailable("injected read failure".into()));
        }
        Ok(())
    }

    fn charge_write(&self) -> RepoResult<()> {
        let mut budget = self.write_budget.lock();
        match budget.as_mut() {
            None => Ok(()),
            Some(0) => Err(RepoError::Unavailable("injected write failure".into())),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
        }
    }

    /// Push the current product snapshot of `store` to its subscribers
    fn publish(&self, store: StoreContext) {
        let snapshot: Vec<Product> = self.products(store);
        if let Some(tx) = self.product_feeds.get(&store) {
            tx.send_replace(Arc::new(snapshot));
        }
    }

    /// Records without a store tag are visible to both contexts
    fn publish_for(&self, store: Option<StoreContext>) {
        match store {
            Some(store) => self.publish(store),
            None => StoreContext::ALL.into_iter().for_each(|s| self.publish(s)),
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    fn subscribe_products(&self, store: StoreContext) -> Subscription<Product> {
        // Both contexts are created in `new`
        let rx = match self.product_feeds.get(&store) {
            Some(tx) => tx.subscribe(),
            None => watch::channel(Arc::new(Vec::new())).1,
        };
        Subscription::new(rx)
    }

    async fn list_brands(&self, store: StoreContext) -> RepoResult<Vec<Brand>> {
        self.check_read()?;
        Ok(self
            .tables
            .read()
            .brands
            .iter()
            .filter(|b| b.store.is_none_or(|s| s == store))
            .cloned()
            .collect())
    }

    async fn list_categories(&self, store: StoreContext) -> RepoResult<Vec<Category>> {
        self.check_read()?;
        Ok(self
            .tables
            .read()
            .categories
            .iter()
            .filter(|c| c.store == store)
            .cloned()
            .collect())
    }

    async fn create_product(&self, store: StoreContext, data: ProductCreate) -> RepoResult<Product> {
        self.charge_write()?;
        let product = Product {
            id: new_record_id(),
            store,
            brand_id: data.brand_id,
            category: data.category,
            name: data.name,
            price: data.price,
            stock_quantity: data.stock_quantity,
            in_stock: data.in_stock,
            images: data.images,
            description: data.description,
            details: data.details,
            created_at: now_millis(),
        };
        self.tables.write().products.push(product.clone());
        self.publish(store);
        Ok(product)
    }

    async fn update_product(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        self.charge_write()?;
        let updated = {
            let mut tables = self.tables.write();
            let product = tables.product_mut(id)?;
            product.apply(data);
            product.clone()
        };
        self.publish(updated.store);
        Ok(updated)
    }

    async fn delete_product(&self, id: &str) -> RepoResult<()> {
        self.charge_write()?;
        let store = {
            let mut tables = self.tables.write();
            let store = tables.product_mut(id)?.store;
            tables.products.retain(|p| p.id != id);
            store
        };
        self.publish(store);
        Ok(())
    }

    async fn create_brand(&self, store: StoreContext, data: BrandCreate) -> RepoResult<Brand> {
        self.charge_write()?;
        let brand = {
            let mut tables = self.tables.write();
            let id = data.id.unwrap_or_else(new_record_id);
            if tables.brands.iter().any(|b| b.id == id) {
                return Err(RepoError::Duplicate(format!("brand {id}")));
            }
            let brand = Brand {
                id,
                name: data.name,
                category: data.category,
                store: Some(store),
                tagline: data.tagline,
                description: data.description,
                capacity: data.capacity,
                image: data.image,
            };
            tables.brands.push(brand.clone());
            brand
        };
        self.publish(store);
        Ok(brand)
    }

    async fn update_brand(&self, id: &str, data: BrandUpdate) -> RepoResult<Brand> {
        self.charge_write()?;
        let updated = {
            let mut tables = self.tables.write();
            let brand = tables.brand_mut(id)?;
            brand.apply(data);
            brand.clone()
        };
        self.publish_for(updated.store);
        Ok(updated)
    }

    async fn delete_brand(&self, id: &str) -> RepoResult<()> {
        self.charge_write()?;
        let store = {
            let mut tables = self.tables.write();
            let store = tables.brand_mut(id)?.store;
            tables.brands.retain(|b| b.id != id);
            store
        };
        self.publish_for(store);
        Ok(())
    }

    async fn create_category(
        &self,
        store: StoreContext,
        data: CategoryCreate,
    ) -> RepoResult<Category> {
        self.charge_write()?;
        let category = Category {
            id: new_record_id(),
            store,
            slug: data.slug.unwrap_or_else(|| slugify(&data.name)),
            name: data.name,
            order: data.order.unwrap_or(0),
        };
        self.tables.write().categories.push(category.clone());
        self.publish(store);
        Ok(category)
    }

    async fn update_category(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        self.charge_write()?;
        let updated = {
            let mut tables = self.tables.write();
            let category = tables.category_mut(id)?;
            category.apply(data);
            category.clone()
        };
        self.publish(updated.store);
        Ok(updated)
    }

    async fn delete_category(&self, id: &str) -> RepoResult<()> {
        self.charge_write()?;
        let store = {
            let mut tables = self.tables.write();
            let store = tables.category_mut(id)?.store;
            tables.categories.retain(|c| c.id != id);
            store
        };
        self.publish(store);
        Ok(())
    }

    async fn get_order_list(&self, scope: OrderScope) -> RepoResult<Vec<String>> {
        self.check_read()?;
        Ok(self
            .order_lists
            .get(&scope.key())
            .map(|ids| ids.value().clone())
            .unwrap_or_default())
    }

    async fn set_order_list(&self, scope: OrderScope, ids: Vec<String>) -> RepoResult<()> {
        self.charge_write()?;
        self.order_lists.insert(scope.key(), ids);
        self.publish(scope.store);
        Ok(())
    }

    async fn batch_write(&self, mutations: Vec<CatalogMutation>) -> RepoResult<()> {
        if mutations.len() > self.max_batch_size {
            return Err(RepoError::BatchTooLarge {
                size: mutations.len(),
                max: self.max_batch_size,
            });
        }
        self.charge_write()?;

        let mut touched: HashSet<StoreContext> = HashSet::new();
        {
            let mut tables = self.tables.write();
            // Validate every target first so the batch commits all-or-nothing.
            // A target deleted earlier in the same batch counts as present.
            for mutation in &mutations {
                touched.insert(tables.locate(mutation)?);
            }
            for mutation in mutations {
                match tables.apply(mutation) {
                    // Update of a record removed earlier in this batch
                    Ok(()) | Err(RepoError::NotFound { .. }) => {}
                    Err(e) => return Err(e),
                }
            }
        }

        for store in touched {
            self.publish(store);
        }
        Ok(())
    }

    fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }
}
