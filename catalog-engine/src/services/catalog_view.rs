//! Merged catalog view of one store context
//!
//! Rebuilt in full from every product snapshot:
//! categories → dedupe, brands → reconcile with seeds → order list,
//! products → order list. Membership and form routing are evaluated on read.

use serde::Serialize;
use shared::models::{Brand, CanonicalBrand, Category, OrderScope, Product, StoreContext};
use shared::util::now_millis;

use crate::db::{CatalogStore, RepoResult};
use crate::ordering::resolve_order;
use crate::taxonomy::{
    BrandCatalog, FormInput, ProductForm, SEED_BRANDS, dedupe_categories, is_member,
    reconcile_brands, route_form,
};

#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub store: StoreContext,
    /// One category per normalized name, by `order`
    pub categories: Vec<Category>,
    /// Canonical brands in display order
    pub brands: Vec<CanonicalBrand>,
    /// Products in display order
    pub products: Vec<Product>,
    /// Millisecond timestamp of the recompute
    pub computed_at: i64,
    #[serde(skip)]
    brand_catalog: BrandCatalog,
    #[serde(skip)]
    raw_categories: Vec<Category>,
}

impl CatalogView {
    pub fn empty(store: StoreContext) -> Self {
        Self::compute(store, &[], &[], &[], &[], &[])
    }

    /// Pure recompute from one set of inputs
    pub fn compute(
        store: StoreContext,
        products: &[Product],
        brands: &[Brand],
        categories: &[Category],
        brand_order: &[String],
        product_order: &[String],
    ) -> Self {
        let brand_catalog = reconcile_brands(&SEED_BRANDS, brands);
        Self {
            store,
            categories: dedupe_categories(categories),
            brands: resolve_order(&brand_catalog.canonical, brand_order),
            products: resolve_order(products, product_order),
            computed_at: now_millis(),
            brand_catalog,
            raw_categories: categories.to_vec(),
        }
    }

    /// Read the rest of the catalog and recompute around a product snapshot
    pub async fn load(
        catalog: &dyn CatalogStore,
        store: StoreContext,
        products: &[Product],
    ) -> RepoResult<Self> {
        let brands = catalog.list_brands(store).await?;
        let categories = catalog.list_categories(store).await?;
        let brand_order = catalog.get_order_list(OrderScope::brands(store)).await?;
        let product_order = catalog.get_order_list(OrderScope::products(store)).await?;

        let view = Self::compute(
            store,
            products,
            &brands,
            &categories,
            &brand_order,
            &product_order,
        );
        tracing::debug!(
            store = %store,
            products = view.products.len(),
            brands = view.brands.len(),
            categories = view.categories.len(),
            "Catalog view recomputed"
        );
        Ok(view)
    }

    /// Brand answering to `id`: canonical, absorbed duplicate, or unnamed raw record
    pub fn brand_by_id(&self, id: &str) -> Option<&Brand> {
        self.brand_catalog.find(id)
    }

    pub fn canonical_brand(&self, id: &str) -> Option<&CanonicalBrand> {
        self.brand_catalog.canonical_for(id)
    }

    /// Category a product tag points at, by id or slug
    ///
    /// Falls back to records dropped by deduplication so legacy tags resolve.
    pub fn resolve_category(&self, tag: &str) -> Option<&Category> {
        let matches = |c: &&Category| c.id == tag || c.slug == tag;
        self.categories
            .iter()
            .find(matches)
            .or_else(|| self.raw_categories.iter().find(matches))
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products listed under `category`, in display order
    pub fn products_in(&self, category: &Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| is_member(p, category))
            .collect()
    }

    pub fn form_for(&self, product: &Product) -> ProductForm {
        let input = FormInput {
            product,
            category: product
                .category
                .as_deref()
                .and_then(|tag| self.resolve_category(tag)),
            brand: product
                .brand_id
                .as_deref()
                .and_then(|id| self.brand_by_id(id)),
        };
        route_form(&input)
    }

    pub fn brand_ids(&self) -> Vec<String> {
        self.brands.iter().map(|b| b.id().to_string()).collect()
    }

    pub fn product_ids(&self) -> Vec<String> {
        self.products.iter().map(|p| p.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn product(id: &str, name: &str, brand: Option<&str>, tag: Option<&str>) -> Product {
        Product {
            id: id.into(),
            store: StoreContext::Primary,
            brand_id: brand.map(Into::into),
            category: tag.map(Into::into),
            name: name.into(),
            price: Decimal::new(1999, 2),
            stock_quantity: 3,
            in_stock: true,
            images: vec![],
            description: None,
            details: None,
            created_at: 0,
        }
    }

    fn category(id: &str, name: &str, slug: &str, order: i32) -> Category {
        Category {
            id: id.into(),
            store: StoreContext::Primary,
            name: name.into(),
            slug: slug.into(),
            order,
        }
    }

    #[test]
    fn test_empty_view_contains_seed_brands() {
        let view = CatalogView::empty(StoreContext::Primary);
        assert_eq!(view.brands.len(), SEED_BRANDS.len());
        assert!(view.products.is_empty());
        assert!(view.brand_by_id("geekbar-pulse").is_some());
    }

    #[test]
    fn test_duplicate_brand_resolves_to_canonical() {
        let dynamic = vec![Brand {
            id: "abc123".into(),
            name: "geek bar pulse".into(),
            store: Some(StoreContext::Primary),
            ..Default::default()
        }];
        let view = CatalogView::compute(StoreContext::Primary, &[], &dynamic, &[], &[], &[]);
        assert_eq!(view.brands.len(), SEED_BRANDS.len());
        let canonical = view.canonical_brand("abc123").unwrap();
        assert_eq!(canonical.id(), "geekbar-pulse");
        assert_eq!(canonical.duplicate_ids, vec!["abc123"]);
    }

    #[test]
    fn test_brand_order_list_applied() {
        let order = vec!["wyld".to_string(), "kiva".to_string()];
        let view = CatalogView::compute(StoreContext::Primary, &[], &[], &[], &order, &[]);
        assert_eq!(&view.brand_ids()[..2], &["wyld", "kiva"]);
    }

    #[test]
    fn test_legacy_tag_resolves_through_dropped_duplicate() {
        let categories = vec![
            category("c0", "Disposable Vape", "disposable-vape", 0),
            category("c1", "Disposable Vapes", "disposable-vapes", 1),
        ];
        let view = CatalogView::compute(StoreContext::Primary, &[], &[], &categories, &[], &[]);
        assert_eq!(view.categories.len(), 1);
        assert_eq!(view.resolve_category("c1").map(|c| c.id.as_str()), Some("c1"));
    }

    #[test]
    fn test_products_in_and_form_for() {
        let products = vec![
            product("p1", "Pulse", Some("geekbar-pulse"), Some("thc-disposables")),
            product("p2", "Gummies", Some("wyld"), None),
            product("p3", "Carts", None, Some("thc")),
        ];
        let categories = vec![
            category("c0", "Disposable Vapes", "disposable-vapes", 0),
            category("c1", "THC Disposables", "thc-disposables", 1),
        ];
        let view =
            CatalogView::compute(StoreContext::Primary, &products, &[], &categories, &[], &[]);

        let vapes: Vec<_> = view.products_in(&view.categories[0]).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(vapes, vec!["p2"]);
        let thc: Vec<_> = view.products_in(&view.categories[1]).iter().map(|p| p.id.as_str()).collect();
        assert_eq!(thc, vec!["p3", "p1"]);

        assert_eq!(view.form_for(&products[0]), ProductForm::Standard);
        assert_eq!(view.form_for(&products[1]), ProductForm::Edible);
        assert_eq!(view.form_for(&products[2]), ProductForm::Thc);
    }
}
