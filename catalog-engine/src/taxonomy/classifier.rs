//! Category membership and edit-form routing
//!
//! Product category tags grew informally: some hold a category id, some a
//! slug, some a free-form label, many are missing. Both decisions below are
//! ordered rule tables evaluated top to bottom; the first rule that returns
//! `Some` decides.

use serde::{Deserialize, Serialize};
use shared::models::{Brand, Category, Product};

/// Spellings of the disposable-vape tag found in stored data
pub const DISPOSABLE_VAPE_TAGS: &[&str] = &["disposable-vape", "disposable_vape", "disposable vape"];

/// Brand name fragments of known disposable-vape lines
pub const DISPOSABLE_VAPE_BRAND_KEYWORDS: &[&str] = &[
    "geek bar",
    "geekbar",
    "lost mary",
    "elf bar",
    "elfbar",
    "fume",
    "breeze smoke",
    "hyde",
    "flum",
    "mr fog",
    "funky republic",
];

fn has_disposable_vape_tag(tag: &str) -> bool {
    DISPOSABLE_VAPE_TAGS.iter().any(|t| tag.contains(t))
}

/// Product tag, blank counts as missing
fn product_tag_str(product: &Product) -> Option<&str> {
    product.category.as_deref().filter(|tag| !tag.trim().is_empty())
}

fn lower_tag(product: &Product) -> Option<String> {
    product_tag_str(product).map(str::to_lowercase)
}

// ── Membership ──

/// One membership rule: `None` passes to the next rule
pub type MembershipRule = fn(&Product, &Category) -> Option<bool>;

fn exact_tag(product: &Product, category: &Category) -> Option<bool> {
    let tag = product_tag_str(product)?;
    (tag == category.id || tag == category.slug).then_some(true)
}

/// Untagged products count as disposable vapes
fn disposable_vape(product: &Product, category: &Category) -> Option<bool> {
    if !category.name.to_lowercase().contains("disposable vape") {
        return None;
    }
    Some(match lower_tag(product) {
        None => true,
        Some(tag) => has_disposable_vape_tag(&tag) && !tag.contains("thc"),
    })
}

fn keyword_rule(product: &Product, category: &Category, keyword: &str) -> Option<bool> {
    if !category.name.to_lowercase().contains(keyword) {
        return None;
    }
    Some(lower_tag(product).is_some_and(|tag| tag.contains(keyword)))
}

fn thc(product: &Product, category: &Category) -> Option<bool> {
    keyword_rule(product, category, "thc")
}

fn edible(product: &Product, category: &Category) -> Option<bool> {
    keyword_rule(product, category, "edible")
}

fn cigarette(product: &Product, category: &Category) -> Option<bool> {
    keyword_rule(product, category, "cigarette")
}

/// Membership rules in evaluation order
pub const MEMBERSHIP_RULES: &[(&str, MembershipRule)] = &[
    ("exact_tag", exact_tag),
    ("disposable_vape", disposable_vape),
    ("thc", thc),
    ("edible", edible),
    ("cigarette", cigarette),
];

/// Name of the rule that decides membership, `None` when no rule applies
pub fn deciding_rule(product: &Product, category: &Category) -> Option<(&'static str, bool)> {
    MEMBERSHIP_RULES
        .iter()
        .find_map(|(name, rule)| rule(product, category).map(|member| (*name, member)))
}

/// Whether `product` is listed under `category`
pub fn is_member(product: &Product, category: &Category) -> bool {
    deciding_rule(product, category).is_some_and(|(_, member)| member)
}

// ── Form routing ──

/// Admin edit form for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductForm {
    Thc,
    Edible,
    /// Disposable vapes, cigarettes and anything unclassified
    Standard,
}

/// Everything form routing may look at
#[derive(Debug, Clone, Copy)]
pub struct FormInput<'a> {
    pub product: &'a Product,
    /// Category record the product tag resolves to
    pub category: Option<&'a Category>,
    pub brand: Option<&'a Brand>,
}

pub type FormRule = fn(&FormInput<'_>) -> Option<ProductForm>;

/// Verdict carried by one tag or slug, `None` when it says nothing definite
pub fn form_verdict(value: &str) -> Option<ProductForm> {
    let value = value.to_lowercase();
    if value.contains("thc") {
        Some(ProductForm::Thc)
    } else if value.contains("edible") {
        Some(ProductForm::Edible)
    } else if has_disposable_vape_tag(&value) || value.contains("cigarette") {
        Some(ProductForm::Standard)
    } else {
        None
    }
}

/// THC or edible hint carried by the tag itself
fn has_restricted_hint(tag: &str) -> bool {
    tag.contains("thc") || tag.contains("edible")
}

/// Overrides brand hints only; a tag naming thc or edible falls through
fn explicit_disposable_tag(input: &FormInput<'_>) -> Option<ProductForm> {
    lower_tag(input.product)
        .filter(|tag| has_disposable_vape_tag(tag) && !has_restricted_hint(tag))
        .map(|_| ProductForm::Standard)
}

fn disposable_brand_keyword(input: &FormInput<'_>) -> Option<ProductForm> {
    let name = input.brand?.name.to_lowercase();
    DISPOSABLE_VAPE_BRAND_KEYWORDS
        .iter()
        .any(|k| name.contains(k))
        .then_some(ProductForm::Standard)
}

fn product_tag(input: &FormInput<'_>) -> Option<ProductForm> {
    form_verdict(product_tag_str(input.product)?)
}

fn category_slug(input: &FormInput<'_>) -> Option<ProductForm> {
    form_verdict(&input.category?.slug)
}

fn brand_category(input: &FormInput<'_>) -> Option<ProductForm> {
    form_verdict(input.brand?.category.as_deref()?)
}

/// Form routing rules in evaluation order
pub const FORM_RULES: &[(&str, FormRule)] = &[
    ("explicit_disposable_tag", explicit_disposable_tag),
    ("disposable_brand_keyword", disposable_brand_keyword),
    ("product_tag", product_tag),
    ("category_slug", category_slug),
    ("brand_category", brand_category),
];

/// Edit form for a product
pub fn route_form(input: &FormInput<'_>) -> ProductForm {
    FORM_RULES
        .iter()
        .find_map(|(_, rule)| rule(input))
        .unwrap_or(ProductForm::Standard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::StoreContext;

    fn product(tag: Option<&str>) -> Product {
        Product {
            id: "p1".into(),
            store: StoreContext::Primary,
            brand_id: None,
            category: tag.map(Into::into),
            name: "Test".into(),
            price: Decimal::ZERO,
            stock_quantity: 0,
            in_stock: false,
            images: vec![],
            description: None,
            details: None,
            created_at: 0,
        }
    }

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.into(),
            store: StoreContext::Primary,
            name: name.into(),
            slug: shared::models::slugify(name),
            order: 0,
        }
    }

    #[test]
    fn test_missing_tag_is_disposable_vape_not_thc() {
        let p = product(None);
        assert!(is_member(&p, &category("c1", "Disposable Vapes")));
        assert!(!is_member(&p, &category("c2", "THC Disposables")));
        assert!(!is_member(&p, &category("c3", "Edibles")));
    }

    #[test]
    fn test_blank_tag_counts_as_missing() {
        let vapes = category("c1", "Disposable Vapes");
        let thc = category("c2", "THC Disposables");
        for tag in ["", "   "] {
            let p = product(Some(tag));
            assert!(is_member(&p, &vapes));
            assert!(!is_member(&p, &thc));
            let input = FormInput {
                product: &p,
                category: None,
                brand: None,
            };
            assert_eq!(route_form(&input), ProductForm::Standard);
        }
    }

    #[test]
    fn test_exact_id_or_slug_wins_first() {
        let target = category("cat-42", "THC Disposables");
        assert_eq!(
            deciding_rule(&product(Some("cat-42")), &target),
            Some(("exact_tag", true))
        );
        assert!(is_member(&product(Some("thc-disposables")), &target));
    }

    #[test]
    fn test_thc_tag_excluded_from_disposable_vapes() {
        let vapes = category("c1", "Disposable Vapes");
        assert!(!is_member(&product(Some("thc-disposable-vape")), &vapes));
        assert!(is_member(&product(Some("Disposable_Vape")), &vapes));
        assert!(!is_member(&product(Some("edibles")), &vapes));
    }

    #[test]
    fn test_keyword_rules() {
        assert!(is_member(&product(Some("THC Carts")), &category("c", "THC Disposables")));
        assert!(is_member(&product(Some("edible-gummies")), &category("c", "Edibles")));
        assert!(is_member(&product(Some("cigarettes")), &category("c", "Cigarettes")));
        assert!(!is_member(&product(None), &category("c", "Cigarettes")));
        assert!(!is_member(&product(Some("x")), &category("c", "Accessories")));
        assert_eq!(deciding_rule(&product(Some("x")), &category("c", "Accessories")), None);
    }

    #[test]
    fn test_rule_tables_are_ordered() {
        let names: Vec<_> = MEMBERSHIP_RULES.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["exact_tag", "disposable_vape", "thc", "edible", "cigarette"]);
        assert_eq!(FORM_RULES[0].0, "explicit_disposable_tag");
    }

    #[test]
    fn test_thc_tag_with_disposable_brand_routes_to_standard() {
        let p = product(Some("thc-disposables"));
        let brand = Brand {
            id: "geekbar-pulse".into(),
            name: "Geek Bar Pulse".into(),
            ..Default::default()
        };
        let input = FormInput {
            product: &p,
            category: None,
            brand: Some(&brand),
        };
        assert_eq!(route_form(&input), ProductForm::Standard);

        let no_brand = FormInput { brand: None, ..input };
        assert_eq!(route_form(&no_brand), ProductForm::Thc);
    }

    #[test]
    fn test_thc_disposable_tag_routes_to_thc_form() {
        let thc = category("c2", "THC Disposables");
        for tag in ["thc-disposable-vape", "thc_disposable_vapes", "THC Disposable Vape"] {
            let p = product(Some(tag));
            let input = FormInput {
                product: &p,
                category: None,
                brand: None,
            };
            assert_eq!(route_form(&input), ProductForm::Thc, "tag {tag}");
            assert!(is_member(&p, &thc));
        }

        let p = product(Some("edible-disposable-vape"));
        let input = FormInput {
            product: &p,
            category: None,
            brand: None,
        };
        assert_eq!(route_form(&input), ProductForm::Edible);
    }

    #[test]
    fn test_disposable_tag_overrides_edible_brand_hint() {
        let p = product(Some("disposable-vapes"));
        let brand = Brand {
            id: "b".into(),
            name: "Kiva".into(),
            category: Some("edibles".into()),
            ..Default::default()
        };
        let input = FormInput {
            product: &p,
            category: None,
            brand: Some(&brand),
        };
        assert_eq!(route_form(&input), ProductForm::Standard);
    }

    #[test]
    fn test_falls_through_to_category_slug_then_brand() {
        let p = product(Some("snowflake-123"));
        let edibles = category("snowflake-123", "Edibles");
        let input = FormInput {
            product: &p,
            category: Some(&edibles),
            brand: None,
        };
        assert_eq!(route_form(&input), ProductForm::Edible);

        let brand = Brand {
            id: "b".into(),
            name: "Wyld".into(),
            category: Some("thc".into()),
            ..Default::default()
        };
        let untagged = product(None);
        let input = FormInput {
            product: &untagged,
            category: None,
            brand: Some(&brand),
        };
        assert_eq!(route_form(&input), ProductForm::Thc);

        let bare = FormInput {
            product: &untagged,
            category: None,
            brand: None,
        };
        assert_eq!(route_form(&bare), ProductForm::Standard);
    }
}
