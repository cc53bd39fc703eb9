//! Brand reconciliation
//!
//! Merges the compiled-in seed brands with the dynamic brand records of one
//! store context. Records whose names normalize to the same key collapse into
//! one [`CanonicalBrand`]; absorbed identities are kept in `duplicate_ids` so
//! products pointing at any of them still resolve.

use std::collections::HashMap;

use shared::models::{Brand, CanonicalBrand};

use super::normalize::normalize_brand_name;

/// A brand record that can feed reconciliation
///
/// Canonical records carry the identities they already absorbed, which lets a
/// reconciled list be merged again without losing them.
pub trait BrandSource {
    fn brand(&self) -> &Brand;

    fn absorbed_ids(&self) -> &[String] {
        &[]
    }
}

impl BrandSource for Brand {
    fn brand(&self) -> &Brand {
        self
    }
}

impl BrandSource for CanonicalBrand {
    fn brand(&self) -> &Brand {
        &self.brand
    }

    fn absorbed_ids(&self) -> &[String] {
        &self.duplicate_ids
    }
}

/// Reconciled brand view of one store context
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandCatalog {
    /// Seeds first, then new dynamic brands in encounter order
    pub canonical: Vec<CanonicalBrand>,
    /// Dynamic brands without a name, addressable by identity only
    pub unkeyed: Vec<Brand>,
}

impl BrandCatalog {
    /// Canonical record answering to `id` (own or absorbed identity)
    pub fn canonical_for(&self, id: &str) -> Option<&CanonicalBrand> {
        self.canonical.iter().find(|c| c.answers_to(id))
    }

    /// Brand answering to `id`, including unnamed raw records
    pub fn find(&self, id: &str) -> Option<&Brand> {
        self.canonical_for(id)
            .map(|c| &c.brand)
            .or_else(|| self.unkeyed.iter().find(|b| b.id == id))
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

fn non_empty(value: &Option<String>) -> Option<&String> {
    value.as_ref().filter(|v| !v.trim().is_empty())
}

fn override_field(target: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = non_empty(value) {
        *target = Some(v.clone());
    }
}

fn absorb(canonical: &mut CanonicalBrand, id: &str) {
    if canonical.brand.id != id && !canonical.duplicate_ids.iter().any(|d| d == id) {
        canonical.duplicate_ids.push(id.to_string());
    }
}

/// Fold `source` into an existing canonical record
fn merge_into<S: BrandSource>(canonical: &mut CanonicalBrand, source: &S) {
    let incoming = source.brand();
    override_field(&mut canonical.brand.image, &incoming.image);
    override_field(&mut canonical.brand.tagline, &incoming.tagline);
    override_field(&mut canonical.brand.description, &incoming.description);
    override_field(&mut canonical.brand.capacity, &incoming.capacity);

    absorb(canonical, &incoming.id);
    for id in source.absorbed_ids() {
        absorb(canonical, id);
    }
}

/// Merge seed brands with the dynamic brand list of a store context
///
/// Never fails. Dynamic brands without a name are left out of the merge and
/// logged at `warn`; they remain reachable through [`BrandCatalog::find`].
/// Reconciling a reconciled list against the same seeds returns it unchanged.
pub fn reconcile_brands<S: BrandSource>(seed: &[Brand], dynamic: &[S]) -> BrandCatalog {
    let mut catalog = BrandCatalog::default();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for brand in seed {
        let key = normalize_brand_name(&brand.name);
        match by_name.get(&key) {
            Some(&idx) => merge_into(&mut catalog.canonical[idx], brand),
            None => {
                by_name.insert(key, catalog.canonical.len());
                catalog.canonical.push(CanonicalBrand::new(brand.clone()));
            }
        }
    }

    for source in dynamic {
        let brand = source.brand();
        let key = normalize_brand_name(&brand.name);
        if key.is_empty() {
            tracing::warn!(brand_id = %brand.id, "Brand without name excluded from reconciliation");
            catalog.unkeyed.push(brand.clone());
            continue;
        }

        match by_name.get(&key) {
            Some(&idx) => merge_into(&mut catalog.canonical[idx], source),
            None => {
                let mut canonical = CanonicalBrand::new(brand.clone());
                for id in source.absorbed_ids() {
                    absorb(&mut canonical, id);
                }
                by_name.insert(key, catalog.canonical.len());
                catalog.canonical.push(canonical);
            }
        }
    }

    catalog
}
