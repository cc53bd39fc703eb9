//! Name normalization and category deduplication

use std::collections::HashSet;

use shared::models::Category;

/// Normalized category name: lower-case, trimmed, one trailing "s" removed
///
/// "Disposable Vapes", "disposable vape " and "DISPOSABLE VAPE" share a key.
pub fn normalize_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    match lowered.strip_suffix('s') {
        Some(stem) => stem.trim_end().to_string(),
        None => lowered,
    }
}

/// Normalized brand name: lower-case and trimmed, plurals kept
pub fn normalize_brand_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Keep one category per normalized name
///
/// Output is ordered by `order` ascending, ties broken by name (case-insensitive);
/// the first record per key in that order is the representative.
pub fn dedupe_categories(categories: &[Category]) -> Vec<Category> {
    let mut sorted: Vec<&Category> = categories.iter().collect();
    sorted.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            .then_with(|| a.name.cmp(&b.name))
    });

    let mut seen = HashSet::new();
    sorted
        .into_iter()
        .filter(|c| seen.insert(normalize_name(&c.name)))
        .cloned()
        .collect()
}
