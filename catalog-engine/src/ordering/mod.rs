//! Display ordering
//!
//! Brands and products follow a persisted order list per store context;
//! categories carry their own `order` field. A drag gesture is reduced to a
//! single-element move within the displayed sequence.

pub mod optimistic;

pub use optimistic::OptimisticOrder;

use std::collections::HashMap;

use shared::models::{Brand, CanonicalBrand, Category, Product};
use shared::mutation::SortOrderItem;
use shared::{AppError, AppResult};

/// An entity placed by an order list
pub trait Ordered {
    fn order_id(&self) -> &str;

    /// Name used for the alphabetical tail
    fn order_name(&self) -> &str;

    /// Other identities an order list may use for this entity
    fn aliases(&self) -> &[String] {
        &[]
    }
}

impl Ordered for CanonicalBrand {
    fn order_id(&self) -> &str {
        self.id()
    }

    fn order_name(&self) -> &str {
        self.name()
    }

    fn aliases(&self) -> &[String] {
        &self.duplicate_ids
    }
}

impl Ordered for Brand {
    fn order_id(&self) -> &str {
        &self.id
    }

    fn order_name(&self) -> &str {
        &self.name
    }
}

impl Ordered for Product {
    fn order_id(&self) -> &str {
        &self.id
    }

    fn order_name(&self) -> &str {
        &self.name
    }
}

/// Sort `items` for display
///
/// Listed entities come first by list position; the rest follow sorted by
/// name, case-insensitive. Identities in `order` that match nothing are
/// ignored.
pub fn resolve_order<T: Ordered + Clone>(items: &[T], order: &[String]) -> Vec<T> {
    let mut position: HashMap<&str, usize> = HashMap::with_capacity(order.len());
    for (idx, id) in order.iter().enumerate() {
        position.entry(id.as_str()).or_insert(idx);
    }

    let mut listed: Vec<(usize, &T)> = Vec::new();
    let mut unlisted: Vec<&T> = Vec::new();
    for item in items {
        let pos = std::iter::once(item.order_id())
            .chain(item.aliases().iter().map(String::as_str))
            .filter_map(|id| position.get(id).copied())
            .min();
        match pos {
            Some(pos) => listed.push((pos, item)),
            None => unlisted.push(item),
        }
    }

    listed.sort_by_key(|(pos, _)| *pos);
    unlisted.sort_by_cached_key(|item| item.order_name().to_lowercase());

    listed
        .into_iter()
        .map(|(_, item)| item)
        .chain(unlisted)
        .cloned()
        .collect()
}

/// Identities of a displayed sequence
pub fn display_ids<T: Ordered>(items: &[T]) -> Vec<String> {
    items.iter().map(|i| i.order_id().to_string()).collect()
}

/// Move the element at `from` to `to`
pub fn move_item<T: Clone>(seq: &[T], from: usize, to: usize) -> AppResult<Vec<T>> {
    let len = seq.len();
    if from >= len {
        return Err(AppError::index_out_of_range(from, len));
    }
    if to >= len {
        return Err(AppError::index_out_of_range(to, len));
    }
    let mut moved = seq.to_vec();
    let item = moved.remove(from);
    moved.insert(to, item);
    Ok(moved)
}

/// 0-based `order` for every category in display order
pub fn category_orders(categories: &[Category]) -> Vec<SortOrderItem> {
    categories
        .iter()
        .enumerate()
        .map(|(i, c)| SortOrderItem {
            id: c.id.clone(),
            order: i as i32,
        })
        .collect()
}

/// Order values after dragging a category from `from` to `to`
pub fn reorder_categories(
    displayed: &[Category],
    from: usize,
    to: usize,
) -> AppResult<Vec<SortOrderItem>> {
    Ok(category_orders(&move_item(displayed, from, to)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;
    use shared::models::StoreContext;

    fn brand(id: &str, name: &str) -> Brand {
        Brand {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    fn ids<T: Ordered>(items: &[T]) -> Vec<String> {
        display_ids(items)
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_order_is_alphabetical() {
        let items = vec![brand("1", "wyld"), brand("2", "Kiva"), brand("3", "elf bar")];
        assert_eq!(ids(&resolve_order(&items, &[])), strings(&["3", "2", "1"]));
    }

    #[test]
    fn test_listed_first_then_alphabetical_tail() {
        let items = vec![
            brand("a", "Alpha"),
            brand("b", "Bravo"),
            brand("c", "Charlie"),
            brand("d", "Delta"),
        ];
        let order = strings(&["c", "gone", "a"]);
        assert_eq!(
            ids(&resolve_order(&items, &order)),
            strings(&["c", "a", "b", "d"])
        );
    }

    #[test]
    fn test_duplicate_identity_places_canonical() {
        let mut pulse = CanonicalBrand::new(brand("geekbar-pulse", "Geek Bar Pulse"));
        pulse.duplicate_ids.push("abc123".into());
        let items = vec![CanonicalBrand::new(brand("kiva", "Kiva")), pulse];

        let order = strings(&["abc123", "kiva"]);
        assert_eq!(
            ids(&resolve_order(&items, &order)),
            strings(&["geekbar-pulse", "kiva"])
        );
    }

    #[test]
    fn test_move_item() {
        let seq = strings(&["a", "b", "c", "d"]);
        assert_eq!(move_item(&seq, 0, 2).unwrap(), strings(&["b", "c", "a", "d"]));
        assert_eq!(move_item(&seq, 3, 0).unwrap(), strings(&["d", "a", "b", "c"]));
        assert_eq!(move_item(&seq, 1, 1).unwrap(), seq);

        let err = move_item(&seq, 4, 0).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderIndexOutOfRange);
        assert!(move_item::<String>(&[], 0, 0).is_err());
    }

    #[test]
    fn test_move_then_resolve_matches_direct_move() {
        let items = vec![brand("a", "A"), brand("b", "B"), brand("c", "C")];
        let displayed = resolve_order(&items, &[]);
        let persisted = move_item(&display_ids(&displayed), 2, 0).unwrap();

        let read_back = resolve_order(&items, &persisted);
        assert_eq!(ids(&read_back), move_item(&display_ids(&displayed), 2, 0).unwrap());
        // Resolving against the persisted list again changes nothing
        assert_eq!(ids(&resolve_order(&read_back, &persisted)), persisted);
    }

    #[test]
    fn test_reorder_categories_assigns_zero_based_orders() {
        let categories: Vec<Category> = ["Vapes", "THC", "Edibles"]
            .iter()
            .enumerate()
            .map(|(i, name)| Category {
                id: format!("c{i}"),
                store: StoreContext::Secondary,
                name: name.to_string(),
                slug: name.to_lowercase(),
                order: (i as i32) * 10,
            })
            .collect();

        let orders = reorder_categories(&categories, 2, 0).unwrap();
        let pairs: Vec<_> = orders.iter().map(|o| (o.id.as_str(), o.order)).collect();
        assert_eq!(pairs, vec![("c2", 0), ("c0", 1), ("c1", 2)]);
    }
}
