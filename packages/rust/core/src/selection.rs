//! Row selection, kept independently of the current filter/sort state.

use std::collections::BTreeSet;

use tracing::debug;

use shopdash_shared::{Product, ProductId};

/// Set of selected product identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<ProductId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> impl Iterator<Item = ProductId> + '_ {
        self.ids.iter().copied()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Flip one id. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, id: ProductId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// "Select all" checkbox over the visible rows.
    ///
    /// When every visible row is already selected the selection becomes empty;
    /// otherwise it becomes exactly the visible ids. Returns whether anything
    /// is selected afterwards.
    pub fn toggle_all(&mut self, visible: &[Product]) -> bool {
        if self.all_selected(visible) {
            self.ids.clear();
        } else {
            self.ids = visible.iter().map(|p| p.id).collect();
        }
        debug!(selected = self.ids.len(), visible = visible.len(), "toggled select-all");
        !self.ids.is_empty()
    }

    /// True when `visible` is non-empty and each of its ids is selected.
    pub fn all_selected(&self, visible: &[Product]) -> bool {
        !visible.is_empty() && visible.iter().all(|p| self.ids.contains(&p.id))
    }

    /// Drop ids that no longer exist in `products`.
    pub fn retain_existing(&mut self, products: &[Product]) {
        let existing: BTreeSet<ProductId> = products.iter().map(|p| p.id).collect();
        self.ids.retain(|id| existing.contains(id));
    }

    /// Selected rows of `products`, in the order they appear there.
    pub fn selected_from(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|p| self.ids.contains(&p.id))
            .cloned()
            .collect()
    }
}

impl FromIterator<ProductId> for Selection {
    fn from_iter<I: IntoIterator<Item = ProductId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shopdash_shared::Category;

    fn product(id: i64) -> Product {
        Product {
            id: ProductId(id),
            name: format!("Product {id}"),
            category: Category::Books,
            price: Decimal::ONE,
            stock: 1,
            sales: 0,
            image: String::new(),
        }
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = Selection::new();
        assert!(selection.toggle(ProductId(3)));
        assert!(selection.contains(ProductId(3)));
        assert!(!selection.toggle(ProductId(3)));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_switches_between_empty_and_visible() {
        let visible = vec![product(1), product(2), product(3)];
        let mut selection = Selection::new();

        assert!(selection.toggle_all(&visible));
        assert_eq!(selection.ids().collect::<Vec<_>>(), [ProductId(1), ProductId(2), ProductId(3)]);

        assert!(!selection.toggle_all(&visible));
        assert!(selection.is_empty());
    }

    #[test]
    fn toggle_all_with_partial_selection_selects_visible_only() {
        let visible = vec![product(1), product(2)];
        let mut selection: Selection = [ProductId(1), ProductId(99)].into_iter().collect();

        selection.toggle_all(&visible);
        assert_eq!(selection.ids().collect::<Vec<_>>(), [ProductId(1), ProductId(2)]);
    }

    #[test]
    fn toggle_all_on_empty_view_selects_nothing() {
        let mut selection = Selection::new();
        assert!(!selection.toggle_all(&[]));
        assert!(selection.is_empty());
    }

    #[test]
    fn selection_survives_filter_changes_and_follows_view_order() {
        let mut selection = Selection::new();
        selection.toggle(ProductId(2));
        selection.toggle(ProductId(5));

        let view = vec![product(5), product(1), product(2)];
        let picked: Vec<i64> = selection.selected_from(&view).iter().map(|p| p.id.0).collect();
        assert_eq!(picked, [5, 2]);

        // Id 5 is filtered out of this view but stays selected.
        let narrower = vec![product(2)];
        assert_eq!(selection.selected_from(&narrower).len(), 1);
        assert!(selection.contains(ProductId(5)));
    }

    #[test]
    fn retain_existing_drops_deleted_ids() {
        let mut selection: Selection = [ProductId(1), ProductId(2)].into_iter().collect();
        selection.retain_existing(&[product(2), product(3)]);
        assert_eq!(selection.ids().collect::<Vec<_>>(), [ProductId(2)]);
    }
}
