//! Memoized product listing.
//!
//! [`ProductListView`] holds the listing inputs (filter spec, search text,
//! page) and caches the pipeline output. The cache is stale whenever the spec,
//! the search text or the catalog revision differs from the cached ones, and
//! is recomputed on the next read.

use std::sync::Arc;

use tracing::trace;

use shopdash_shared::{DEFAULT_PAGE_SIZE, Product};

use crate::catalog::Catalog;
use crate::pagination::{self, Page};
use crate::pipeline::{self, FilterSpec, SearchText};

#[derive(Debug, Clone)]
struct Cached {
    source: Arc<[Product]>,
    spec: FilterSpec,
    search: SearchText,
    rows: Arc<[Product]>,
}

/// Listing state for one product table.
#[derive(Debug, Clone)]
pub struct ProductListView {
    spec: FilterSpec,
    search: String,
    page: usize,
    page_size: usize,
    cache: Option<Cached>,
    recomputations: u64,
}

impl Default for ProductListView {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ProductListView {
    pub fn new(page_size: usize) -> Self {
        Self {
            spec: FilterSpec::default(),
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
            cache: None,
            recomputations: 0,
        }
    }

    pub fn spec(&self) -> &FilterSpec {
        &self.spec
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// How many times the pipeline has actually run.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Change the filter/sort spec. Returns to page 1 when it differs.
    pub fn set_spec(&mut self, spec: FilterSpec) {
        if spec != self.spec {
            self.spec = spec;
            self.page = 1;
        }
    }

    /// Change the search text. Returns to page 1 when it differs after
    /// trimming and case folding.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if SearchText::new(&search) != SearchText::new(&self.search) {
            self.page = 1;
        }
        self.search = search;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Whether the cached rows no longer reflect the inputs.
    pub fn is_stale(&self, catalog: &Catalog) -> bool {
        match &self.cache {
            Some(cached) => {
                !Arc::ptr_eq(&cached.source, &catalog.snapshot())
                    || cached.spec != self.spec
                    || cached.search != SearchText::new(&self.search)
            }
            None => true,
        }
    }

    /// Filtered and sorted rows, recomputed only when stale.
    pub fn rows(&mut self, catalog: &Catalog) -> Arc<[Product]> {
        if self.is_stale(catalog) {
            let source = catalog.snapshot();
            let rows: Arc<[Product]> = pipeline::apply(&source, &self.spec, &self.search).into();
            self.recomputations += 1;
            trace!(
                revision = catalog.revision(),
                rows = rows.len(),
                "product view recomputed"
            );
            self.cache = Some(Cached {
                source,
                spec: self.spec,
                search: SearchText::new(&self.search),
                rows,
            });
        }

        match &self.cache {
            Some(cached) => Arc::clone(&cached.rows),
            None => Arc::from(Vec::new()),
        }
    }

    /// The current page of rows.
    pub fn current_page(&mut self, catalog: &Catalog) -> Page<Product> {
        let rows = self.rows(catalog);
        pagination::paginate(&rows, self.page, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ProductDraft;
    use crate::pipeline::{SortKey, StockFilter};
    use rust_decimal::Decimal;
    use shopdash_shared::{Category, ProductId};

    fn catalog(count: i64) -> Catalog {
        let products = (1..=count)
            .map(|i| Product {
                id: ProductId(i),
                name: format!("Item {i:02}"),
                category: Category::Books,
                price: Decimal::new(i, 0),
                stock: (i % 12) as u32,
                sales: 0,
                image: String::new(),
            })
            .collect();
        Catalog::new(products).expect("catalog")
    }

    #[test]
    fn rows_are_cached_until_an_input_changes() {
        let catalog = catalog(5);
        let mut view = ProductListView::new(10);

        view.rows(&catalog);
        view.rows(&catalog);
        assert_eq!(view.recomputations(), 1);

        view.set_search("item 0");
        view.rows(&catalog);
        assert_eq!(view.recomputations(), 2);

        // Same search after trimming/case folding keeps the cache.
        view.set_search(" ITEM 0 ");
        view.rows(&catalog);
        assert_eq!(view.recomputations(), 2);

        view.set_spec(FilterSpec {
            sort: SortKey::PriceDesc,
            ..FilterSpec::default()
        });
        assert!(view.is_stale(&catalog));
        let rows = view.rows(&catalog);
        assert_eq!(rows[0].id, ProductId(5));
        assert_eq!(view.recomputations(), 3);
    }

    #[test]
    fn catalog_mutation_marks_view_stale() {
        let mut catalog = catalog(3);
        let mut view = ProductListView::default();
        assert_eq!(view.rows(&catalog).len(), 3);

        catalog.delete(ProductId(2));
        assert!(view.is_stale(&catalog));
        assert_eq!(view.rows(&catalog).len(), 2);

        catalog
            .add(ProductDraft {
                name: "Item 99".into(),
                category: "Books".into(),
                ..ProductDraft::default()
            })
            .expect("add");
        assert_eq!(view.rows(&catalog).len(), 3);
    }

    #[test]
    fn filter_change_resets_to_first_page() {
        let catalog = catalog(25);
        let mut view = ProductListView::new(10);
        view.set_page(3);
        assert_eq!(view.current_page(&catalog).items.len(), 5);

        view.set_spec(FilterSpec {
            stock: StockFilter::Low,
            ..FilterSpec::default()
        });
        assert_eq!(view.page(), 1);
        let page = view.current_page(&catalog);
        assert!(page.items.iter().all(|p| (1..=10).contains(&p.stock)));
    }

    #[test]
    fn page_past_end_is_empty() {
        let catalog = catalog(4);
        let mut view = ProductListView::new(10);
        view.set_page(2);
        let page = view.current_page(&catalog);
        assert!(page.is_empty());
        assert_eq!(page.total_items, 4);
    }

    #[test]
    fn equivalent_search_keeps_page() {
        let catalog = catalog(25);
        let mut view = ProductListView::new(10);
        view.set_search("item");
        view.set_page(2);

        view.set_search("  ITEM ");
        assert_eq!(view.page(), 2);
        assert_eq!(view.current_page(&catalog).items.len(), 10);

        view.set_search("item 1");
        assert_eq!(view.page(), 1);
    }
}
