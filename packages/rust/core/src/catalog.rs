//! In-memory product collection.
//!
//! The collection is immutable per revision: every mutation builds a new
//! product list and swaps it in whole, bumping [`Catalog::revision`]. Derived
//! views compare revisions to know when they are stale.

use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use shopdash_shared::{Product, ProductId, Result, ShopdashError, ensure_unique_ids};

use crate::form::ProductDraft;
use crate::selection::Selection;

/// The session's product collection.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<[Product]>,
    revision: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            products: Arc::from(Vec::new()),
            revision: 0,
        }
    }
}

impl Catalog {
    /// Build a catalog from a loaded product set. Identifiers must be unique.
    pub fn new(products: Vec<Product>) -> Result<Self> {
        ensure_unique_ids(&products)?;
        Ok(Self {
            products: Arc::from(products),
            revision: 0,
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Shared handle to the current revision's products.
    pub fn snapshot(&self) -> Arc<[Product]> {
        Arc::clone(&self.products)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    /// Add a product from a submitted form. The identifier comes from the
    /// current timestamp in milliseconds.
    #[instrument(skip_all, fields(name = %draft.name))]
    pub fn add(&mut self, draft: ProductDraft) -> Result<ProductId> {
        let id = self.next_id(Utc::now().timestamp_millis())?;
        let product = draft.into_product(id)?;

        let mut next = self.products.to_vec();
        next.push(product);
        self.commit(next);

        info!(%id, revision = self.revision, "product added");
        Ok(id)
    }

    /// Replace the product `id` with the submitted form, keeping its position.
    #[instrument(skip_all, fields(id = %id))]
    pub fn edit(&mut self, id: ProductId, draft: ProductDraft) -> Result<()> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or(ShopdashError::NotFound(id.0))?;
        let product = draft.into_product(id)?;

        let mut next = self.products.to_vec();
        next[index] = product;
        self.commit(next);

        info!(revision = self.revision, "product updated");
        Ok(())
    }

    /// Remove the product `id`. Returns `false` (and leaves the catalog
    /// untouched) when no such product exists.
    pub fn delete(&mut self, id: ProductId) -> bool {
        if !self.contains(id) {
            debug!(%id, "delete of unknown product ignored");
            return false;
        }

        let next: Vec<Product> = self.products.iter().filter(|p| p.id != id).cloned().collect();
        self.commit(next);

        info!(%id, revision = self.revision, "product deleted");
        true
    }

    /// Remove every product whose id is in `ids`. Returns how many were removed.
    pub fn delete_many(&mut self, ids: impl IntoIterator<Item = ProductId>) -> usize {
        let ids: HashSet<ProductId> = ids.into_iter().collect();
        let next: Vec<Product> = self
            .products
            .iter()
            .filter(|p| !ids.contains(&p.id))
            .cloned()
            .collect();

        let removed = self.products.len() - next.len();
        if removed > 0 {
            self.commit(next);
            info!(removed, revision = self.revision, "products deleted");
        }
        removed
    }

    /// Replace the whole collection, e.g. after a reload from the data source.
    pub fn replace(&mut self, products: Vec<Product>) -> Result<()> {
        ensure_unique_ids(&products)?;
        self.commit(products);
        Ok(())
    }

    /// Apply `action` to every selected product.
    ///
    /// `Delete` removes the selected products and clears the selection.
    /// `Export` drops ids that no longer exist and returns the selected
    /// products in catalog order.
    #[instrument(skip_all, fields(action = %action, selected = selection.len()))]
    pub fn apply_bulk(&mut self, action: BulkAction, selection: &mut Selection) -> BulkOutcome {
        match action {
            BulkAction::Delete => {
                let removed = self.delete_many(selection.ids());
                selection.clear();
                BulkOutcome::Deleted(removed)
            }
            BulkAction::Export => {
                selection.retain_existing(&self.products);
                BulkOutcome::Export(selection.selected_from(&self.products))
            }
        }
    }

    fn commit(&mut self, products: Vec<Product>) {
        self.products = Arc::from(products);
        self.revision += 1;
    }

    /// Timestamp-derived id, moved past the current maximum if it would collide.
    /// When the maximum is already `i64::MAX` the highest unused id below it
    /// is taken instead.
    fn next_id(&self, now_millis: i64) -> Result<ProductId> {
        let max = match self.products.iter().map(|p| p.id.0).max() {
            Some(max) if now_millis <= max => max,
            _ => return Ok(ProductId(now_millis)),
        };
        if let Some(next) = max.checked_add(1) {
            return Ok(ProductId(next));
        }

        let used: HashSet<i64> = self.products.iter().map(|p| p.id.0).collect();
        (i64::MIN..i64::MAX)
            .rev()
            .find(|candidate| !used.contains(candidate))
            .map(ProductId)
            .ok_or_else(|| ShopdashError::validation("product id space exhausted"))
    }
}

// ---------------------------------------------------------------------------
// Bulk actions
// ---------------------------------------------------------------------------

/// Action offered for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    Delete,
    Export,
}

impl FromStr for BulkAction {
    type Err = ShopdashError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delete" => Ok(BulkAction::Delete),
            "export" => Ok(BulkAction::Export),
            _ => Err(ShopdashError::parse(format!(
                "unknown bulk action '{s}': expected delete or export"
            ))),
        }
    }
}

impl std::fmt::Display for BulkAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            BulkAction::Delete => "delete",
            BulkAction::Export => "export",
        })
    }
}

/// What [`Catalog::apply_bulk`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkOutcome {
    /// Number of products removed.
    Deleted(usize),
    /// Selected products, ready for an exporter.
    Export(Vec<Product>),
}
