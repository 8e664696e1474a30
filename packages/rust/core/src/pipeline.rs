//! Product list pipeline: filter then sort over an in-memory product slice.
//!
//! The pipeline is pure: given the same products, [`FilterSpec`] and search
//! text it always returns the same ordered list. Pagination and selection
//! operate on its output (see [`crate::pagination`] and [`crate::selection`]).

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use shopdash_shared::{Category, Product, ShopdashError, StockLevel};

// ---------------------------------------------------------------------------
// Selectors
// ---------------------------------------------------------------------------

/// Category selector: everything, or one specific category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ShopdashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => f.write_str(category.slug()),
        }
    }
}

/// Stock-level selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockFilter {
    #[default]
    All,
    /// More than ten units.
    InStock,
    /// One to ten units.
    Low,
    /// Zero units.
    Out,
}

impl StockFilter {
    pub fn matches(self, stock: u32) -> bool {
        let level = StockLevel::of(stock);
        match self {
            StockFilter::All => true,
            StockFilter::InStock => level == StockLevel::InStock,
            StockFilter::Low => level == StockLevel::LowStock,
            StockFilter::Out => level == StockLevel::OutOfStock,
        }
    }
}

impl FromStr for StockFilter {
    type Err = ShopdashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "all" => Ok(StockFilter::All),
            "in" | "in_stock" => Ok(StockFilter::InStock),
            "low" | "low_stock" => Ok(StockFilter::Low),
            "out" | "out_of_stock" => Ok(StockFilter::Out),
            _ => Err(ShopdashError::parse(format!(
                "unknown stock filter '{s}': expected all, in, low or out"
            ))),
        }
    }
}

impl std::fmt::Display for StockFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            StockFilter::All => "all",
            StockFilter::InStock => "in",
            StockFilter::Low => "low",
            StockFilter::Out => "out",
        })
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortKey {
    /// Name ascending, case-insensitive.
    #[default]
    Name,
    PriceAsc,
    PriceDesc,
    /// Stock descending.
    Stock,
}

impl SortKey {
    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Name => compare_names(&a.name, &b.name),
            SortKey::PriceAsc => a.price.cmp(&b.price),
            SortKey::PriceDesc => b.price.cmp(&a.price),
            SortKey::Stock => b.stock.cmp(&a.stock),
        }
    }
}

impl FromStr for SortKey {
    type Err = ShopdashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "name" => Ok(SortKey::Name),
            "price-asc" | "price" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            "stock" | "stock-desc" => Ok(SortKey::Stock),
            _ => Err(ShopdashError::parse(format!(
                "unknown sort key '{s}': expected name, price-asc, price-desc or stock"
            ))),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SortKey::Name => "name",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::Stock => "stock",
        })
    }
}

/// Case-insensitive name order; exact string order breaks ties between
/// names that differ only in case.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

// ---------------------------------------------------------------------------
// FilterSpec
// ---------------------------------------------------------------------------

/// Category, stock and sort selection for a product listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSpec {
    pub category: CategoryFilter,
    pub stock: StockFilter,
    pub sort: SortKey,
}

impl FilterSpec {
    /// Whether `product` passes the category and stock selectors and the search text.
    pub fn accepts(&self, product: &Product, search: &SearchText) -> bool {
        self.category.matches(product.category)
            && self.stock.matches(product.stock)
            && search.matches(&product.name)
    }
}

/// Lowercased, trimmed search needle. Empty matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchText(String);

impl SearchText {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, name: &str) -> bool {
        self.0.is_empty() || name.to_lowercase().contains(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Filter `products` by `spec` and `search`, then stably sort by `spec.sort`.
#[instrument(skip_all, fields(input = products.len(), category = %spec.category, stock = %spec.stock, sort = %spec.sort))]
pub fn apply(products: &[Product], spec: &FilterSpec, search: &str) -> Vec<Product> {
    let search = SearchText::new(search);

    let mut matched: Vec<Product> = products
        .iter()
        .filter(|p| spec.accepts(p, &search))
        .cloned()
        .collect();

    // `sort_by` is a stable merge sort: equal keys keep their input order.
    matched.sort_by(|a, b| spec.sort.compare(a, b));

    debug!(output = matched.len(), search = search.as_str(), "pipeline applied");
    matched
}
