//! Product catalog logic for shopdash.
//!
//! This crate holds the in-memory [`catalog::Catalog`], the filter/sort
//! [`pipeline`], pagination, row selection, the memoized listing
//! [`view::ProductListView`] and dashboard statistics.

pub mod catalog;
pub mod form;
pub mod pagination;
pub mod pipeline;
pub mod selection;
pub mod stats;
pub mod view;

pub use catalog::{BulkAction, BulkOutcome, Catalog};
pub use form::ProductDraft;
pub use pagination::{Page, paginate};
pub use pipeline::{CategoryFilter, FilterSpec, SortKey, StockFilter};
pub use selection::Selection;
pub use stats::{CatalogStats, CategoryShare, top_sellers};
pub use view::ProductListView;
