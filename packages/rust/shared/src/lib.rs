//! Shared types, error model, and configuration for shopdash.
//!
//! This crate is the foundation depended on by all other shopdash crates.
//! It provides:
//! - [`ShopdashError`]: the unified error type
//! - Domain types ([`Product`], [`ProductId`], [`Category`], [`StockLevel`])
//! - Configuration ([`AppConfig`], [`DataConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DEFAULT_PAGE_SIZE, DataConfig, DefaultsConfig, ExportConfig, config_dir,
    config_file_path, init_config, init_config_in, load_config, load_config_from, parse_toggle,
};
pub use error::{Result, ShopdashError};
pub use types::{
    Category, LOW_STOCK_THRESHOLD, Product, ProductId, StockLevel, ensure_unique_ids,
    format_currency,
};
