//! Bundled sample products, served in mock mode and whenever the API fails.

use shopdash_shared::{Product, Result, ShopdashError};

const SAMPLE_PRODUCTS_JSON: &str =
    include_str!("../../../../fixtures/json/products.fixture.json");

/// Parse the bundled sample product set.
pub fn sample_products() -> Result<Vec<Product>> {
    serde_json::from_str(SAMPLE_PRODUCTS_JSON)
        .map_err(|e| ShopdashError::parse(format!("bundled sample products are invalid: {e}")))
}
