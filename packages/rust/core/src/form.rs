//! Add/edit form input and its conversion into a [`Product`].
//!
//! Name and category are required. Numeric fields are raw text: anything that
//! does not parse as a non-negative number is coerced to zero instead of
//! being rejected.

use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::warn;

use shopdash_shared::{Category, Product, ProductId, Result, ShopdashError};

/// Raw values collected from the add/edit product form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub price: String,
    pub stock: String,
    pub sales: String,
    pub image: String,
}

impl ProductDraft {
    /// Prefill a draft from an existing product (edit form).
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            category: product.category.as_str().to_string(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            sales: product.sales.to_string(),
            image: product.image.clone(),
        }
    }

    /// Validate required fields and coerce numeric ones into a product with `id`.
    pub fn into_product(self, id: ProductId) -> Result<Product> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ShopdashError::validation("product name is required"));
        }

        if self.category.trim().is_empty() {
            return Err(ShopdashError::validation("product category is required"));
        }
        let category = Category::from_str(&self.category)
            .map_err(|e| ShopdashError::validation(e.to_string()))?;

        Ok(Product {
            id,
            name: name.to_string(),
            category,
            price: coerce_price(&self.price),
            stock: u32::try_from(coerce_count(&self.stock, "stock")).unwrap_or(0),
            sales: coerce_count(&self.sales, "sales"),
            image: self.image.trim().to_string(),
        })
    }
}

/// Parse a price, coercing unparseable or negative input to zero.
pub fn coerce_price(raw: &str) -> Decimal {
    let raw = raw.trim();
    if raw.is_empty() {
        return Decimal::ZERO;
    }
    match Decimal::from_str(raw) {
        Ok(price) if price.is_sign_negative() => {
            warn!(field = "price", value = raw, "negative value coerced to zero");
            Decimal::ZERO
        }
        Ok(price) => price,
        Err(_) => {
            warn!(field = "price", value = raw, "non-numeric value coerced to zero");
            Decimal::ZERO
        }
    }
}

/// Parse a whole count. Fractions are truncated; unparseable, negative or
/// oversized input becomes zero.
fn coerce_count(raw: &str, field: &'static str) -> u64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    match Decimal::from_str(raw).ok().and_then(|d| d.trunc().to_u64()) {
        Some(count) => count,
        None => {
            warn!(field, value = raw, "invalid count coerced to zero");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, category: &str, price: &str, stock: &str) -> ProductDraft {
        ProductDraft {
            name: name.into(),
            category: category.into(),
            price: price.into(),
            stock: stock.into(),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn valid_draft_builds_product() {
        let product = draft("  Desk Lamp ", "home-living", "39.90", "12")
            .into_product(ProductId(7))
            .expect("valid draft");
        assert_eq!(product.id, ProductId(7));
        assert_eq!(product.name, "Desk Lamp");
        assert_eq!(product.category, Category::HomeAndLiving);
        assert_eq!(product.price, Decimal::new(3990, 2));
        assert_eq!(product.stock, 12);
        assert_eq!(product.sales, 0);
    }

    #[test]
    fn malformed_numbers_coerce_to_zero() {
        let product = draft("Lamp", "Books", "cheap", "lots")
            .into_product(ProductId(1))
            .expect("coerced, not rejected");
        assert_eq!(product.price, Decimal::ZERO);
        assert_eq!(product.stock, 0);
    }

    #[test]
    fn negative_and_fractional_values() {
        assert_eq!(coerce_price("-5"), Decimal::ZERO);
        assert_eq!(coerce_count("-3", "stock"), 0);
        assert_eq!(coerce_count("7.9", "stock"), 7);
        assert_eq!(coerce_price(" 12.5 "), Decimal::new(125, 1));
    }

    #[test]
    fn stock_beyond_u32_is_zero() {
        let product = draft("Bulk", "Books", "1", "99999999999")
            .into_product(ProductId(1))
            .expect("coerced");
        assert_eq!(product.stock, 0);
    }

    #[test]
    fn required_fields_enforced() {
        let err = draft("   ", "Books", "1", "1")
            .into_product(ProductId(1))
            .unwrap_err();
        assert!(err.to_string().contains("name is required"));

        let err = draft("Lamp", "", "1", "1")
            .into_product(ProductId(1))
            .unwrap_err();
        assert!(err.to_string().contains("category is required"));

        let err = draft("Lamp", "Groceries", "1", "1")
            .into_product(ProductId(1))
            .unwrap_err();
        assert!(matches!(err, ShopdashError::Validation { .. }));
    }

    #[test]
    fn edit_prefill_roundtrips() {
        let original = draft("Yoga Mat", "Sports", "39.99", "50")
            .into_product(ProductId(11))
            .expect("valid");
        let again = ProductDraft::from_product(&original)
            .into_product(ProductId(11))
            .expect("valid");
        assert_eq!(again, original);
    }
}
