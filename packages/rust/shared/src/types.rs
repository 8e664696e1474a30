//! Core domain types for the product catalog.

use std::collections::HashSet;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::ShopdashError;

/// Highest stock count still considered "low stock".
pub const LOW_STOCK_THRESHOLD: u32 = 10;

// ---------------------------------------------------------------------------
// ProductId
// ---------------------------------------------------------------------------

/// Integer product identifier, unique within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = ShopdashError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|e| ShopdashError::parse(format!("invalid product id '{s}': {e}")))
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The fixed set of product categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Electronics,
    Fashion,
    HomeAndLiving,
    Sports,
    Books,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 5] = [
        Category::Electronics,
        Category::Fashion,
        Category::HomeAndLiving,
        Category::Sports,
        Category::Books,
    ];

    /// Human-readable name, as stored in product records.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Fashion => "Fashion",
            Category::HomeAndLiving => "Home & Living",
            Category::Sports => "Sports",
            Category::Books => "Books",
        }
    }

    /// Lowercase slug used on the command line (`home-living`).
    pub fn slug(self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Fashion => "fashion",
            Category::HomeAndLiving => "home-living",
            Category::Sports => "sports",
            Category::Books => "books",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ShopdashError;

    /// Accepts the display name or the slug, ignoring case, spaces, `&`,
    /// `-` and `_` (so `Home & Living`, `home-living` and `home_living` all match).
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();

        let key = key.replace("and", "");
        Category::ALL
            .into_iter()
            .find(|c| {
                let name: String = c
                    .as_str()
                    .chars()
                    .filter(|ch| ch.is_alphanumeric())
                    .flat_map(char::to_lowercase)
                    .collect();
                name == key
            })
            .ok_or_else(|| ShopdashError::parse(format!("unknown category '{s}'")))
    }
}

impl TryFrom<String> for Category {
    type Error = ShopdashError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

// ---------------------------------------------------------------------------
// StockLevel
// ---------------------------------------------------------------------------

/// Stock bucket a product falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockLevel {
    /// More than [`LOW_STOCK_THRESHOLD`] units.
    InStock,
    /// Between 1 and [`LOW_STOCK_THRESHOLD`] units inclusive.
    LowStock,
    /// Zero units.
    OutOfStock,
}

impl StockLevel {
    pub fn of(stock: u32) -> Self {
        match stock {
            0 => StockLevel::OutOfStock,
            1..=LOW_STOCK_THRESHOLD => StockLevel::LowStock,
            _ => StockLevel::InStock,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StockLevel::InStock => "In Stock",
            StockLevel::LowStock => "Low Stock",
            StockLevel::OutOfStock => "Out of Stock",
        }
    }
}

impl std::fmt::Display for StockLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Product
// ---------------------------------------------------------------------------

/// A single catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    /// Unit price, never negative.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: u32,
    #[serde(default)]
    pub sales: u64,
    /// Image URI or a `data:` URI carrying the image inline.
    #[serde(default)]
    pub image: String,
}

impl Product {
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::of(self.stock)
    }

    /// Price formatted as a currency string (`$1299.99`).
    pub fn display_price(&self) -> String {
        format_currency(self.price)
    }
}

/// Format an amount as dollars with exactly two decimals, rounding half away from zero.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}

/// Reject a product set in which two records share an identifier.
pub fn ensure_unique_ids(products: &[Product]) -> Result<(), ShopdashError> {
    let mut seen = HashSet::with_capacity(products.len());
    match products.iter().find(|p| !seen.insert(p.id)) {
        Some(dup) => Err(ShopdashError::validation(format!(
            "duplicate product id {}",
            dup.id
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: ProductId(1),
            name: "Gaming Laptop".into(),
            category: Category::Electronics,
            price: Decimal::new(129999, 2),
            stock: 25,
            sales: 156,
            image: "https://example.com/laptop.jpg".into(),
        }
    }

    #[test]
    fn category_parses_names_and_slugs() {
        assert_eq!("Electronics".parse::<Category>().unwrap(), Category::Electronics);
        assert_eq!("electronics".parse::<Category>().unwrap(), Category::Electronics);
        assert_eq!("Home & Living".parse::<Category>().unwrap(), Category::HomeAndLiving);
        assert_eq!("home-living".parse::<Category>().unwrap(), Category::HomeAndLiving);
        assert_eq!("HOME_LIVING".parse::<Category>().unwrap(), Category::HomeAndLiving);
        assert!("clothing".parse::<Category>().is_err());
    }

    #[test]
    fn category_slug_roundtrips() {
        for category in Category::ALL {
            assert_eq!(category.slug().parse::<Category>().unwrap(), category);
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn stock_level_boundaries() {
        assert_eq!(StockLevel::of(0), StockLevel::OutOfStock);
        assert_eq!(StockLevel::of(1), StockLevel::LowStock);
        assert_eq!(StockLevel::of(5), StockLevel::LowStock);
        assert_eq!(StockLevel::of(10), StockLevel::LowStock);
        assert_eq!(StockLevel::of(11), StockLevel::InStock);
    }

    #[test]
    fn currency_formatting() {
        let cases = [
            (Decimal::new(0, 0), "$0.00"),
            (Decimal::new(100, 0), "$100.00"),
            (Decimal::new(999, 2), "$9.99"),
            (Decimal::new(12345, 2), "$123.45"),
            (Decimal::new(1, 2), "$0.01"),
            (Decimal::new(12345, 3), "$12.35"),
        ];
        for (amount, expected) in cases {
            assert_eq!(format_currency(amount), expected, "formatting {amount}");
        }
    }

    #[test]
    fn product_json_shape() {
        let json = serde_json::to_value(sample()).expect("serialize");
        assert_eq!(json["id"], 1);
        assert_eq!(json["category"], "Electronics");
        assert_eq!(json["price"], 1299.99);

        let parsed: Product = serde_json::from_value(json).expect("deserialize");
        assert_eq!(parsed, sample());
    }

    #[test]
    fn product_optional_fields_default() {
        let parsed: Product = serde_json::from_str(
            r#"{"id": 7, "name": "Sofa", "category": "Home & Living", "price": 899.5, "stock": 3}"#,
        )
        .expect("deserialize");
        assert_eq!(parsed.sales, 0);
        assert!(parsed.image.is_empty());
        assert_eq!(parsed.stock_level(), StockLevel::LowStock);
        assert_eq!(parsed.display_price(), "$899.50");
    }

    #[test]
    fn products_fixture_validates() {
        let fixture = std::fs::read_to_string("../../../fixtures/json/products.fixture.json")
            .expect("read fixture");
        let parsed: Vec<Product> =
            serde_json::from_str(&fixture).expect("deserialize fixture products");
        assert_eq!(parsed.len(), 26);
        assert_eq!(parsed[0].name, "Gaming Laptop");
        assert_eq!(parsed[0].display_price(), "$1299.99");
    }

    #[test]
    fn duplicate_ids_detected() {
        let mut other = sample();
        other.name = "Copy".into();
        assert!(ensure_unique_ids(&[sample()]).is_ok());
        let err = ensure_unique_ids(&[sample(), other]).unwrap_err();
        assert!(err.to_string().contains("duplicate product id 1"));
    }
}
