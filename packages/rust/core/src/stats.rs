//! Summary figures for the products dashboard: stat cards, the category
//! distribution and the best sellers.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use shopdash_shared::{Category, Product, StockLevel};

/// Product count for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: Category,
    pub count: usize,
    /// Percentage of all products, rounded to one decimal.
    pub percent: Decimal,
}

/// Aggregates over a product list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogStats {
    pub total_products: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    pub units_sold: u64,
    /// Σ price × sales.
    pub revenue: Decimal,
    /// Σ price × stock.
    pub inventory_value: Decimal,
    /// Categories with at least one product, most populated first.
    pub categories: Vec<CategoryShare>,
}

impl CatalogStats {
    pub fn compute(products: &[Product]) -> Self {
        let mut in_stock = 0;
        let mut low_stock = 0;
        let mut out_of_stock = 0;
        let mut units_sold = 0u64;
        let mut revenue = Decimal::ZERO;
        let mut inventory_value = Decimal::ZERO;
        let mut counts = [0usize; Category::ALL.len()];

        for product in products {
            match product.stock_level() {
                StockLevel::InStock => in_stock += 1,
                StockLevel::LowStock => low_stock += 1,
                StockLevel::OutOfStock => out_of_stock += 1,
            }
            units_sold = units_sold.saturating_add(product.sales);
            revenue = saturating_total(revenue, product.price, Decimal::from(product.sales));
            inventory_value =
                saturating_total(inventory_value, product.price, Decimal::from(product.stock));

            if let Some(slot) = Category::ALL.iter().position(|c| *c == product.category) {
                counts[slot] += 1;
            }
        }

        let total = products.len();
        let mut categories: Vec<CategoryShare> = Category::ALL
            .iter()
            .zip(counts)
            .filter(|(_, count)| *count > 0)
            .map(|(category, count)| CategoryShare {
                category: *category,
                count,
                percent: (Decimal::from(count) * Decimal::ONE_HUNDRED / Decimal::from(total))
                    .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            })
            .collect();
        // Stable: equal counts stay in category order.
        categories.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            total_products: total,
            in_stock,
            low_stock,
            out_of_stock,
            units_sold,
            revenue,
            inventory_value,
            categories,
        }
    }
}

/// `total + price * quantity`, pinned at `Decimal::MAX` instead of overflowing.
fn saturating_total(total: Decimal, price: Decimal, quantity: Decimal) -> Decimal {
    price
        .checked_mul(quantity)
        .and_then(|amount| total.checked_add(amount))
        .unwrap_or(Decimal::MAX)
}

/// The `limit` best-selling products, most sales first; ties keep input order.
pub fn top_sellers(products: &[Product], limit: usize) -> Vec<Product> {
    let mut ranked: Vec<Product> = products.to_vec();
    ranked.sort_by(|a, b| b.sales.cmp(&a.sales));
    ranked.truncate(limit);
    ranked
}
