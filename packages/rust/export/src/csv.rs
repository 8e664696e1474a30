//! Spreadsheet export: comma-separated values with a header row.

use std::fmt::Write;

use shopdash_shared::{Product, Result, ShopdashError};

/// Column headings, in output order.
pub const CSV_HEADER: [&str; 5] = ["Name", "Category", "Stock", "Price", "Sales"];

/// Render `products` as CSV (`\n` line endings, RFC 4180 quoting).
pub fn render_csv(products: &[Product]) -> Result<String> {
    let mut out = String::with_capacity(64 * (products.len() + 1));
    write_row(&mut out, CSV_HEADER)?;

    for product in products {
        let stock = product.stock.to_string();
        let price = product.display_price();
        let sales = product.sales.to_string();
        write_row(
            &mut out,
            [
                product.name.as_str(),
                product.category.as_str(),
                stock.as_str(),
                price.as_str(),
                sales.as_str(),
            ],
        )?;
    }
    Ok(out)
}

fn write_row<'a>(out: &mut String, fields: impl IntoIterator<Item = &'a str>) -> Result<()> {
    for (i, field) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write!(out, "{}", escape_field(field))
            .map_err(|e| ShopdashError::Export(format!("csv write failed: {e}")))?;
    }
    out.push('\n');
    Ok(())
}

/// Quote a field when it contains a separator, quote or line break.
fn escape_field(field: &str) -> std::borrow::Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        std::borrow::Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        std::borrow::Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shopdash_shared::{Category, ProductId};

    fn product(name: &str, category: Category, price: Decimal, stock: u32, sales: u64) -> Product {
        Product {
            id: ProductId(1),
            name: name.into(),
            category,
            price,
            stock,
            sales,
            image: "data:image/png;base64,AAAA".into(),
        }
    }

    #[test]
    fn header_only_for_empty_input() {
        assert_eq!(render_csv(&[]).unwrap(), "Name,Category,Stock,Price,Sales\n");
    }

    #[test]
    fn rows_follow_header_in_input_order() {
        let csv = render_csv(&[
            product("Gaming Laptop", Category::Electronics, Decimal::new(129999, 2), 25, 156),
            product("Yoga Mat", Category::Sports, Decimal::new(3999, 2), 50, 445),
        ])
        .unwrap();

        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines,
            [
                "Name,Category,Stock,Price,Sales",
                "Gaming Laptop,Electronics,25,$1299.99,156",
                "Yoga Mat,Sports,50,$39.99,445",
            ]
        );
    }

    #[test]
    fn price_always_has_two_decimals() {
        let csv = render_csv(&[product("Mug", Category::HomeAndLiving, Decimal::new(5, 0), 3, 0)])
            .unwrap();
        assert!(csv.contains("Mug,Home & Living,3,$5.00,0"));
    }

    #[test]
    fn special_characters_are_quoted() {
        let csv = render_csv(&[product(
            "Desk, \"Pro\" edition",
            Category::HomeAndLiving,
            Decimal::ONE,
            1,
            1,
        )])
        .unwrap();
        assert!(csv.contains("\"Desk, \"\"Pro\"\" edition\",Home & Living,1,$1.00,1"));
    }
}
