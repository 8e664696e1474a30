//! Plain-text rendering of listings, product details and stats.

use std::fmt::Write;

use shopdash_core::{CatalogStats, Page};
use shopdash_shared::{Product, format_currency};

const PRODUCT_HEADERS: [&str; 7] = ["ID", "Name", "Category", "Stock", "Status", "Price", "Sales"];
const PRODUCT_NUMERIC: [bool; 7] = [true, false, false, true, false, true, true];

/// A page of products as an aligned table plus a position footer.
pub(crate) fn render_page(page: &Page<Product>) -> String {
    if page.total_items == 0 {
        return "No products found.\n".to_string();
    }
    if page.is_empty() {
        return format!(
            "Page {} is out of range ({} page{}).\n",
            page.number,
            page.total_pages,
            if page.total_pages == 1 { "" } else { "s" }
        );
    }

    let rows: Vec<Vec<String>> = page
        .items
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.name.clone(),
                p.category.to_string(),
                p.stock.to_string(),
                p.stock_level().to_string(),
                p.display_price(),
                p.sales.to_string(),
            ]
        })
        .collect();

    let mut out = render_table(&PRODUCT_HEADERS, &rows, &PRODUCT_NUMERIC);
    let last_row = page.first_row() + page.items.len() - 1;
    let _ = writeln!(
        out,
        "\nShowing {} to {} of {} results (page {} of {})",
        page.first_row(),
        last_row,
        page.total_items,
        page.number,
        page.total_pages
    );
    out
}

/// Every field of one product.
pub(crate) fn render_product(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  ID:       {}", product.id);
    let _ = writeln!(out, "  Name:     {}", product.name);
    let _ = writeln!(out, "  Category: {}", product.category);
    let _ = writeln!(out, "  Price:    {}", product.display_price());
    let _ = writeln!(out, "  Stock:    {} ({})", product.stock, product.stock_level());
    let _ = writeln!(out, "  Sales:    {}", product.sales);
    if !product.image.is_empty() {
        let _ = writeln!(out, "  Image:    {}", abbreviate(&product.image, 60));
    }
    out
}

/// Stat cards, the category breakdown and the best sellers.
pub(crate) fn render_stats(stats: &CatalogStats, best: &[Product]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  Products:        {}", stats.total_products);
    let _ = writeln!(out, "  In stock:        {}", stats.in_stock);
    let _ = writeln!(out, "  Low stock:       {}", stats.low_stock);
    let _ = writeln!(out, "  Out of stock:    {}", stats.out_of_stock);
    let _ = writeln!(out, "  Units sold:      {}", stats.units_sold);
    let _ = writeln!(out, "  Revenue:         {}", format_currency(stats.revenue));
    let _ = writeln!(out, "  Inventory value: {}", format_currency(stats.inventory_value));

    if !stats.categories.is_empty() {
        let rows: Vec<Vec<String>> = stats
            .categories
            .iter()
            .map(|share| {
                vec![
                    share.category.to_string(),
                    share.count.to_string(),
                    format!("{}%", share.percent),
                ]
            })
            .collect();
        let _ = writeln!(out);
        out.push_str(&render_table(&["Category", "Products", "Share"], &rows, &[false, true, true]));
    }

    if !best.is_empty() {
        let rows: Vec<Vec<String>> = best
            .iter()
            .enumerate()
            .map(|(rank, p)| {
                vec![
                    (rank + 1).to_string(),
                    p.name.clone(),
                    p.sales.to_string(),
                    p.display_price(),
                ]
            })
            .collect();
        let _ = writeln!(out);
        out.push_str(&render_table(
            &["#", "Top seller", "Sales", "Price"],
            &rows,
            &[true, false, true, true],
        ));
    }
    out
}

/// Align `rows` under `headers`; numeric columns are right-aligned.
fn render_table(headers: &[&str], rows: &[Vec<String>], numeric: &[bool]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    write_line(&mut out, &header_cells, &widths, numeric);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_line(&mut out, &rule, &widths, numeric);

    for row in rows {
        write_line(&mut out, row, &widths, numeric);
    }
    out
}

fn write_line(out: &mut String, cells: &[String], widths: &[usize], numeric: &[bool]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let pad = width.saturating_sub(cell.chars().count());
        if numeric.get(i).copied().unwrap_or(false) {
            line.push_str(&" ".repeat(pad));
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

fn abbreviate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars).collect();
    format!("{head}…")
}
