//! Printable export: a standalone HTML page laying the listing out as a table.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use shopdash_shared::{Product, Result, ShopdashError};

use crate::csv::CSV_HEADER;

/// Page-level details of the printable document.
#[derive(Debug, Clone)]
pub struct PrintOptions {
    /// Heading shown above the table and used as the document title.
    pub title: String,
    /// Timestamp printed under the heading.
    pub generated_at: DateTime<Utc>,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            title: "Products Report".into(),
            generated_at: Utc::now(),
        }
    }
}

const STYLE: &str = "\
body { font-family: Helvetica, Arial, sans-serif; margin: 2rem; color: #111; }
h1 { font-size: 1.4rem; margin-bottom: 0.2rem; }
p.meta { color: #555; font-size: 0.85rem; margin-top: 0; }
table { border-collapse: collapse; width: 100%; font-size: 0.9rem; }
th, td { border: 1px solid #999; padding: 0.35rem 0.6rem; text-align: left; }
th { background: #eee; }
td.num { text-align: right; }
@media print { body { margin: 0; } thead { display: table-header-group; } tr { page-break-inside: avoid; } }
";

/// Render `products` as a printable HTML document.
pub fn render_print(products: &[Product], options: &PrintOptions) -> Result<String> {
    let mut out = String::with_capacity(1024 + 160 * products.len());
    write_document(&mut out, products, options)
        .map_err(|e| ShopdashError::Export(format!("print document write failed: {e}")))?;
    Ok(out)
}

fn write_document(out: &mut String, products: &[Product], options: &PrintOptions) -> std::fmt::Result {
    let title = escape_html(&options.title);

    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{title}</title>")?;
    writeln!(out, "<style>\n{STYLE}</style>")?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>{title}</h1>")?;
    writeln!(
        out,
        "<p class=\"meta\">Generated {} &middot; {} product{}</p>",
        options.generated_at.format("%Y-%m-%d %H:%M UTC"),
        products.len(),
        if products.len() == 1 { "" } else { "s" }
    )?;
    writeln!(out, "<table>")?;

    write!(out, "<thead><tr>")?;
    for heading in CSV_HEADER {
        write!(out, "<th>{heading}</th>")?;
    }
    writeln!(out, "</tr></thead>")?;

    writeln!(out, "<tbody>")?;
    for product in products {
        writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
            escape_html(&product.name),
            escape_html(product.category.as_str()),
            product.stock,
            product.display_price(),
            product.sales,
        )?;
    }
    writeln!(out, "</tbody>")?;
    writeln!(out, "</table>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
