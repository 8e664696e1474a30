//! Export of product listings.
//!
//! Two formats are supported:
//! - [`ExportFormat::Csv`]: `Name,Category,Stock,Price,Sales` rows for spreadsheets
//! - [`ExportFormat::Print`]: a standalone HTML table laid out for printing
//!
//! Rendering is pure; [`export_to_file`] hands the result to the filesystem.

pub mod csv;
pub mod print;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use shopdash_shared::{Product, Result, ShopdashError};

pub use csv::{CSV_HEADER, render_csv};
pub use print::{PrintOptions, render_print};

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Print,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Print => "html",
        }
    }

    /// File name used when the caller does not pick one.
    pub fn default_file_name(self) -> String {
        format!("products.{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ShopdashError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "print" | "html" | "pdf" => Ok(ExportFormat::Print),
            _ => Err(ShopdashError::parse(format!(
                "unknown export format '{s}': expected csv or print"
            ))),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Print => "print",
        })
    }
}

/// Render `products` in `format`. `options` only affects the print layout.
pub fn render(products: &[Product], format: ExportFormat, options: &PrintOptions) -> Result<String> {
    match format {
        ExportFormat::Csv => render_csv(products),
        ExportFormat::Print => render_print(products, options),
    }
}

/// What [`export_to_file`] wrote.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub format: ExportFormat,
    pub rows: usize,
    pub bytes: usize,
}

/// Render `products` and write them to `path`, creating parent directories.
#[instrument(skip_all, fields(format = %format, rows = products.len(), path = %path.display()))]
pub fn export_to_file(
    products: &[Product],
    format: ExportFormat,
    options: &PrintOptions,
    path: &Path,
) -> Result<ExportSummary> {
    let content = render(products, format, options)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ShopdashError::io(parent, e))?;
    }
    std::fs::write(path, &content).map_err(|e| ShopdashError::io(path, e))?;

    info!(bytes = content.len(), "export written");

    Ok(ExportSummary {
        path: path.to_path_buf(),
        format,
        rows: products.len(),
        bytes: content.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shopdash_shared::{Category, ProductId};

    fn products() -> Vec<Product> {
        vec![Product {
            id: ProductId(13),
            name: "Programming Guide".into(),
            category: Category::Books,
            price: Decimal::new(4999, 2),
            stock: 25,
            sales: 234,
            image: String::new(),
        }]
    }

    #[test]
    fn format_tokens() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Print);
        assert!("xlsx".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Csv.default_file_name(), "products.csv");
        assert_eq!(ExportFormat::Print.default_file_name(), "products.html");
    }

    #[test]
    fn writes_csv_file_with_nested_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("exports").join("products.csv");

        let summary =
            export_to_file(&products(), ExportFormat::Csv, &PrintOptions::default(), &path)
                .expect("export");

        assert_eq!(summary.rows, 1);
        let written = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(summary.bytes, written.len());
        assert_eq!(
            written,
            "Name,Category,Stock,Price,Sales\nProgramming Guide,Books,25,$49.99,234\n"
        );
    }

    #[test]
    fn writes_print_document() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("report.html");
        let options = PrintOptions {
            title: "Books".into(),
            ..PrintOptions::default()
        };

        export_to_file(&products(), ExportFormat::Print, &options, &path).expect("export");
        let written = std::fs::read_to_string(&path).expect("read back");
        assert!(written.contains("<h1>Books</h1>"));
        assert!(written.contains("Programming Guide"));
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").expect("write");

        let err = export_to_file(
            &products(),
            ExportFormat::Csv,
            &PrintOptions::default(),
            &blocker.join("products.csv"),
        )
        .unwrap_err();
        assert!(matches!(err, ShopdashError::Io { .. }));
    }
}
