//! Product data source.
//!
//! The product set is loaded once at startup, either from the bundled sample
//! data (mock mode) or from `GET {api_url}/products`. Any failure of the API
//! path falls back to the sample data with a notice for the user, so loading
//! itself only fails when the bundled data is unusable.

mod fixtures;

use std::path::Path;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{info, instrument, warn};

use shopdash_shared::{DataConfig, Product, Result, ShopdashError, ensure_unique_ids};

pub use fixtures::sample_products;

/// Notice shown when the API could not be used.
pub const SAMPLE_DATA_NOTICE: &str = "using sample data";

/// Maximum products payload we accept (5 MB).
const MAX_RESPONSE_SIZE: u64 = 5 * 1024 * 1024;

/// User-Agent string for API requests.
const USER_AGENT: &str = concat!("shopdash/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// LoadedProducts
// ---------------------------------------------------------------------------

/// Where a loaded product set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// The bundled sample products.
    Sample,
    /// The configured products API.
    Api,
    /// A local JSON file.
    File,
}

impl std::fmt::Display for DataOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            DataOrigin::Sample => "sample data",
            DataOrigin::Api => "api",
            DataOrigin::File => "file",
        })
    }
}

/// The initial product set plus how it was obtained.
#[derive(Debug, Clone)]
pub struct LoadedProducts {
    pub products: Vec<Product>,
    pub origin: DataOrigin,
    /// Set when the configured source failed and sample data was used instead.
    pub notice: Option<String>,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Load the product set described by `config`.
#[instrument(skip_all, fields(mock = config.use_mock_data))]
pub async fn load_products(config: &DataConfig) -> Result<LoadedProducts> {
    if config.use_mock_data {
        info!("mock data enabled, serving sample products");
        return Ok(LoadedProducts {
            products: sample_products()?,
            origin: DataOrigin::Sample,
            notice: None,
        });
    }

    match fetch_from_api(config).await {
        Ok(products) => {
            info!(count = products.len(), "products loaded from api");
            Ok(LoadedProducts {
                products,
                origin: DataOrigin::Api,
                notice: None,
            })
        }
        Err(e) => {
            warn!(error = %e, "products api unavailable, falling back to sample data");
            Ok(LoadedProducts {
                products: sample_products()?,
                origin: DataOrigin::Sample,
                notice: Some(format!("{SAMPLE_DATA_NOTICE}: {e}")),
            })
        }
    }
}

/// Load products from a JSON file holding an array of product records.
pub fn load_from_file(path: &Path) -> Result<LoadedProducts> {
    let content = std::fs::read_to_string(path).map_err(|e| ShopdashError::io(path, e))?;
    let products = parse_products(&content)
        .map_err(|e| ShopdashError::parse(format!("{}: {e}", path.display())))?;

    info!(path = %path.display(), count = products.len(), "products loaded from file");
    Ok(LoadedProducts {
        products,
        origin: DataOrigin::File,
        notice: None,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a reqwest client with the configured timeout.
fn build_client(config: &DataConfig) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| ShopdashError::Network(format!("failed to build HTTP client: {e}")))
}

async fn fetch_from_api(config: &DataConfig) -> Result<Vec<Product>> {
    let url = config.products_url()?;
    let client = build_client(config)?;

    let response = client
        .get(url.clone())
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| ShopdashError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(ShopdashError::Network(format!("{url}: HTTP {status}")));
    }

    if let Some(len) = response.content_length() {
        if len > MAX_RESPONSE_SIZE {
            return Err(ShopdashError::validation(format!(
                "{url}: response too large ({len} bytes, max {MAX_RESPONSE_SIZE})"
            )));
        }
    }

    let body = response
        .text()
        .await
        .map_err(|e| ShopdashError::Network(format!("{url}: failed to read body: {e}")))?;

    parse_products(&body)
}

/// Parse a JSON array of products and check identifiers are unique.
fn parse_products(json: &str) -> Result<Vec<Product>> {
    let products: Vec<Product> = serde_json::from_str(json)
        .map_err(|e| ShopdashError::parse(format!("invalid products payload: {e}")))?;
    ensure_unique_ids(&products)?;
    Ok(products)
}
