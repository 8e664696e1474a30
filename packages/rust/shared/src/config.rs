//! Application configuration for shopdash.
//!
//! User config lives at `~/.shopdash/shopdash.toml`.
//! CLI flags and `SHOPDASH_*` environment variables override config file
//! values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ShopdashError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "shopdash.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".shopdash";

/// Rows per table page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

// ---------------------------------------------------------------------------
// Config structs (matching shopdash.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listing defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Where the product set comes from.
    #[serde(default)]
    pub data: DataConfig,

    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Rows per table page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Sort key used when none is given (`name`, `price-asc`, `price-desc`, `stock`).
    #[serde(default = "default_sort")]
    pub sort: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            sort: default_sort(),
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
fn default_sort() -> String {
    "name".into()
}

/// `[data]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Serve the bundled sample products instead of calling the API.
    #[serde(default = "default_true")]
    pub use_mock_data: bool,

    /// Base URL of the products API; products are fetched from `{api_url}/products`.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Request timeout for the products API.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            use_mock_data: true,
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_api_url() -> String {
    "http://localhost:3000/api".into()
}
fn default_timeout_secs() -> u64 {
    10
}

impl DataConfig {
    /// Resolve the products endpoint (`{api_url}/products`).
    pub fn products_url(&self) -> Result<Url> {
        let mut base = Url::parse(&self.api_url).map_err(|e| {
            ShopdashError::config(format!("invalid api_url '{}': {e}", self.api_url))
        })?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join("products")
            .map_err(|e| ShopdashError::config(format!("invalid api_url '{}': {e}", self.api_url)))
    }
}

/// `[export]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory export files are written to when no explicit path is given.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Heading of the printable document.
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            title: default_title(),
        }
    }
}

fn default_output_dir() -> String {
    ".".into()
}
fn default_title() -> String {
    "Products Report".into()
}

impl AppConfig {
    /// Reject values no listing can work with.
    pub fn validate(&self) -> Result<()> {
        if self.defaults.page_size == 0 {
            return Err(ShopdashError::config("defaults.page_size must be at least 1"));
        }
        if !self.data.use_mock_data {
            self.data.products_url()?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.shopdash/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| ShopdashError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.shopdash/shopdash.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ShopdashError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        ShopdashError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    config.validate()?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    init_config_in(&config_dir()?)
}

/// Write a default config file into `dir`, creating it if needed.
pub fn init_config_in(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| ShopdashError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| ShopdashError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| ShopdashError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Parse a boolean toggle the way the mock-data environment switch is written
/// (`true`/`false`, `1`/`0`, `yes`/`no`, `on`/`off`).
pub fn parse_toggle(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ShopdashError::config(format!(
            "invalid toggle '{other}': expected true or false"
        ))),
    }
}
