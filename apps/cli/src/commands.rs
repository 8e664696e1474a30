//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use shopdash_core::pipeline::{self, CategoryFilter, FilterSpec, SortKey, StockFilter};
use shopdash_core::{Catalog, CatalogStats, ProductListView, Selection, top_sellers};
use shopdash_export::{ExportFormat, PrintOptions, export_to_file};
use shopdash_shared::{AppConfig, ProductId, ShopdashError, init_config, load_config, parse_toggle};
use shopdash_source::{LoadedProducts, load_from_file, load_products};

use crate::table;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// shopdash: filter, sort, page through and export the product catalog.
#[derive(Parser)]
#[command(
    name = "shopdash",
    version,
    about = "Filter, sort, paginate and export the product catalog.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Serve the bundled sample products instead of calling the API (true/false).
    #[arg(long, env = "SHOPDASH_USE_MOCK_DATA", global = true)]
    pub mock_data: Option<String>,

    /// Base URL of the products API.
    #[arg(long, env = "SHOPDASH_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Load products from a local JSON file instead of the configured source.
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Filter, sort and search flags shared by `list` and `export`.
#[derive(Args, Debug)]
pub(crate) struct ListingArgs {
    /// Category: all, electronics, fashion, home-living, sports or books.
    #[arg(short, long, default_value = "all")]
    pub category: CategoryFilter,

    /// Stock level: all, in, low or out.
    #[arg(long, default_value = "all")]
    pub stock: StockFilter,

    /// Sort key: name, price-asc, price-desc or stock (defaults to the configured sort).
    #[arg(short, long)]
    pub sort: Option<SortKey>,

    /// Case-insensitive substring matched against product names.
    #[arg(short = 'q', long, default_value = "")]
    pub search: String,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Show one page of the filtered, sorted product list.
    List {
        #[command(flatten)]
        listing: ListingArgs,

        /// Page number (1-based).
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Rows per page (defaults to the configured page size).
        #[arg(long)]
        page_size: Option<usize>,

        /// Print the page as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Export the filtered, sorted product list.
    Export {
        #[command(flatten)]
        listing: ListingArgs,

        /// Output format: csv or print.
        #[arg(short, long, default_value = "csv")]
        format: ExportFormat,

        /// Output file (defaults to products.csv / products.html in the export directory).
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Only export these product ids (comma-separated).
        #[arg(long, value_delimiter = ',')]
        ids: Vec<ProductId>,

        /// Heading of the printable document.
        #[arg(long)]
        title: Option<String>,
    },

    /// Show catalog summary figures and the best sellers.
    Stats {
        /// Number of best sellers to list.
        #[arg(long, default_value_t = 5)]
        top: usize,

        /// Print the figures as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show a single product.
    Show {
        /// Product id.
        id: ProductId,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

/// Data source flags that override the config file.
struct SourceOverrides {
    mock_data: Option<String>,
    api_url: Option<String>,
    data: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr so listings
/// and exports on stdout stay clean.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "shopdash=info",
        1 => "shopdash=debug",
        _ => "shopdash=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let overrides = SourceOverrides {
        mock_data: cli.mock_data,
        api_url: cli.api_url,
        data: cli.data,
    };

    match cli.command {
        Command::List {
            listing,
            page,
            page_size,
            json,
        } => cmd_list(&overrides, &listing, page, page_size, json).await,
        Command::Export {
            listing,
            format,
            out,
            ids,
            title,
        } => cmd_export(&overrides, &listing, format, out.as_deref(), &ids, title).await,
        Command::Stats { top, json } => cmd_stats(&overrides, top, json).await,
        Command::Show { id } => cmd_show(&overrides, id).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(&overrides).await,
        },
    }
}

// ---------------------------------------------------------------------------
// Shared setup
// ---------------------------------------------------------------------------

/// Config file values with flag/environment overrides applied.
fn resolve_config(overrides: &SourceOverrides) -> Result<AppConfig> {
    let mut config = load_config()?;

    if let Some(raw) = &overrides.mock_data {
        config.data.use_mock_data = parse_toggle(raw)?;
    }
    if let Some(url) = &overrides.api_url {
        config.data.api_url = url.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Load the product set into a catalog, with a spinner while it is fetched.
async fn load_catalog(config: &AppConfig, overrides: &SourceOverrides) -> Result<Catalog> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")?
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message("Loading products");

    let loaded: Result<LoadedProducts> = match &overrides.data {
        Some(path) => load_from_file(path).map_err(Into::into),
        None => load_products(&config.data).await.map_err(Into::into),
    };
    spinner.finish_and_clear();
    let loaded = loaded?;

    if let Some(notice) = &loaded.notice {
        eprintln!("note: {notice}");
    }
    info!(
        origin = %loaded.origin,
        count = loaded.products.len(),
        "catalog ready"
    );

    Ok(Catalog::new(loaded.products)?)
}

/// The filter spec from flags, falling back to the configured sort.
fn filter_spec(listing: &ListingArgs, config: &AppConfig) -> Result<FilterSpec> {
    let sort = match listing.sort {
        Some(sort) => sort,
        None => config.defaults.sort.parse()?,
    };
    Ok(FilterSpec {
        category: listing.category,
        stock: listing.stock,
        sort,
    })
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_list(
    overrides: &SourceOverrides,
    listing: &ListingArgs,
    page: usize,
    page_size: Option<usize>,
    json: bool,
) -> Result<()> {
    let config = resolve_config(overrides)?;
    let spec = filter_spec(listing, &config)?;
    let catalog = load_catalog(&config, overrides).await?;

    let mut view = ProductListView::new(page_size.unwrap_or(config.defaults.page_size));
    view.set_spec(spec);
    view.set_search(listing.search.as_str());
    view.set_page(page);

    let page = view.current_page(&catalog);
    info!(
        category = %spec.category,
        stock = %spec.stock,
        sort = %spec.sort,
        page = page.number,
        rows = page.items.len(),
        total = page.total_items,
        "listing products"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", table::render_page(&page));
    }
    Ok(())
}

async fn cmd_export(
    overrides: &SourceOverrides,
    listing: &ListingArgs,
    format: ExportFormat,
    out: Option<&Path>,
    ids: &[ProductId],
    title: Option<String>,
) -> Result<()> {
    let config = resolve_config(overrides)?;
    let spec = filter_spec(listing, &config)?;
    let catalog = load_catalog(&config, overrides).await?;

    let mut rows = pipeline::apply(catalog.products(), &spec, &listing.search);
    if !ids.is_empty() {
        let selection: Selection = ids.iter().copied().collect();
        for id in selection.ids().filter(|id| !catalog.contains(*id)) {
            warn!(id = %id, "selected product does not exist");
        }
        rows = selection.selected_from(&rows);
    }

    let path = match out {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(&config.export.output_dir).join(format.default_file_name()),
    };
    let options = PrintOptions {
        title: title.unwrap_or_else(|| config.export.title.clone()),
        ..PrintOptions::default()
    };

    let summary = export_to_file(&rows, format, &options, &path)?;

    println!();
    println!("  Export written!");
    println!("  Format: {}", summary.format);
    println!("  Rows:   {}", summary.rows);
    println!("  Size:   {} bytes", summary.bytes);
    println!("  Path:   {}", summary.path.display());
    println!();

    Ok(())
}

async fn cmd_stats(overrides: &SourceOverrides, top: usize, json: bool) -> Result<()> {
    let config = resolve_config(overrides)?;
    let catalog = load_catalog(&config, overrides).await?;

    let stats = CatalogStats::compute(catalog.products());
    let best = top_sellers(catalog.products(), top);

    if json {
        let value = serde_json::json!({
            "stats": stats,
            "top_sellers": best,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print!("{}", table::render_stats(&stats, &best));
    }
    Ok(())
}

async fn cmd_show(overrides: &SourceOverrides, id: ProductId) -> Result<()> {
    let config = resolve_config(overrides)?;
    let catalog = load_catalog(&config, overrides).await?;

    let product = catalog.get(id).ok_or(ShopdashError::NotFound(id.0))?;
    print!("{}", table::render_product(product));
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(overrides: &SourceOverrides) -> Result<()> {
    let config = resolve_config(overrides)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
