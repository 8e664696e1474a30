//! shopdash CLI: browse, filter and export the product catalog.
//!
//! Loads the product set from the configured API (or the bundled sample
//! data), then runs the listing pipeline over it.

mod commands;
mod table;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
