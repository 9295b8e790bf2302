//! # tally
//!
//! Runs one checkout over a product catalog and prints the receipt.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          tally Startup                                  │
//! │                                                                         │
//! │  1. Initialize Logging (stderr)                                         │
//! │     • Default: info,tally=debug; override with RUST_LOG                 │
//! │                                                                         │
//! │  2. Load CheckoutConfig                                                 │
//! │     • --config, else the platform config dir, then TALLY_* env vars     │
//! │                                                                         │
//! │  3. Load Catalog                                                        │
//! │     • --catalog, else [catalog] path from config                        │
//! │                                                                         │
//! │  4. Checkout                                                            │
//! │     • Pos built from the configured rules, run once                     │
//! │                                                                         │
//! │  5. Print Receipt (stdout)                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod report;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tally_catalog::{CatalogLoader, CheckoutConfig};
use tally_core::Cart;
use tracing::info;
use tracing_subscriber::EnvFilter;

use report::Receipt;

#[derive(Parser, Debug)]
#[command(name = "tally", version, about = "Apply discount rules to a cart and print the receipt")]
struct Cli {
    /// Product catalog (JSON array); overrides [catalog] path
    #[arg(short = 'c', long = "catalog")]
    catalog: Option<PathBuf>,

    /// Checkout config (TOML); defaults to the platform config directory
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Leave tags off the receipt lines
    #[arg(long = "no-tags")]
    no_tags: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = CheckoutConfig::load(cli.config.clone()).context("Failed to load checkout config")?;

    let catalog_path = match cli.catalog.or_else(|| config.catalog.path.clone()) {
        Some(path) => path,
        None => bail!("No catalog given; pass --catalog or set [catalog] path / TALLY_CATALOG_PATH"),
    };

    let mut loader = CatalogLoader::new();
    let items = loader
        .load_path(&catalog_path)
        .with_context(|| format!("Failed to load catalog {}", catalog_path.display()))?;
    let mut cart = Cart::from_items(items)?;

    let pos = config.build_pos()?;
    let total = pos.checkout(&mut cart);
    info!(total = %total, "Receipt ready");

    let show_tags = config.report.show_tags && !cli.no_tags;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    Receipt::new().write_to(&mut out, &cart, pos.rules(), show_tags)?;
    out.flush()?;

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so the receipt on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages, including every rule pass
/// - `RUST_LOG=tally_core=trace` - Trace the engine only
/// - Default: `info,tally=debug`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tally=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_flags() {
        let cli = Cli::try_parse_from(["tally", "--catalog", "p.json", "--no-tags"]).unwrap();
        assert_eq!(cli.catalog, Some(PathBuf::from("p.json")));
        assert!(cli.config.is_none());
        assert!(cli.no_tags);

        let cli = Cli::try_parse_from(["tally", "--config", "c.toml"]).unwrap();
        assert!(cli.catalog.is_none());
        assert!(!cli.no_tags);
    }
}
