//! # Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        storefront                                       │
//! │                                                                         │
//! │  main.rs ────► Parses flags, loads config, sets up logging             │
//! │                                                                         │
//! │  lib.rs ─────► Loads products, builds state, serves stdin              │
//! │                                                                         │
//! │  commands/ ──► search, set_page, add_to_cart, login, ...               │
//! │                                                                         │
//! │  state/ ─────► CatalogState, CartState, SessionState, ConfigState      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```text
//! storefront                                  # fakestoreapi.com
//! storefront --products ./products.json       # offline
//! echo "login u p
//! search shirt" | storefront --page-size 4
//! ```

use std::path::PathBuf;

use clap::Parser;
use storefront_lib::state::ConfigState;

/// Browse a product catalog and fill a cart from the command line.
#[derive(Debug, Parser)]
#[command(name = "storefront", version, about)]
struct Cli {
    /// Store API base URL (overrides STOREFRONT_API_URL).
    #[arg(long)]
    api_url: Option<String>,

    /// Load products from a JSON file and log in offline.
    #[arg(long, value_name = "FILE")]
    products: Option<PathBuf>,

    /// Products per catalog page.
    #[arg(long)]
    page_size: Option<usize>,
}

impl Cli {
    fn apply(self, mut config: ConfigState) -> ConfigState {
        if let Some(url) = self.api_url {
            config.api_base_url = url;
        }
        if let Some(path) = self.products {
            config.products_path = Some(path);
        }
        if let Some(size) = self.page_size {
            config.page_size = size;
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    storefront_lib::init_tracing();

    let config = cli.apply(ConfigState::from_env()?);
    config.validate()?;

    storefront_lib::run(config).await
}
