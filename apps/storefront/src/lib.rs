//! # Storefront Library
//!
//! Shell around `storefront-core`: loads the product list, keeps the
//! session state, and serves commands over stdin/stdout.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Product list + filter/page inputs
//! │   ├── cart.rs     ◄─── Cart state management
//! │   ├── session.rs  ◄─── Login session and theme
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports, session guard
//! │   ├── catalog.rs  ◄─── Search, filter, paging commands
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── session.rs  ◄─── Signup, login, logout, theme commands
//! ├── source.rs       ◄─── Product list (HTTP or file) and login client
//! ├── shell.rs        ◄─── Line protocol
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod shell;
pub mod source;
pub mod state;

use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use shell::Shell;
use state::ConfigState;

/// Runs the storefront until stdin closes or `quit` is read.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Pick Source ──────────────────────────────────────────────────────► │
/// │     • products file set: File source + offline login                    │
/// │     • otherwise: store API for both                                     │
/// │                                                                         │
/// │  2. Load Product List ────────────────────────────────────────────────► │
/// │     • Once per session, validated on ingest                             │
/// │                                                                         │
/// │  3. Initialize State Objects ─────────────────────────────────────────► │
/// │     • CatalogState: default filters, page 1                             │
/// │     • CartState: empty cart                                             │
/// │     • SessionState: logged out, dark theme                              │
/// │                                                                         │
/// │  4. Serve stdin ──────────────────────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(config: ConfigState) -> anyhow::Result<()> {
    info!(
        api = %config.api_base_url,
        offline = config.is_offline(),
        page_size = config.page_size,
        "Starting storefront"
    );

    let (source, auth) = source::from_config(&config)?;
    let catalog = source.load().await?;
    let shell = Shell::new(config, catalog, auth)?;

    info!("Ready for commands");
    shell
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    info!("Storefront stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout carries only command replies.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront=trace` - Show trace for the shell only
/// - Default: INFO, DEBUG for the shell
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront=debug,storefront_lib=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
