//! # Cart CLI Library
//!
//! A command-line host for the cart: it plays the part the storefront UI
//! plays in the browser, against a cart file on disk.
//!
//! ## Module Organization
//! ```text
//! cart_cli/
//! ├── lib.rs        ◄─── You are here (arg parsing, logging, run)
//! ├── commands.rs   ◄─── One subcommand per cart operation
//! └── error.rs      ◄─── CliError and exit codes
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr, `RUST_LOG` aware)
//! 2. Load `CartConfig` from the environment, apply `--data-dir`/`--key`
//! 3. Open a `CartStore` over the config's file slot (hydrates)
//! 4. Execute the subcommand (which persists on every mutation)

pub mod commands;
pub mod error;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use butterfly_cart::{CartConfig, CartStore};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use commands::Command;

/// Ocean & Butterfly shopping cart
#[derive(Debug, Parser)]
#[command(name = "butterfly-cart", version, about)]
pub struct Cli {
    /// Directory holding the cart file (overrides BUTTERFLY_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Cart slot key (overrides BUTTERFLY_CART_KEY)
    #[arg(long, global = true)]
    pub key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Environment config with this invocation's flags applied on top.
    pub fn config(&self) -> CartConfig {
        let mut config = CartConfig::from_env();
        if let Some(dir) = &self.data_dir {
            config.data_dir = Some(dir.clone());
        }
        if let Some(key) = &self.key {
            config.storage_key = key.clone();
        }
        config
    }
}

/// Parses arguments and runs one command.
pub fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.config();

    let slot = config.file_slot();
    info!(path = %slot.path().display(), "opening cart");
    let mut store = CartStore::open(slot);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match commands::execute(cli.command, &mut store, &config, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every cart mutation
/// - `RUST_LOG=butterfly_cart=trace` - Trace the store only
/// - Default: WARN, so command output on stdout stays clean
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
