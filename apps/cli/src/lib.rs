//! # Shopkeep CLI
//!
//! Command-line admin tool for a single-user inventory.
//!
//! ## Module Structure
//! ```text
//! shopkeep_cli/
//! ├── lib.rs          ← You are here (argument parsing, setup, dispatch)
//! ├── main.rs         ← Binary entry point
//! ├── config.rs       ← Flags > environment > defaults, money formatting
//! ├── error.rs        ← CliError with exit codes
//! ├── output.rs       ← Text tables
//! └── commands/
//!     ├── mod.rs      ← Render trait, text / JSON emission
//!     ├── items.rs    ← list, show, add, edit, delete
//!     └── reports.rs  ← stats, categories
//! ```
//!
//! ## Initialization Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      CLI Startup Sequence                               │
//! │                                                                         │
//! │  1. Parse arguments (clap)                                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  2. Initialize tracing (stderr, RUST_LOG or default filter)             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  3. Resolve configuration (--data-dir > SHOPKEEP_* > defaults)          │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  4. Open the inventory (missing file → empty; a corrupt file is         │
//! │     logged for reads, refused with exit 4 for writes)                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  5. Run the command, print text or JSON to stdout                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  6. Exit 0, or the error's exit code                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shopkeep_store::Inventory;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::commands::{emit, AddArgs, EditArgs, ListArgs};
use crate::config::CliConfig;
use crate::error::CliResult;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn,shopkeep=info";

/// Log filter used with `--verbose` when `RUST_LOG` is unset.
pub const VERBOSE_LOG_FILTER: &str = "debug";

/// Shopkeep - inventory admin for a small shop.
#[derive(Debug, Parser)]
#[command(name = "shopkeep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding items.json (overrides SHOPKEEP_DATA_DIR).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List items, with header metrics.
    List(ListArgs),

    /// Show one item.
    Show {
        /// Item ID.
        id: u64,
    },

    /// Add an item.
    Add(AddArgs),

    /// Edit an item; omitted fields keep their values.
    Edit {
        /// Item ID.
        id: u64,

        #[command(flatten)]
        fields: EditArgs,
    },

    /// Delete an item.
    Delete {
        /// Item ID.
        id: u64,
    },

    /// Totals, per-category breakdown, low-stock and recent items.
    Stats,

    /// Distinct categories in use.
    Categories,
}

impl Commands {
    /// True for commands that save the collection.
    pub fn writes(&self) -> bool {
        matches!(self, Commands::Add(_) | Commands::Edit { .. } | Commands::Delete { .. })
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - Otherwise `warn,shopkeep=info`, or `debug` with `--verbose`
///
/// Logs go to stderr so stdout carries only command output.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second init (e.g. in tests) is harmless; keep the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parses the process arguments, runs the command and maps the outcome to
/// an exit code.
pub fn main_entry() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json = cli.json;

    let config = match CliConfig::from_env() {
        Ok(config) => config.with_data_dir(cli.data_dir.clone()),
        Err(e) => return report(e.into(), json),
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match run(cli, &config, &mut out) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(e, json),
    }
}

fn report(err: error::CliError, json: bool) -> ExitCode {
    if json {
        match serde_json::to_string(&err) {
            Ok(text) => eprintln!("{text}"),
            Err(_) => eprintln!("Error: {err}"),
        }
    } else {
        eprintln!("Error: {err}");
    }
    err.exit_code()
}

/// Runs a parsed command against the configured data directory.
pub fn run<W: Write>(cli: Cli, config: &CliConfig, out: &mut W) -> CliResult<()> {
    debug!(data_dir = %config.data_dir.display(), command = ?cli.command, "Running command");
    // Saving after a soft load of an unreadable file would replace every record in it.
    let mut inventory = if cli.command.writes() {
        Inventory::try_open(config.store_config())?
    } else {
        Inventory::open(config.store_config())
    };
    let json = cli.json;

    match cli.command {
        Commands::List(args) => emit(out, &commands::list(&inventory, &args), json, config),
        Commands::Show { id } => emit(out, &commands::show(&inventory, id)?, json, config),
        Commands::Add(args) => {
            let response = commands::add(&mut inventory, args)?;
            info!(id = response.item.id, "Added item");
            emit(out, &response, json, config)
        }
        Commands::Edit { id, fields } => {
            let response = commands::edit(&mut inventory, id, fields)?;
            emit(out, &response, json, config)
        }
        Commands::Delete { id } => emit(out, &commands::delete(&mut inventory, id)?, json, config),
        Commands::Stats => emit(out, &commands::stats(&inventory), json, config),
        Commands::Categories => emit(out, &commands::categories(&inventory), json, config),
    }
}
