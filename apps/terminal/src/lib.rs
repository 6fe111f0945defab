//! # MarketCalc Terminal Library
//!
//! The interactive front end: a line-oriented loop over one bill session.
//!
//! ## Module Organization
//! ```text
//! marketcalc_terminal/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State exports
//! │   ├── config.rs   ◄─── Flags, environment, defaults
//! │   └── store.rs    ◄─── SQLite / in-memory preference store
//! ├── commands/
//! │   ├── mod.rs      ◄─── parse, dispatch, help
//! │   ├── bill.rs     ◄─── delete, reset
//! │   ├── form.rs     ◄─── weighed and MRP dialogs
//! │   └── preferences.rs ◄─ currency, theme
//! ├── view.rs         ◄─── Snapshot rendering, palettes
//! ├── repl.rs         ◄─── Read-eval-print loop
//! └── error.rs        ◄─── User-facing error type
//! ```
//!
//! Logs go to stderr so they never mix with the screen on stdout.

pub mod commands;
pub mod error;
pub mod repl;
pub mod state;
pub mod view;

use std::io;

use clap::Parser;
use marketcalc_core::session::AppContext;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::AppResult;
use repl::{Repl, ReplOptions};
use state::{open_store, AppConfig, CliArgs};

/// Runs the terminal application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Read Configuration ───────────────────────────────────────────────► │
/// │     • defaults, MARKETCALC_* env vars, command line flags               │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, written to stderr             │
/// │     • RUST_LOG wins over --log / MARKETCALC_LOG                         │
/// │                                                                         │
/// │  3. Open Preference Store ────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │     • in-memory with --ephemeral or when the database is unusable       │
/// │                                                                         │
/// │  4. Load Preferences & Start Session ─────────────────────────────────► │
/// │     • theme and currency restored, bill starts empty                    │
/// │                                                                         │
/// │  5. Run the Loop ─────────────────────────────────────────────────────► │
/// │     • until `quit` or end of input                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> AppResult<()> {
    let args = CliArgs::parse();
    let config = AppConfig::load(&args);

    init_tracing(&config.log_filter);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting MarketCalc");

    let store = open_store(&config);
    let ctx = AppContext::new(store);

    info!(
        theme = %ctx.preferences().theme,
        currency = ctx.preferences().currency.code,
        "Preferences loaded"
    );

    let mut repl = Repl::new(ctx, ReplOptions::from(&config));
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl.run(stdin.lock(), &mut stdout)?;

    info!("Session ended");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=marketcalc=trace` - Show trace for marketcalc crates only
/// - Default: `fallback` (from `--log`, `MARKETCALC_LOG` or the built-in filter)
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
