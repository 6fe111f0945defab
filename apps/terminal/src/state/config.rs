//! # Configuration
//!
//! Startup settings for the terminal front end.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line flags (`--database`, `--ephemeral`, `--log`, `--no-clear`)
//! 2. Environment variables (`MARKETCALC_*`, `NO_COLOR`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup.

use clap::Parser;
use directories::ProjectDirs;
use std::path::PathBuf;

use crate::error::{AppError, AppResult, ErrorCode};

/// Database file name inside the platform data directory.
pub const DATABASE_FILE: &str = "marketcalc.db";

/// Log filter used unless overridden.
pub const DEFAULT_LOG_FILTER: &str = "warn,marketcalc=info,sqlx=warn";

/// Command line flags.
#[derive(Debug, Default, Parser)]
#[command(
    name = "marketcalc",
    about = env!("CARGO_PKG_DESCRIPTION"),
    version = env!("CARGO_PKG_VERSION")
)]
pub struct CliArgs {
    #[arg(long, value_name = "PATH", help = "Preferences database file.")]
    pub database: Option<PathBuf>,

    #[arg(long, help = "Keep preferences in memory only; nothing is written to disk.")]
    pub ephemeral: bool,

    #[arg(long, value_name = "FILTER", help = "Log filter, e.g. 'debug' or 'marketcalc=trace'.")]
    pub log: Option<String>,

    #[arg(long, help = "Do not clear the screen between renders.")]
    pub no_clear: bool,
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Explicit database path. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Use an in-memory preference store.
    pub ephemeral: bool,

    /// `tracing` filter directives.
    pub log_filter: String,

    /// Clear the terminal before each render.
    pub clear_screen: bool,

    /// Emit colours. Off when `NO_COLOR` is set.
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            ephemeral: false,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            clear_screen: true,
            color: true,
        }
    }
}

impl AppConfig {
    /// Defaults, then environment, then `args`.
    pub fn load(args: &CliArgs) -> Self {
        let mut config = AppConfig::from_env();
        config.apply_args(args);
        config
    }

    /// Creates a configuration from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `MARKETCALC_DB_PATH`: database file
    /// - `MARKETCALC_EPHEMERAL`: `1`/`true`/`yes`/`on` for an in-memory store
    /// - `MARKETCALC_LOG`: log filter
    /// - `NO_COLOR`: any non-empty value disables colours
    pub fn from_env() -> Self {
        AppConfig::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = AppConfig::default();

        if let Some(path) = lookup("MARKETCALC_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(flag) = lookup("MARKETCALC_EPHEMERAL") {
            config.ephemeral = is_truthy(&flag);
        }

        if let Some(filter) = lookup("MARKETCALC_LOG").filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.color = false;
        }

        config
    }

    fn apply_args(&mut self, args: &CliArgs) {
        if let Some(path) = &args.database {
            self.database_path = Some(path.clone());
        }
        if args.ephemeral {
            self.ephemeral = true;
        }
        if let Some(filter) = &args.log {
            self.log_filter = filter.clone();
        }
        if args.no_clear {
            self.clear_screen = false;
        }
    }

    /// Where the preferences database lives.
    ///
    /// ## Platform-Specific Defaults
    /// - **macOS**: `~/Library/Application Support/com.marketcalc.MarketCalc/marketcalc.db`
    /// - **Windows**: `%APPDATA%\MarketCalc\MarketCalc\data\marketcalc.db`
    /// - **Linux**: `~/.local/share/marketcalc/marketcalc.db`
    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let proj_dirs = ProjectDirs::from("com", "MarketCalc", "MarketCalc").ok_or_else(|| {
            AppError::new(
                ErrorCode::IoError,
                "Could not determine app data directory (use --database or --ephemeral)",
            )
        })?;

        Ok(proj_dirs.data_dir().join(DATABASE_FILE))
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
