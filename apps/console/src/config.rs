//! # Console Configuration
//!
//! Layered, last one wins:
//!
//! ```text
//! defaults ──► grocer.toml (or --config) ──► GROCER_* env ──► flags
//! ```
//!
//! ## Example `grocer.toml`
//! ```toml
//! database_path = "/var/lib/grocer/grocer.db"
//! max_connections = 4
//! busy_timeout_secs = 10
//! stock_policy = "allow_negative"
//! log_filter = "warn,grocer=debug"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use directories::ProjectDirs;
use grocer_core::StockPolicy;
use grocer_db::DbConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "grocer";
const ENV_PREFIX: &str = "GROCER";

/// Default `EnvFilter` directive when neither `RUST_LOG` nor `log_filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn,grocer=info,sqlx=warn";

/// Command line flags.
#[derive(Debug, Default, Parser)]
#[command(name = "grocer", version, about = "Inventory and customer ledger for a small grocery")]
pub struct Cli {
    /// Config file (TOML). Defaults to ./grocer.toml when present.
    #[arg(short, long, env = "GROCER_CONFIG")]
    pub config: Option<PathBuf>,

    /// SQLite database file.
    #[arg(short = 'd', long = "db")]
    pub database_path: Option<PathBuf>,

    /// reject_oversell or allow_negative.
    #[arg(long)]
    pub stock_policy: Option<StockPolicy>,

    /// Maximum pooled connections.
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Seconds a writer waits on the database lock.
    #[arg(long)]
    pub busy_timeout_secs: Option<u64>,

    /// tracing filter, e.g. "warn,grocer=debug". RUST_LOG still wins.
    #[arg(long)]
    pub log_filter: Option<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Could not create data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Resolved console configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub busy_timeout_secs: u64,
    pub stock_policy: StockPolicy,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let db = DbConfig::new(default_database_path());
        AppConfig {
            database_path: db.database_path,
            max_connections: db.max_connections,
            min_connections: db.min_connections,
            connect_timeout_secs: db.connect_timeout.as_secs(),
            busy_timeout_secs: db.busy_timeout.as_secs(),
            stock_policy: db.stock_policy,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the file and environment layers, then applies flags.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => config::File::from(path.as_path()).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let mut settings: AppConfig = config::Config::builder()
            .add_source(file)
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        settings.apply(cli);
        Ok(settings)
    }

    fn apply(&mut self, cli: &Cli) {
        if let Some(path) = &cli.database_path {
            self.database_path = path.clone();
        }
        if let Some(policy) = cli.stock_policy {
            self.stock_policy = policy;
        }
        if let Some(max) = cli.max_connections {
            self.max_connections = max;
        }
        if let Some(secs) = cli.busy_timeout_secs {
            self.busy_timeout_secs = secs;
        }
        if let Some(filter) = &cli.log_filter {
            self.log_filter = filter.clone();
        }
    }

    /// Creates the database file's parent directory if needed.
    pub fn ensure_data_dir(&self) -> Result<(), ConfigError> {
        match self.database_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                std::fs::create_dir_all(dir).map_err(|source| ConfigError::DataDir {
                    path: dir.to_path_buf(),
                    source,
                })
            }
            _ => Ok(()),
        }
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path)
            .max_connections(self.max_connections)
            .min_connections(self.min_connections.min(self.max_connections))
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .busy_timeout(Duration::from_secs(self.busy_timeout_secs))
            .stock_policy(self.stock_policy)
    }
}

/// Platform data directory, falling back to the working directory.
///
/// - **Linux**: `~/.local/share/grocer/grocer.db`
/// - **macOS**: `~/Library/Application Support/com.grocer.grocer/grocer.db`
/// - **Windows**: `%APPDATA%\grocer\grocer\data\grocer.db`
fn default_database_path() -> PathBuf {
    ProjectDirs::from("com", "grocer", "grocer")
        .map(|dirs| dirs.data_dir().join("grocer.db"))
        .unwrap_or_else(|| Path::new("grocer.db").to_path_buf())
}
