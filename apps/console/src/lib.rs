//! # Grocer Console Library
//!
//! The interactive menu for the Grocer store database. `main.rs` only
//! calls [`run`]; everything else lives here so the loop can be driven
//! from tests with scripted input.
//!
//! ## Module Organization
//! ```text
//! grocer_console/
//! ├── lib.rs          ◄─── You are here (startup & menu loop)
//! ├── config.rs       ◄─── Cli flags + layered AppConfig
//! ├── error.rs        ◄─── CliError for commands
//! ├── menu.rs         ◄─── MenuChoice 1-16
//! ├── prompt.rs       ◄─── Prompter over BufRead/Write
//! ├── render.rs       ◄─── Table and receipt text
//! └── commands/
//!     ├── mod.rs      ◄─── dispatch + shared prompts
//!     ├── transaction.rs
//!     ├── display.rs
//!     ├── rewards.rs
//!     └── customer.rs, vendor.rs, product.rs, coupon.rs
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod menu;
pub mod prompt;
pub mod render;

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::{AppConfig, Cli};
use error::{CliError, ErrorCode};
use grocer_db::Database;
use menu::{menu_text, MenuChoice};
use prompt::Prompter;

/// Runs the console.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Console Startup                                   │
/// │                                                                         │
/// │  1. Parse flags, load grocer.toml and GROCER_* env                      │
/// │  2. Initialize logging (stderr, RUST_LOG overrides log_filter)          │
/// │  3. Open the database (WAL, foreign keys, migrations)                   │
/// │  4. Menu loop on stdin/stdout until Quit or end of input                │
/// │  5. Close the pool                                                      │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli).context("Failed to load configuration")?;

    init_tracing(&config.log_filter);
    info!("Starting Grocer console");

    config.ensure_data_dir()?;
    let db = Database::new(config.db_config())
        .await
        .with_context(|| format!("Failed to open {}", config.database_path.display()))?;
    info!(path = %config.database_path.display(), "Database ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut prompt = Prompter::new(stdin.lock(), stdout.lock());

    let outcome = run_menu(&db, &mut prompt).await;
    db.close().await;
    outcome?;

    info!("Grocer console stopped");
    Ok(())
}

/// Shows the menu and runs choices until Quit or end of input.
///
/// Command failures are printed and the loop goes on. Only a broken
/// console ends it with an error.
pub async fn run_menu<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> Result<(), CliError> {
    loop {
        prompt.say(menu_text())?;
        let choice: MenuChoice = match prompt.ask_parsed("Enter your choice:", str::parse) {
            Ok(choice) => choice,
            Err(err) => return end_of_session(err.into()),
        };

        if choice == MenuChoice::Quit {
            prompt.say("Goodbye")?;
            return Ok(());
        }

        debug!(?choice, "Menu choice");
        match commands::dispatch(choice, db, prompt).await {
            Ok(line) => prompt.say(format_args!("✓ {}\n", line))?,
            Err(err) if err.ends_session() => return end_of_session(err),
            Err(err) => {
                debug!(?choice, code = ?err.code, "Command failed");
                prompt.say(format_args!("✗ {}\n", err.message))?;
            }
        }
    }
}

fn end_of_session(err: CliError) -> Result<(), CliError> {
    match err.code {
        ErrorCode::InputClosed => {
            info!("Input closed");
            Ok(())
        }
        _ => Err(err),
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages (one per SQL statement)
/// - `RUST_LOG=grocer_db=trace` - Trace the database crate only
/// - Default: `log_filter` from config (`warn,grocer=info,sqlx=warn`)
///
/// Logs go to stderr so they never land inside menu output.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
