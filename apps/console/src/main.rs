//! # Grocer Console Entry Point
//!
//! `grocer [--config grocer.toml] [--db path/to/grocer.db]`
//!
//! Setup and the menu loop are in lib.rs for testability.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    grocer_console::run().await
}
