//! Display records (menu 2).

use std::io::{BufRead, Write};

use grocer_core::Table;
use grocer_db::Database;

use super::show;
use crate::error::CliResult;
use crate::prompt::Prompter;

/// Lists the tables, asks for one by name and prints it.
pub async fn display_records<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    prompt.say("Available Tables:")?;
    for (n, table) in Table::ALL.iter().enumerate() {
        prompt.say(format_args!("  {}.{}", n + 1, table))?;
    }

    let table: Table = prompt.ask_parsed("Enter the table name:", str::parse)?;
    show(db, prompt, table).await?;
    Ok(format!("{} displayed", table))
}
