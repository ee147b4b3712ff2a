//! Rewards points (menu 3).

use std::io::{BufRead, Write};

use grocer_core::validation::{parse_integer, validate_points};
use grocer_core::Table;
use grocer_db::Database;
use tracing::info;

use super::{ask_id, show};
use crate::error::CliResult;
use crate::prompt::Prompter;

/// Adds points to a customer's rewards, opening the account if needed.
pub async fn update_rewards<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    show(db, prompt, Table::Customers).await?;
    let customer_id = ask_id(prompt, "customer")?;
    let points = prompt.ask_parsed("Enter the points to add:", |raw| {
        let points = parse_integer("points", raw)?;
        validate_points(points)?;
        Ok(points)
    })?;

    let account = db.rewards().add_points(customer_id, points).await?;
    info!(customer_id, points, total = account.points, "Rewards points added");

    Ok(format!(
        "Rewards points updated: customer {} now has {} points",
        account.customer_id, account.points
    ))
}
