//! # Make a Transaction (menu 1)
//!
//! ```text
//! Customers table ──► new customer? ──► customer ID
//!       │
//!       ▼
//! Products table ──► product ID ──► type ──► quantity
//!       │
//!       ▼
//! TransactionRecorder::record ──► receipt
//! ```
//!
//! Stock and price checks happen inside the recorder's unit of work, not
//! here, so what the operator saw on screen may be stale by the time the
//! sale is written.

use std::io::{BufRead, Write};

use grocer_core::validation::{parse_integer, validate_quantity};
use grocer_core::{Table, TransactionRequest};
use grocer_db::Database;

use super::{ask_id, customer, required_name, show};
use crate::error::CliResult;
use crate::prompt::Prompter;
use crate::render;

pub async fn make_transaction<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    show(db, prompt, Table::Customers).await?;
    if !prompt.confirm("Does the customer already exist?")? {
        let customer = customer::create_customer(db, prompt).await?;
        prompt.say(format_args!(
            "Customer added: #{} {}",
            customer.customer_id,
            customer.full_name()
        ))?;
    }
    let customer_id = ask_id(prompt, "customer")?;

    show(db, prompt, Table::Products).await?;
    let product_id = ask_id(prompt, "product")?;
    let kind = prompt.ask_parsed(
        "Enter the transaction type (credit or other):",
        required_name("transaction type"),
    )?;
    let quantity = prompt.ask_parsed("Enter the quantity:", |raw| {
        let quantity = parse_integer("quantity", raw)?;
        validate_quantity(quantity)?;
        Ok(quantity)
    })?;

    let request = TransactionRequest::new(customer_id, product_id, kind, quantity);
    let receipt = db.recorder().record(&request).await?;
    prompt.say(render::receipt(&receipt))?;

    Ok(format!("Transaction #{} recorded", receipt.transaction_id))
}
