//! Customer commands (menu 4, 8, 12).

use std::io::{BufRead, Write};

use grocer_core::{Customer, CustomerField, CustomerUpdate, NewCustomer, Table};
use grocer_db::Database;
use tracing::info;

use super::{ask_id, field_list, optional_email, optional_phone, required_name, show};
use crate::error::CliResult;
use crate::prompt::Prompter;

/// Prompts for a customer and stores it with empty credit and rewards.
pub async fn add_customer<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    let customer = create_customer(db, prompt).await?;
    Ok(format!(
        "Customer added: #{} {}",
        customer.customer_id,
        customer.full_name()
    ))
}

/// Shared with the transaction flow for walk-in customers.
pub(crate) async fn create_customer<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<Customer> {
    let new = NewCustomer {
        first_name: prompt.ask_parsed(
            "Enter the customer's first name:",
            required_name("first name"),
        )?,
        last_name: prompt.ask_parsed(
            "Enter the customer's last name:",
            required_name("last name"),
        )?,
        email: prompt.ask_parsed("Enter the customer's email:", optional_email)?,
        phone: prompt.ask_parsed("Enter the customer's phone number:", optional_phone)?,
        address: prompt.ask_optional("Enter the customer's address:")?,
    };

    let customer = db.customers().insert(&new).await?;
    info!(customer_id = customer.customer_id, "Customer added");
    Ok(customer)
}

pub async fn update_customer<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    show(db, prompt, Table::Customers).await?;
    let id = ask_id(prompt, "customer")?;
    let field: CustomerField = prompt.ask_parsed(
        &format!(
            "Enter the field to update ({}):",
            field_list(CustomerField::ALL)
        ),
        str::parse,
    )?;
    let update = prompt.ask_parsed("Enter the new value:", |raw| {
        CustomerUpdate::parse(field, raw)
    })?;

    db.customers().update(id, &update).await?;
    Ok(format!("Customer {} updated: {}", id, update.field()))
}

pub async fn delete_customer<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    show(db, prompt, Table::Customers).await?;
    let id = ask_id(prompt, "customer")?;

    db.customers().delete(id).await?;
    Ok(format!("Customer {} deleted", id))
}
