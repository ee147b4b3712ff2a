//! # Menu Commands
//!
//! One module per menu area. Every command prompts for what it needs,
//! calls grocer-db, and returns the success line to print.
//!
//! ```text
//! MenuChoice ──► dispatch ──► commands::<area>::<action>(db, prompt)
//!                                   │
//!                                   ├── Ok(line)  ──► "✓ line"
//!                                   └── Err(e)    ──► "✗ e.message"
//! ```

pub mod coupon;
pub mod customer;
pub mod display;
pub mod product;
pub mod rewards;
pub mod transaction;
pub mod vendor;

use std::io::{BufRead, Write};

use grocer_core::validation::{
    optional_text, parse_id, validate_email, validate_name, validate_phone, ValidationResult,
};
use grocer_core::Table;
use grocer_db::Database;

use crate::error::CliResult;
use crate::menu::MenuChoice;
use crate::prompt::Prompter;
use crate::render;

/// Runs one menu action. `Quit` is handled by the caller.
pub async fn dispatch<R: BufRead, W: Write>(
    choice: MenuChoice,
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    match choice {
        MenuChoice::MakeTransaction => transaction::make_transaction(db, prompt).await,
        MenuChoice::DisplayRecords => display::display_records(db, prompt).await,
        MenuChoice::UpdateRewards => rewards::update_rewards(db, prompt).await,
        MenuChoice::AddCustomer => customer::add_customer(db, prompt).await,
        MenuChoice::AddVendor => vendor::add_vendor(db, prompt).await,
        MenuChoice::AddProduct => product::add_product(db, prompt).await,
        MenuChoice::AddCoupon => coupon::add_coupon(db, prompt).await,
        MenuChoice::UpdateCustomer => customer::update_customer(db, prompt).await,
        MenuChoice::UpdateVendor => vendor::update_vendor(db, prompt).await,
        MenuChoice::UpdateProduct => product::update_product(db, prompt).await,
        MenuChoice::UpdateCoupon => coupon::update_coupon(db, prompt).await,
        MenuChoice::DeleteCustomer => customer::delete_customer(db, prompt).await,
        MenuChoice::DeleteVendor => vendor::delete_vendor(db, prompt).await,
        MenuChoice::DeleteProduct => product::delete_product(db, prompt).await,
        MenuChoice::DeleteCoupon => coupon::delete_coupon(db, prompt).await,
        MenuChoice::Quit => Ok("Goodbye".to_string()),
    }
}

/// Prints a table so the operator can pick an id from it.
pub(crate) async fn show<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
    table: Table,
) -> CliResult<()> {
    let dump = db.tables().dump(table).await?;
    prompt.say(render::table(&dump))?;
    Ok(())
}

/// Lists the accepted field names for an update prompt.
pub(crate) fn field_list<F: std::fmt::Display>(fields: &[F]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Asks for a row id, re-prompting until it is a positive integer.
pub(crate) fn ask_id<R: BufRead, W: Write>(
    prompt: &mut Prompter<R, W>,
    what: &'static str,
) -> CliResult<i64> {
    let field = format!("{} ID", what);
    let question = format!("Enter the {}:", field);
    Ok(prompt.ask_parsed(&question, |raw| parse_id(&field, raw))?)
}

pub(crate) fn required_name(field: &'static str) -> impl Fn(&str) -> ValidationResult<String> {
    move |raw| {
        validate_name(field, raw)?;
        Ok(raw.trim().to_string())
    }
}

pub(crate) fn optional_email(raw: &str) -> ValidationResult<Option<String>> {
    let email = optional_text(raw);
    if let Some(email) = &email {
        validate_email(email)?;
    }
    Ok(email)
}

pub(crate) fn optional_phone(raw: &str) -> ValidationResult<Option<String>> {
    let phone = optional_text(raw);
    if let Some(phone) = &phone {
        validate_phone(phone)?;
    }
    Ok(phone)
}
