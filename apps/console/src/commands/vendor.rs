//! Vendor commands (menu 5, 9, 13).

use std::io::{BufRead, Write};

use grocer_core::{NewVendor, Table, Vendor, VendorField, VendorUpdate};
use grocer_db::Database;
use tracing::info;

use super::{ask_id, field_list, optional_email, optional_phone, required_name, show};
use crate::error::CliResult;
use crate::prompt::Prompter;

pub async fn add_vendor<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    let vendor = create_vendor(db, prompt).await?;
    Ok(format!("Vendor added: #{} {}", vendor.vendor_id, vendor.name))
}

/// Shared with the add-product flow for new suppliers.
pub(crate) async fn create_vendor<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<Vendor> {
    let new = NewVendor {
        name: prompt.ask_parsed("Enter the vendor's name:", required_name("vendor name"))?,
        phone: prompt.ask_parsed("Enter the vendor's phone number:", optional_phone)?,
        email: prompt.ask_parsed("Enter the vendor's email:", optional_email)?,
        address: prompt.ask_optional("Enter the vendor's address:")?,
    };

    let vendor = db.vendors().insert(&new).await?;
    info!(vendor_id = vendor.vendor_id, "Vendor added");
    Ok(vendor)
}

pub async fn update_vendor<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    show(db, prompt, Table::Vendors).await?;
    let id = ask_id(prompt, "vendor")?;
    let field: VendorField = prompt.ask_parsed(
        &format!("Enter the field to update ({}):", field_list(VendorField::ALL)),
        str::parse,
    )?;
    let update = prompt.ask_parsed("Enter the new value:", |raw| VendorUpdate::parse(field, raw))?;

    db.vendors().update(id, &update).await?;
    Ok(format!("Vendor {} updated: {}", id, update.field()))
}

/// Products supplied by the vendor are kept with no vendor.
pub async fn delete_vendor<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    show(db, prompt, Table::Vendors).await?;
    let id = ask_id(prompt, "vendor")?;

    let orphaned = db.products().list_by_vendor(id).await?.len();
    db.vendors().delete(id).await?;
    if orphaned > 0 {
        Ok(format!("Vendor {} deleted ({} products now have no vendor)", id, orphaned))
    } else {
        Ok(format!("Vendor {} deleted", id))
    }
}
