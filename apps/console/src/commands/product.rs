//! Product commands (menu 6, 10, 14).

use std::io::{BufRead, Write};

use grocer_core::validation::{
    optional_text, parse_id, parse_integer, parse_money, validate_price, validate_stock_level,
};
use grocer_core::{NewProduct, ProductField, ProductUpdate, Table};
use grocer_db::Database;
use tracing::info;

use super::{ask_id, field_list, required_name, show, vendor};
use crate::error::CliResult;
use crate::prompt::Prompter;

/// Prompts for a product. The operator may register its vendor on the way.
pub async fn add_product<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    let name = prompt.ask_parsed("Enter the product's name:", required_name("product name"))?;

    show(db, prompt, Table::Vendors).await?;
    if !prompt.confirm("Does the product vendor already exist?")? {
        let vendor = vendor::create_vendor(db, prompt).await?;
        prompt.say(format_args!("Vendor added: #{} {}", vendor.vendor_id, vendor.name))?;
    }
    let vendor_id = prompt.ask_parsed(
        "Enter the ID of the product vendor (blank for none):",
        |raw| optional_text(raw).map(|id| parse_id("vendor ID", &id)).transpose(),
    )?;

    let price = prompt.ask_parsed("Enter the product's price:", |raw| {
        let price = parse_money("price", raw)?;
        validate_price("price", price)?;
        Ok(price)
    })?;
    let quantity = prompt.ask_parsed("Enter the product's quantity:", |raw| {
        let quantity = parse_integer("quantity", raw)?;
        validate_stock_level(quantity)?;
        Ok(quantity)
    })?;

    let product = db
        .products()
        .insert(&NewProduct {
            name,
            vendor_id,
            price,
            quantity,
        })
        .await?;
    info!(product_id = product.product_id, "Product added");

    Ok(format!(
        "Product added: #{} {} at {}",
        product.product_id,
        product.name,
        product.price()
    ))
}

pub async fn update_product<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    show(db, prompt, Table::Products).await?;
    let id = ask_id(prompt, "product")?;
    let field: ProductField = prompt.ask_parsed(
        &format!("Enter the field to update ({}):", field_list(ProductField::ALL)),
        str::parse,
    )?;
    let update = prompt.ask_parsed("Enter the new value:", |raw| ProductUpdate::parse(field, raw))?;

    db.products().update(id, &update).await?;
    Ok(format!("Product {} updated: {}", id, update.field()))
}

pub async fn delete_product<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    show(db, prompt, Table::Products).await?;
    let id = ask_id(prompt, "product")?;

    db.products().delete(id).await?;
    Ok(format!("Product {} deleted", id))
}
