//! Coupon commands (menu 7, 11, 15).

use std::io::{BufRead, Write};

use chrono::Utc;
use grocer_core::validation::{parse_date, parse_money, validate_coupon_code, validate_price};
use grocer_core::{CouponField, CouponUpdate, NewCoupon, Table};
use grocer_db::Database;
use tracing::info;

use super::{ask_id, field_list, show};
use crate::error::CliResult;
use crate::prompt::Prompter;

pub async fn add_coupon<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    let code = prompt.ask_parsed("Enter the coupon code:", |raw| {
        validate_coupon_code(raw)?;
        Ok(raw.trim().to_string())
    })?;
    let discount = prompt.ask_parsed("Enter the discount amount:", |raw| {
        let discount = parse_money("discount", raw)?;
        validate_price("discount", discount)?;
        Ok(discount)
    })?;
    let expiration_date = prompt.ask_parsed("Enter the expiration date (YYYY-MM-DD):", |raw| {
        parse_date("expiration date", raw)
    })?;

    let coupon = db
        .coupons()
        .insert(&NewCoupon {
            code,
            discount,
            expiration_date,
        })
        .await?;
    info!(coupon_id = coupon.coupon_id, code = %coupon.code, "Coupon added");

    let mut line = format!(
        "Coupon added: #{} {} for {} until {}",
        coupon.coupon_id,
        coupon.code,
        coupon.discount(),
        coupon.expiration_date
    );
    if coupon.is_expired(Utc::now().date_naive()) {
        line.push_str(" (already expired)");
    }
    Ok(line)
}

pub async fn update_coupon<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    show(db, prompt, Table::Coupons).await?;
    let id = ask_id(prompt, "coupon")?;
    let field: CouponField = prompt.ask_parsed(
        &format!("Enter the field to update ({}):", field_list(CouponField::ALL)),
        str::parse,
    )?;
    let update = prompt.ask_parsed("Enter the new value:", |raw| CouponUpdate::parse(field, raw))?;

    db.coupons().update(id, &update).await?;
    Ok(format!("Coupon {} updated: {}", id, update.field()))
}

pub async fn delete_coupon<R: BufRead, W: Write>(
    db: &Database,
    prompt: &mut Prompter<R, W>,
) -> CliResult<String> {
    show(db, prompt, Table::Coupons).await?;
    let id = ask_id(prompt, "coupon")?;

    db.coupons().delete(id).await?;
    Ok(format!("Coupon {} deleted", id))
}
