//! # Domain Types
//!
//! Row types and request types used throughout Grocer.
//!
//! ## Type Map
//! ```text
//!   Vendor ◄──── Product ◄──── TransactionRecord ────► Customer
//!   (vendor_id)  (price_cents,  (transaction_type,      (names, contact)
//!                 quantity)      quantity)                  │
//!                                                           ├── CreditAccount (1:1)
//!   Coupon (code, discount_cents, expiration_date)          └── RewardsAccount (1:1)
//! ```
//!
//! Identifiers are assigned by storage (`INTEGER PRIMARY KEY`), so they are
//! plain `i64` values here.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_email, validate_name, validate_optional_text, validate_phone, validate_price,
    validate_stock_level, ValidationResult,
};
use crate::CREDIT_KIND;

// =============================================================================
// Customer
// =============================================================================

/// A customer of the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub customer_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// "First Last", as shown in listings.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for creating a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl NewCustomer {
    /// Checks every field against the customer rules.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("first name", &self.first_name)?;
        validate_name("last name", &self.last_name)?;
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        validate_optional_text("address", self.address.as_deref())?;
        Ok(())
    }
}

// =============================================================================
// Vendor
// =============================================================================

/// A supplier that products are bought from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Vendor {
    pub vendor_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Input for creating a vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVendor {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl NewVendor {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("vendor name", &self.name)?;
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        validate_optional_text("address", self.address.as_deref())?;
        Ok(())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product on the shelf.
///
/// `quantity` is the count on hand. Whether it may go below zero is decided
/// by the [`StockPolicy`] of whoever decrements it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    pub vendor_id: Option<i64>,
    pub price_cents: i64,
    pub quantity: i64,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub vendor_id: Option<i64>,
    pub price: Money,
    pub quantity: i64,
}

impl NewProduct {
    pub fn validate(&self) -> ValidationResult<()> {
        validate_name("product name", &self.name)?;
        validate_price("price", self.price)?;
        validate_stock_level(self.quantity)?;
        Ok(())
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A discount coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Coupon {
    pub coupon_id: i64,
    pub code: String,
    pub discount_cents: i64,
    pub expiration_date: NaiveDate,
}

impl Coupon {
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// A coupon is still valid on its expiration date.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        today > self.expiration_date
    }
}

/// Input for creating a coupon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCoupon {
    pub code: String,
    pub discount: Money,
    pub expiration_date: NaiveDate,
}

impl NewCoupon {
    pub fn validate(&self) -> ValidationResult<()> {
        crate::validation::validate_coupon_code(&self.code)?;
        validate_price("discount", self.discount)?;
        Ok(())
    }
}

// =============================================================================
// Credit & Rewards
// =============================================================================

/// Outstanding balance a customer has bought on credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CreditAccount {
    pub customer_id: i64,
    pub credit_cents: i64,
}

impl CreditAccount {
    #[inline]
    pub fn balance(&self) -> Money {
        Money::from_cents(self.credit_cents)
    }
}

/// Loyalty points collected by a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct RewardsAccount {
    pub customer_id: i64,
    pub points: i64,
}

// =============================================================================
// Transactions
// =============================================================================

/// Free-form transaction label as typed by the operator.
///
/// Only one value carries behavior: anything equal to `"credit"` ignoring
/// ASCII case is charged to the customer's credit balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionKind(String);

impl TransactionKind {
    /// Wraps a label, trimming surrounding whitespace.
    pub fn new(label: impl Into<String>) -> Self {
        let label: String = label.into();
        TransactionKind(label.trim().to_string())
    }

    /// The label as stored in the transaction log.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the purchase goes on the customer's tab.
    pub fn is_credit(&self) -> bool {
        self.0.eq_ignore_ascii_case(CREDIT_KIND)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the append-only transaction log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TransactionRecord {
    pub transaction_id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub transaction_type: String,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    pub fn kind(&self) -> TransactionKind {
        TransactionKind::new(self.transaction_type.as_str())
    }
}

/// A purchase to be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub customer_id: i64,
    pub product_id: i64,
    pub kind: TransactionKind,
    pub quantity: i64,
}

impl TransactionRequest {
    pub fn new(customer_id: i64, product_id: i64, kind: impl Into<String>, quantity: i64) -> Self {
        TransactionRequest {
            customer_id,
            product_id,
            kind: TransactionKind::new(kind),
            quantity,
        }
    }
}

// =============================================================================
// Stock Policy
// =============================================================================

/// What happens when a sale would take quantity on hand below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Refuse the sale; nothing is recorded.
    #[default]
    RejectOversell,
    /// Let the quantity go negative (back-orders).
    AllowNegative,
}

impl StockPolicy {
    #[inline]
    pub const fn allows_negative(&self) -> bool {
        matches!(self, StockPolicy::AllowNegative)
    }
}

impl FromStr for StockPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "reject_oversell" | "reject" => Ok(StockPolicy::RejectOversell),
            "allow_negative" | "allow" => Ok(StockPolicy::AllowNegative),
            _ => Err(ValidationError::NotAllowed {
                field: "stock policy".to_string(),
                allowed: vec!["reject_oversell".to_string(), "allow_negative".to_string()],
            }),
        }
    }
}

// =============================================================================
// Tables
// =============================================================================

/// The tables an operator may dump to the screen.
///
/// This closed set is the whitelist: a name typed at the console must parse
/// into one of these before anything is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Customers,
    Credit,
    Vendors,
    Products,
    Transactions,
    Coupons,
    Rewards,
}

impl Table {
    pub const ALL: [Table; 7] = [
        Table::Customers,
        Table::Credit,
        Table::Vendors,
        Table::Products,
        Table::Transactions,
        Table::Coupons,
        Table::Rewards,
    ];

    /// Display name, as listed in the console prompt.
    pub const fn name(&self) -> &'static str {
        match self {
            Table::Customers => "Customers",
            Table::Credit => "Credit",
            Table::Vendors => "Vendors",
            Table::Products => "Products",
            Table::Transactions => "Transactions",
            Table::Coupons => "Coupons",
            Table::Rewards => "Rewards",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Table {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Table::ALL
            .into_iter()
            .find(|table| table.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "table".to_string(),
                allowed: Table::ALL.iter().map(|t| t.name().to_string()).collect(),
            })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
