//! # Table Display
//!
//! Whole-table dumps for the "Display records" menu entry.
//!
//! ```text
//!   "products" ──parse──► Table::Products ──► ProductRepository::list()
//!                                                     │
//!                                                     ▼
//!                               TableDump { columns, rows: Vec<Vec<String>> }
//! ```
//!
//! The table is picked by matching on [`Table`], so a name typed at the
//! console never becomes part of a statement.

use grocer_core::{
    Coupon, CreditAccount, Customer, Product, RewardsAccount, Table, TransactionRecord, Vendor,
};
use serde::Serialize;

use crate::error::DbResult;
use crate::pool::Database;

/// A row type that can be shown as text cells.
pub trait TableRow {
    const COLUMNS: &'static [&'static str];

    fn cells(&self) -> Vec<String>;
}

fn opt<T: ToString>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

impl TableRow for Customer {
    const COLUMNS: &'static [&'static str] = &[
        "customer_id",
        "first_name",
        "last_name",
        "email",
        "phone",
        "address",
        "created_at",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.customer_id.to_string(),
            self.first_name.clone(),
            self.last_name.clone(),
            opt(&self.email),
            opt(&self.phone),
            opt(&self.address),
            self.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]
    }
}

impl TableRow for CreditAccount {
    const COLUMNS: &'static [&'static str] = &["customer_id", "credit"];

    fn cells(&self) -> Vec<String> {
        vec![self.customer_id.to_string(), self.balance().to_string()]
    }
}

impl TableRow for Vendor {
    const COLUMNS: &'static [&'static str] = &["vendor_id", "name", "phone", "email", "address"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.vendor_id.to_string(),
            self.name.clone(),
            opt(&self.phone),
            opt(&self.email),
            opt(&self.address),
        ]
    }
}

impl TableRow for Product {
    const COLUMNS: &'static [&'static str] =
        &["product_id", "name", "vendor_id", "price", "quantity"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.product_id.to_string(),
            self.name.clone(),
            opt(&self.vendor_id),
            self.price().to_string(),
            self.quantity.to_string(),
        ]
    }
}

impl TableRow for TransactionRecord {
    const COLUMNS: &'static [&'static str] = &[
        "transaction_id",
        "customer_id",
        "product_id",
        "transaction_type",
        "quantity",
        "created_at",
    ];

    fn cells(&self) -> Vec<String> {
        vec![
            self.transaction_id.to_string(),
            self.customer_id.to_string(),
            self.product_id.to_string(),
            self.transaction_type.clone(),
            self.quantity.to_string(),
            self.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]
    }
}

impl TableRow for Coupon {
    const COLUMNS: &'static [&'static str] =
        &["coupon_id", "code", "discount", "expiration_date"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.coupon_id.to_string(),
            self.code.clone(),
            self.discount().to_string(),
            self.expiration_date.to_string(),
        ]
    }
}

impl TableRow for RewardsAccount {
    const COLUMNS: &'static [&'static str] = &["customer_id", "points"];

    fn cells(&self) -> Vec<String> {
        vec![self.customer_id.to_string(), self.points.to_string()]
    }
}

/// A table rendered to column names plus string cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableDump {
    pub table: Table,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl TableDump {
    fn from_rows<R: TableRow>(table: Table, rows: &[R]) -> Self {
        TableDump {
            table,
            columns: R::COLUMNS.to_vec(),
            rows: rows.iter().map(TableRow::cells).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Dumps any whitelisted table.
#[derive(Debug, Clone)]
pub struct TableRepository {
    db: Database,
}

impl TableRepository {
    pub fn new(db: Database) -> Self {
        TableRepository { db }
    }

    pub async fn dump(&self, table: Table) -> DbResult<TableDump> {
        let dump = match table {
            Table::Customers => TableDump::from_rows(table, &self.db.customers().list().await?),
            Table::Credit => TableDump::from_rows(table, &self.db.credit().list().await?),
            Table::Vendors => TableDump::from_rows(table, &self.db.vendors().list().await?),
            Table::Products => TableDump::from_rows(table, &self.db.products().list().await?),
            Table::Transactions => {
                TableDump::from_rows(table, &self.db.transactions().list().await?)
            }
            Table::Coupons => TableDump::from_rows(table, &self.db.coupons().list().await?),
            Table::Rewards => TableDump::from_rows(table, &self.db.rewards().list().await?),
        };

        Ok(dump)
    }
}
