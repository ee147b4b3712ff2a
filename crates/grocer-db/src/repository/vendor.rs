//! # Vendor Repository
//!
//! Database operations for vendors. Deleting a vendor leaves its products
//! in place with no vendor (`ON DELETE SET NULL`).

use grocer_core::{NewVendor, Vendor, VendorUpdate};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for vendor database operations.
#[derive(Debug, Clone)]
pub struct VendorRepository {
    pool: SqlitePool,
}

impl VendorRepository {
    pub fn new(pool: SqlitePool) -> Self {
        VendorRepository { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<Vendor>> {
        let vendors = sqlx::query_as::<_, Vendor>(
            r#"
            SELECT vendor_id, name, phone, email, address
            FROM vendors
            ORDER BY vendor_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(vendors)
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Vendor>> {
        let vendor = sqlx::query_as::<_, Vendor>(
            r#"
            SELECT vendor_id, name, phone, email, address
            FROM vendors
            WHERE vendor_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vendor)
    }

    /// Inserts a vendor and returns it with its assigned ID.
    pub async fn insert(&self, vendor: &NewVendor) -> DbResult<Vendor> {
        vendor.validate()?;

        debug!(name = %vendor.name, "Inserting vendor");

        let stored = sqlx::query_as::<_, Vendor>(
            r#"
            INSERT INTO vendors (name, phone, email, address)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING vendor_id, name, phone, email, address
            "#,
        )
        .bind(vendor.name.trim())
        .bind(&vendor.phone)
        .bind(&vendor.email)
        .bind(&vendor.address)
        .fetch_one(&self.pool)
        .await?;

        Ok(stored)
    }

    /// Applies a single field edit.
    pub async fn update(&self, id: i64, update: &VendorUpdate) -> DbResult<()> {
        debug!(vendor_id = id, field = %update.field(), "Updating vendor");

        let query = match update {
            VendorUpdate::Name(value) => {
                sqlx::query("UPDATE vendors SET name = ?2 WHERE vendor_id = ?1")
                    .bind(id)
                    .bind(value)
            }
            VendorUpdate::Phone(value) => {
                sqlx::query("UPDATE vendors SET phone = ?2 WHERE vendor_id = ?1")
                    .bind(id)
                    .bind(value)
            }
            VendorUpdate::Email(value) => {
                sqlx::query("UPDATE vendors SET email = ?2 WHERE vendor_id = ?1")
                    .bind(id)
                    .bind(value)
            }
            VendorUpdate::Address(value) => {
                sqlx::query("UPDATE vendors SET address = ?2 WHERE vendor_id = ?1")
                    .bind(id)
                    .bind(value)
            }
        };

        let result = query.execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Vendor", id));
        }

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(vendor_id = id, "Deleting vendor");

        let result = sqlx::query("DELETE FROM vendors WHERE vendor_id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Vendor", id));
        }

        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vendors")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
