//! # Coupon Repository
//!
//! Database operations for discount coupons. Codes are unique; a duplicate
//! surfaces as `DbError::UniqueViolation`.

use grocer_core::{Coupon, CouponUpdate, NewCoupon};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};

/// Repository for coupon database operations.
#[derive(Debug, Clone)]
pub struct CouponRepository {
    pool: SqlitePool,
}

impl CouponRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CouponRepository { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<Coupon>> {
        let coupons = sqlx::query_as::<_, Coupon>(
            r#"
            SELECT coupon_id, code, discount_cents, expiration_date
            FROM coupons
            ORDER BY coupon_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(coupons)
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Coupon>> {
        let coupon = sqlx::query_as::<_, Coupon>(
            r#"
            SELECT coupon_id, code, discount_cents, expiration_date
            FROM coupons
            WHERE coupon_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(coupon)
    }

    /// Looks a coupon up by its code, ignoring ASCII case.
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Coupon>> {
        let coupon = sqlx::query_as::<_, Coupon>(
            r#"
            SELECT coupon_id, code, discount_cents, expiration_date
            FROM coupons
            WHERE code = ?1 COLLATE NOCASE
            "#,
        )
        .bind(code.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(coupon)
    }

    /// Inserts a coupon.
    ///
    /// ## Returns
    /// * `Ok(Coupon)` - Stored coupon with its assigned ID
    /// * `Err(DbError::UniqueViolation)` - Code already exists
    pub async fn insert(&self, coupon: &NewCoupon) -> DbResult<Coupon> {
        coupon.validate()?;

        debug!(code = %coupon.code, "Inserting coupon");

        let stored = sqlx::query_as::<_, Coupon>(
            r#"
            INSERT INTO coupons (code, discount_cents, expiration_date)
            VALUES (?1, ?2, ?3)
            RETURNING coupon_id, code, discount_cents, expiration_date
            "#,
        )
        .bind(coupon.code.trim())
        .bind(coupon.discount.cents())
        .bind(coupon.expiration_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match DbError::from(err) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, coupon.code.trim()),
            other => other,
        })?;

        Ok(stored)
    }

    /// Applies a single field edit.
    pub async fn update(&self, id: i64, update: &CouponUpdate) -> DbResult<()> {
        debug!(coupon_id = id, field = %update.field(), "Updating coupon");

        let query = match update {
            CouponUpdate::Code(value) => {
                sqlx::query("UPDATE coupons SET code = ?2 WHERE coupon_id = ?1")
                    .bind(id)
                    .bind(value)
            }
            CouponUpdate::Discount(value) => {
                sqlx::query("UPDATE coupons SET discount_cents = ?2 WHERE coupon_id = ?1")
                    .bind(id)
                    .bind(value.cents())
            }
            CouponUpdate::ExpirationDate(value) => {
                sqlx::query("UPDATE coupons SET expiration_date = ?2 WHERE coupon_id = ?1")
                    .bind(id)
                    .bind(*value)
            }
        };

        let result = query.execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Coupon", id));
        }

        Ok(())
    }

    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(coupon_id = id, "Deleting coupon");

        let result = sqlx::query("DELETE FROM coupons WHERE coupon_id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Coupon", id));
        }

        Ok(())
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM coupons")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
