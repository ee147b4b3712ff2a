//! # Rewards Repository
//!
//! Loyalty points. Granting points is a single upsert, so a customer that
//! somehow lost its rewards row gets a fresh one instead of an error.

use grocer_core::validation::validate_points;
use grocer_core::RewardsAccount;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for rewards points.
#[derive(Debug, Clone)]
pub struct RewardsRepository {
    pool: SqlitePool,
}

impl RewardsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        RewardsRepository { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<RewardsAccount>> {
        let accounts = sqlx::query_as::<_, RewardsAccount>(
            "SELECT customer_id, points FROM rewards ORDER BY customer_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    pub async fn get(&self, customer_id: i64) -> DbResult<Option<RewardsAccount>> {
        let account = sqlx::query_as::<_, RewardsAccount>(
            "SELECT customer_id, points FROM rewards WHERE customer_id = ?1",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Adds points to a customer, creating the rewards row when missing.
    ///
    /// ## Returns
    /// * `Ok(RewardsAccount)` - The account after the grant
    /// * `Err(DbError::ForeignKeyViolation)` - Customer doesn't exist
    pub async fn add_points(&self, customer_id: i64, points: i64) -> DbResult<RewardsAccount> {
        validate_points(points)?;

        debug!(customer_id, points, "Adding reward points");

        let account = sqlx::query_as::<_, RewardsAccount>(
            r#"
            INSERT INTO rewards (customer_id, points)
            VALUES (?1, ?2)
            ON CONFLICT (customer_id) DO UPDATE SET points = points + excluded.points
            RETURNING customer_id, points
            "#,
        )
        .bind(customer_id)
        .bind(points)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }
}
