//! # Transaction Log Repository
//!
//! Read side of the append-only transaction log. Rows are written only by
//! [`TransactionRecorder`](crate::recorder::TransactionRecorder).

use grocer_core::TransactionRecord;
use sqlx::SqlitePool;

use crate::error::DbResult;

/// Repository for reading recorded transactions.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Lists the whole log in recording order.
    pub async fn list(&self) -> DbResult<Vec<TransactionRecord>> {
        let records = sqlx::query_as::<_, TransactionRecord>(
            r#"
            SELECT transaction_id, customer_id, product_id, transaction_type, quantity, created_at
            FROM transactions
            ORDER BY transaction_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<TransactionRecord>> {
        let record = sqlx::query_as::<_, TransactionRecord>(
            r#"
            SELECT transaction_id, customer_id, product_id, transaction_type, quantity, created_at
            FROM transactions
            WHERE transaction_id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Lists one customer's purchases in recording order.
    pub async fn list_for_customer(&self, customer_id: i64) -> DbResult<Vec<TransactionRecord>> {
        let records = sqlx::query_as::<_, TransactionRecord>(
            r#"
            SELECT transaction_id, customer_id, product_id, transaction_type, quantity, created_at
            FROM transactions
            WHERE customer_id = ?1
            ORDER BY transaction_id
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM transactions")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
