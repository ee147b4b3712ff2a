//! # Credit Repository
//!
//! Read access to customers' credit balances. Balances only change through
//! the transaction recorder.

use grocer_core::{CreditAccount, Money};
use sqlx::SqlitePool;

use crate::error::{DbError, DbResult};

/// Repository for credit balance reads.
#[derive(Debug, Clone)]
pub struct CreditRepository {
    pool: SqlitePool,
}

impl CreditRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CreditRepository { pool }
    }

    pub async fn list(&self) -> DbResult<Vec<CreditAccount>> {
        let accounts = sqlx::query_as::<_, CreditAccount>(
            "SELECT customer_id, credit_cents FROM credit ORDER BY customer_id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(accounts)
    }

    pub async fn get(&self, customer_id: i64) -> DbResult<Option<CreditAccount>> {
        let account = sqlx::query_as::<_, CreditAccount>(
            "SELECT customer_id, credit_cents FROM credit WHERE customer_id = ?1",
        )
        .bind(customer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Current balance of a customer.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Customer has no credit account
    pub async fn balance(&self, customer_id: i64) -> DbResult<Money> {
        self.get(customer_id)
            .await?
            .map(|account| account.balance())
            .ok_or_else(|| DbError::not_found("Credit account", customer_id))
    }
}
