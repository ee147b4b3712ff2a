//! # Transaction Recorder
//!
//! Records a purchase: one log row, an optional credit charge and a stock
//! decrement, committed together or not at all.
//!
//! ## Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  record(customer, product, kind, quantity)                              │
//! │       │                                                                 │
//! │       ├── quantity outside 1..=999 ──────────────► Rejected (no I/O)    │
//! │       ▼                                                                 │
//! │  acquire session ─► BEGIN                                               │
//! │       │                                                                 │
//! │       │  1. INSERT INTO transactions ...         (takes the write lock) │
//! │       │  2. kind == "credit" (any case)?                                │
//! │       │       SELECT price_cents ...             no row → NotFound      │
//! │       │       amount = price × quantity          overflow → abort       │
//! │       │       UPDATE credit ... RETURNING        no row → NotFound      │
//! │       │  3. UPDATE products SET quantity - n     no row → NotFound /    │
//! │       │                                           InsufficientStock     │
//! │       ▼                                                                 │
//! │  COMMIT ──────────────────────────────────────────► Ok(receipt)         │
//! │                                                                         │
//! │  any step fails ─► ROLLBACK ─ ok ─────────────────► Aborted(cause)      │
//! │                            └─ fails ─► close session ► RollbackFailed   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Isolation
//! The first statement of the unit is a write, so SQLite hands this unit
//! the database write lock before the price is read. Other writers (other
//! recorders, price edits) wait on `busy_timeout` until this unit ends, so
//! the price read is always the committed one and never changes between
//! the read and the charge.

use grocer_core::validation::validate_quantity;
use grocer_core::{
    CoreError, Money, StockPolicy, TransactionKind, TransactionRequest, ValidationError,
};
use serde::Serialize;
use sqlx::{Connection, SqliteConnection, SqlitePool};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::error::{DbError, DbResult};

// =============================================================================
// Outcome Types
// =============================================================================

/// What a successful recording changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionReceipt {
    /// Storage-assigned id of the new log row.
    pub transaction_id: i64,
    pub customer_id: i64,
    pub product_id: i64,
    pub kind: TransactionKind,
    pub quantity: i64,
    /// Amount added to the customer's credit, for credit purchases only.
    pub charged: Option<Money>,
    /// Credit balance after the charge, for credit purchases only.
    pub credit_balance: Option<Money>,
    /// Product quantity on hand after the decrement.
    pub quantity_on_hand: i64,
}

impl TransactionReceipt {
    /// True when the purchase went on the customer's credit.
    pub fn is_credit(&self) -> bool {
        self.charged.is_some()
    }
}

/// Why a recording did not happen.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Refused before touching storage.
    #[error("Transaction rejected: {0}")]
    Rejected(#[source] ValidationError),

    /// A step failed and the unit of work was rolled back. Nothing changed.
    #[error("Transaction aborted, nothing was recorded: {0}")]
    Aborted(#[source] DbError),

    /// Every step succeeded but COMMIT did not.
    #[error("Commit failed: {0}")]
    CommitFailed(#[source] DbError),

    /// A step failed and so did the rollback. The session was discarded.
    #[error("Rollback failed after error ({cause}): {rollback}")]
    RollbackFailed { cause: DbError, rollback: DbError },
}

impl RecordError {
    /// True when the store may be in a state the operator should look at.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RecordError::CommitFailed(_) | RecordError::RollbackFailed { .. }
        )
    }

    /// The step failure behind this outcome, if storage was reached.
    pub fn cause(&self) -> Option<&DbError> {
        match self {
            RecordError::Rejected(_) => None,
            RecordError::Aborted(cause)
            | RecordError::CommitFailed(cause)
            | RecordError::RollbackFailed { cause, .. } => Some(cause),
        }
    }
}

// =============================================================================
// Recorder
// =============================================================================

/// Records purchases atomically.
///
/// ## Usage
/// ```rust,ignore
/// let recorder = TransactionRecorder::new(pool).stock_policy(StockPolicy::AllowNegative);
/// let receipt = recorder
///     .record(&TransactionRequest::new(1, 1, "Credit", 3))
///     .await?;
/// assert!(receipt.is_credit());
/// ```
#[derive(Debug, Clone)]
pub struct TransactionRecorder {
    pool: SqlitePool,
    stock_policy: StockPolicy,
}

impl TransactionRecorder {
    /// Creates a recorder that rejects overselling.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRecorder {
            pool,
            stock_policy: StockPolicy::default(),
        }
    }

    /// Sets what happens when a sale would take stock below zero.
    pub fn stock_policy(mut self, policy: StockPolicy) -> Self {
        self.stock_policy = policy;
        self
    }

    /// Records one purchase.
    ///
    /// ## Returns
    /// * `Ok(TransactionReceipt)` - Log row, charge and decrement committed
    /// * `Err(RecordError::Rejected)` - Quantity out of range, no I/O done
    /// * `Err(RecordError::Aborted)` - A step failed, nothing persisted
    /// * `Err(RecordError::RollbackFailed)` - A step failed and the rollback too
    pub async fn record(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionReceipt, RecordError> {
        validate_quantity(request.quantity).map_err(RecordError::Rejected)?;

        debug!(
            customer_id = request.customer_id,
            product_id = request.product_id,
            kind = %request.kind,
            quantity = request.quantity,
            "Recording transaction"
        );

        // The session is owned by this call and goes back to the pool on
        // drop, unless it is closed below.
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| RecordError::Aborted(e.into()))?;

        let mut tx = Connection::begin(&mut *conn)
            .await
            .map_err(|e| RecordError::Aborted(e.into()))?;

        let applied = self.apply(&mut tx, request).await;

        match applied {
            Ok(receipt) => {
                tx.commit()
                    .await
                    .map_err(|e| RecordError::CommitFailed(e.into()))?;

                info!(
                    transaction_id = receipt.transaction_id,
                    customer_id = receipt.customer_id,
                    product_id = receipt.product_id,
                    charged = ?receipt.charged.map(|m| m.cents()),
                    quantity_on_hand = receipt.quantity_on_hand,
                    "Transaction recorded"
                );
                Ok(receipt)
            }
            Err(cause) => {
                let rolled_back = tx.rollback().await;

                match rolled_back {
                    Ok(()) => {
                        warn!(error = %cause, "Transaction aborted and rolled back");
                        Err(RecordError::Aborted(cause))
                    }
                    Err(rollback) => {
                        let rollback = DbError::from(rollback);
                        error!(error = %cause, rollback_error = %rollback, "Rollback failed");

                        // The session may still hold an open transaction; it
                        // must not go back to the pool.
                        if let Err(close) = conn.close().await {
                            warn!(error = %close, "Failed to close session after rollback failure");
                        }

                        Err(RecordError::RollbackFailed { cause, rollback })
                    }
                }
            }
        }
    }

    /// The three data steps, run on the caller's open transaction.
    async fn apply(
        &self,
        conn: &mut SqliteConnection,
        request: &TransactionRequest,
    ) -> DbResult<TransactionReceipt> {
        let customer_id = request.customer_id;
        let product_id = request.product_id;
        let quantity = request.quantity;

        // 1. Log row. Unknown customer or product fails here on the FK.
        let transaction_id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO transactions (customer_id, product_id, transaction_type, quantity)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING transaction_id
            "#,
        )
        .bind(customer_id)
        .bind(product_id)
        .bind(request.kind.as_str())
        .bind(quantity)
        .fetch_one(&mut *conn)
        .await?;

        // 2. Credit charge at the price visible inside this unit.
        let (charged, credit_balance) = if request.kind.is_credit() {
            let price_cents: i64 =
                sqlx::query_scalar("SELECT price_cents FROM products WHERE product_id = ?1")
                    .bind(product_id)
                    .fetch_optional(&mut *conn)
                    .await?
                    .ok_or_else(|| DbError::not_found("Product", product_id))?;

            let price = Money::from_cents(price_cents);
            let amount =
                price
                    .checked_mul_quantity(quantity)
                    .ok_or_else(|| CoreError::AmountOverflow {
                        price: price.to_string(),
                        quantity,
                    })?;

            let balance: i64 = sqlx::query_scalar(
                r#"
                UPDATE credit
                SET credit_cents = credit_cents + ?2
                WHERE customer_id = ?1
                RETURNING credit_cents
                "#,
            )
            .bind(customer_id)
            .bind(amount.cents())
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| DbError::not_found("Credit account", customer_id))?;

            (Some(amount), Some(Money::from_cents(balance)))
        } else {
            (None, None)
        };

        // 3. Stock decrement. The oversell guard is part of the statement.
        let on_hand: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE products
            SET quantity = quantity - ?2
            WHERE product_id = ?1 AND (?3 OR quantity >= ?2)
            RETURNING quantity
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .bind(self.stock_policy.allows_negative())
        .fetch_optional(&mut *conn)
        .await?;

        let quantity_on_hand = match on_hand {
            Some(on_hand) => on_hand,
            None => {
                let available: Option<i64> =
                    sqlx::query_scalar("SELECT quantity FROM products WHERE product_id = ?1")
                        .bind(product_id)
                        .fetch_optional(&mut *conn)
                        .await?;

                return Err(match available {
                    Some(available) => CoreError::InsufficientStock {
                        product_id,
                        available,
                        requested: quantity,
                    }
                    .into(),
                    None => DbError::not_found("Product", product_id),
                });
            }
        };

        Ok(TransactionReceipt {
            transaction_id,
            customer_id,
            product_id,
            kind: request.kind.clone(),
            quantity,
            charged,
            credit_balance,
            quantity_on_hand,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
