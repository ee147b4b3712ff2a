//! # Console Error Type
//!
//! Unified error type for menu commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Console                            │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  Result<String, CliError>                                               │
//! │         │                                                               │
//! │         ├── ValidationError ────────┐                                   │
//! │         ├── CoreError ──────────────┤                                   │
//! │         ├── DbError ────────────────┼──► CliError ──► "✗ message"       │
//! │         ├── RecordError ────────────┤         │                         │
//! │         └── PromptError ────────────┘         │                         │
//! │                                               ▼                         │
//! │                             InputClosed / Console ──► leave the loop    │
//! │                             everything else      ──► back to the menu   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal details (SQL text, sqlx messages) are logged with `tracing`;
//! the operator sees a short message.

use grocer_core::{CoreError, ValidationError};
use grocer_db::{DbError, RecordError};
use serde::Serialize;

use crate::prompt::PromptError;

/// Error returned from a menu command.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Row does not exist
    NotFound,

    /// Input failed validation
    ValidationError,

    /// Duplicate value or dangling reference
    Conflict,

    /// Not enough quantity on hand
    InsufficientStock,

    /// Database operation failed
    DatabaseError,

    /// Commit or rollback failed; the store needs a look
    Fatal,

    /// stdin reached end of file
    InputClosed,

    /// Reading stdin or writing stdout failed
    Console,

    /// Internal error
    Internal,
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        CliError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CliError::new(ErrorCode::Internal, message)
    }

    /// True when the menu loop cannot go on reading commands.
    pub fn ends_session(&self) -> bool {
        matches!(self.code, ErrorCode::InputClosed | ErrorCode::Console)
    }
}

impl From<DbError> for CliError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => CliError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => CliError::new(
                ErrorCode::Conflict,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::debug!("Foreign key violation: {}", message);
                CliError::new(
                    ErrorCode::Conflict,
                    "Invalid reference: the row is missing or still in use",
                )
            }
            DbError::CheckViolation { message } => {
                tracing::debug!("Check constraint violation: {}", message);
                CliError::validation("Value out of range")
            }
            DbError::Domain(err) => err.into(),
            DbError::ConnectionFailed(_) => {
                CliError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                CliError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                CliError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                CliError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                CliError::new(ErrorCode::DatabaseError, "Database is busy, try again")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                CliError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientStock {
                product_id,
                available,
                requested,
            } => CliError::new(
                ErrorCode::InsufficientStock,
                format!(
                    "Not enough stock for product {}: {} available, {} requested",
                    product_id, available, requested
                ),
            ),
            CoreError::AmountOverflow { price, quantity } => CliError::validation(format!(
                "{} x {} is too large to charge",
                quantity, price
            )),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        CliError::validation(err.to_string())
    }
}

/// Transaction outcomes.
///
/// A plain abort reads as its cause. Commit and rollback failures are
/// marked fatal so the operator knows the store needs attention.
impl From<RecordError> for CliError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::Rejected(e) => e.into(),
            RecordError::Aborted(cause) => {
                let inner = CliError::from(cause);
                CliError::new(
                    inner.code,
                    format!("Transaction not recorded: {}", inner.message),
                )
            }
            err @ (RecordError::CommitFailed(_) | RecordError::RollbackFailed { .. }) => {
                tracing::error!(error = %err, "Transaction left the store unverified");
                CliError::new(
                    ErrorCode::Fatal,
                    "Transaction outcome unknown: the store could not commit or roll back. Check the database before continuing",
                )
            }
        }
    }
}

impl From<PromptError> for CliError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Closed => CliError::new(ErrorCode::InputClosed, "Input closed"),
            PromptError::Io(e) => {
                CliError::new(ErrorCode::Console, format!("Console I/O failed: {}", e))
            }
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for menu commands.
pub type CliResult<T> = Result<T, CliError>;
