//! # grocer-db: Database Layer for Grocer
//!
//! Storage access for the store's tables and the one composite operation,
//! recording a purchase.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Grocer Data Flow                                 │
//! │                                                                         │
//! │  Console menu choice ("1. Make a transaction")                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     grocer-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (one/table)  │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CustomerRepo  │    │ 001_init.sql │  │   │
//! │  │   │               │    │ ProductRepo   │    │              │  │   │
//! │  │   │               │◄───│ Transaction-  │    │              │  │   │
//! │  │   │               │    │  Recorder     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (grocer.db)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per table
//! - [`recorder`] - Atomic purchase recording
//!
//! ## Usage
//!
//! ```rust,ignore
//! use grocer_core::TransactionRequest;
//! use grocer_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("grocer.db")).await?;
//!
//! let receipt = db
//!     .recorder()
//!     .record(&TransactionRequest::new(1, 1, "credit", 3))
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod recorder;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use recorder::{RecordError, TransactionReceipt, TransactionRecorder};

// Repository re-exports for convenience
pub use repository::coupon::CouponRepository;
pub use repository::credit::CreditRepository;
pub use repository::customer::CustomerRepository;
pub use repository::display::{TableDump, TableRepository};
pub use repository::product::ProductRepository;
pub use repository::rewards::RewardsRepository;
pub use repository::transaction::TransactionRepository;
pub use repository::vendor::VendorRepository;
