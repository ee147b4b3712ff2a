//! # grocer-core: Pure Domain Logic for Grocer
//!
//! Everything the store and the console agree on lives here: the row
//! types, integer money, the closed sets of updatable fields, and input
//! validation. Nothing in this crate touches a database or a terminal.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Grocer Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 apps/console (menu loop)                        │   │
//! │  │   prompt ──► parse ──► validate ──► repository / recorder      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ grocer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  fields   │  │ validation│  │   │
//! │  │   │ Customer  │  │   Money   │  │ *Field    │  │   rules   │  │   │
//! │  │   │ Product   │  │  (cents)  │  │ *Update   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    grocer-db (Database Layer)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Row types (Customer, Product, TransactionRecord, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`fields`] - Updatable fields per table and their typed values
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use grocer_core::{Money, TransactionKind};
//!
//! let price: Money = "10.00".parse().unwrap();
//! let kind = TransactionKind::new("Credit");
//!
//! assert!(kind.is_credit());
//! assert_eq!(price.checked_mul_quantity(3), Some(Money::from_cents(3000)));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fields;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use fields::{
    CouponField, CouponUpdate, CustomerField, CustomerUpdate, ProductField, ProductUpdate,
    VendorField, VendorUpdate,
};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// The only transaction label with behavior attached.
///
/// Compared case-insensitively; anything else is a non-credit sale.
pub const CREDIT_KIND: &str = "credit";

/// Maximum quantity accepted for a single recorded transaction.
///
/// ## Business Reason
/// Catches typos at the console (1000 instead of 10) before they hit stock.
pub const MAX_ITEM_QUANTITY: i64 = 999;
