//! # Repository Module
//!
//! One repository per table. Each owns its SQL.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Console command                                                        │
//! │       │                                                                 │
//! │       │  db.products().update(3, &ProductUpdate::Price(..))            │
//! │       ▼                                                                 │
//! │  ProductRepository                                                      │
//! │  ├── list(&self)                                                        │
//! │  ├── get_by_id(&self, id)                                               │
//! │  ├── insert(&self, &NewProduct)                                         │
//! │  ├── update(&self, id, &ProductUpdate)   ← one fixed statement/field    │
//! │  └── delete(&self, id)                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customers (with their credit/rewards rows)
//! - [`vendor::VendorRepository`] - Vendors
//! - [`product::ProductRepository`] - Products
//! - [`coupon::CouponRepository`] - Coupons
//! - [`credit::CreditRepository`] - Credit balances (read only)
//! - [`rewards::RewardsRepository`] - Reward points
//! - [`transaction::TransactionRepository`] - Transaction log (read only)
//! - [`display::TableRepository`] - Whole-table text dumps

pub mod coupon;
pub mod credit;
pub mod customer;
pub mod display;
pub mod product;
pub mod rewards;
pub mod transaction;
pub mod vendor;
