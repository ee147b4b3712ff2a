//! # Updatable Fields
//!
//! The closed set of columns an operator may change, per table, and the
//! typed value each one carries.
//!
//! ## Flow
//! ```text
//!   "email" ──FromStr──► CustomerField::Email
//!                               │
//!   "ana@shop.com" ──parse──►   ▼
//!                        CustomerUpdate::Email(Some("ana@shop.com"))
//!                               │
//!                               ▼
//!          repository picks the matching fixed UPDATE statement
//! ```
//!
//! A field name that does not parse never reaches the database, so column
//! names are never built from operator text.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    optional_text, parse_date, parse_id, parse_integer, parse_money, validate_coupon_code,
    validate_email, validate_name, validate_optional_text, validate_phone, validate_price,
    validate_stock_level, ValidationResult,
};

/// Normalizes "First Name", "first-name" and "first_name" to one key.
fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Defines a field enum with `ALL`, `name()`, `Display` and `FromStr`.
macro_rules! field_enum {
    ($(#[$meta:meta])* $name:ident, $label:literal { $($variant:ident => $column:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Name shown to, and typed by, the operator.
            pub const fn name(&self) -> &'static str {
                match self {
                    $($name::$variant => $column),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = normalize(s);
                $name::ALL
                    .iter()
                    .copied()
                    .find(|field| field.name() == wanted)
                    .ok_or_else(|| ValidationError::NotAllowed {
                        field: $label.to_string(),
                        allowed: $name::ALL.iter().map(|f| f.name().to_string()).collect(),
                    })
            }
        }
    };
}

field_enum!(
    /// Customer columns that may be edited.
    CustomerField, "customer field" {
        FirstName => "first_name",
        LastName => "last_name",
        Email => "email",
        Phone => "phone",
        Address => "address",
    }
);

field_enum!(
    /// Vendor columns that may be edited.
    VendorField, "vendor field" {
        Name => "name",
        Phone => "phone",
        Email => "email",
        Address => "address",
    }
);

field_enum!(
    /// Product columns that may be edited.
    ProductField, "product field" {
        Name => "name",
        VendorId => "vendor_id",
        Price => "price",
        Quantity => "quantity",
    }
);

field_enum!(
    /// Coupon columns that may be edited.
    CouponField, "coupon field" {
        Code => "code",
        Discount => "discount",
        ExpirationDate => "expiration_date",
    }
);

// =============================================================================
// Customer
// =============================================================================

/// A single validated customer edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerUpdate {
    FirstName(String),
    LastName(String),
    /// `None` clears the column.
    Email(Option<String>),
    Phone(Option<String>),
    Address(Option<String>),
}

impl CustomerUpdate {
    /// Parses and validates the raw console text for `field`.
    ///
    /// An empty answer clears an optional column.
    pub fn parse(field: CustomerField, raw: &str) -> ValidationResult<Self> {
        Ok(match field {
            CustomerField::FirstName => {
                validate_name("first name", raw)?;
                CustomerUpdate::FirstName(raw.trim().to_string())
            }
            CustomerField::LastName => {
                validate_name("last name", raw)?;
                CustomerUpdate::LastName(raw.trim().to_string())
            }
            CustomerField::Email => {
                let email = optional_text(raw);
                if let Some(email) = &email {
                    validate_email(email)?;
                }
                CustomerUpdate::Email(email)
            }
            CustomerField::Phone => {
                let phone = optional_text(raw);
                if let Some(phone) = &phone {
                    validate_phone(phone)?;
                }
                CustomerUpdate::Phone(phone)
            }
            CustomerField::Address => {
                let address = optional_text(raw);
                validate_optional_text("address", address.as_deref())?;
                CustomerUpdate::Address(address)
            }
        })
    }

    pub fn field(&self) -> CustomerField {
        match self {
            CustomerUpdate::FirstName(_) => CustomerField::FirstName,
            CustomerUpdate::LastName(_) => CustomerField::LastName,
            CustomerUpdate::Email(_) => CustomerField::Email,
            CustomerUpdate::Phone(_) => CustomerField::Phone,
            CustomerUpdate::Address(_) => CustomerField::Address,
        }
    }
}

// =============================================================================
// Vendor
// =============================================================================

/// A single validated vendor edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VendorUpdate {
    Name(String),
    Phone(Option<String>),
    Email(Option<String>),
    Address(Option<String>),
}

impl VendorUpdate {
    pub fn parse(field: VendorField, raw: &str) -> ValidationResult<Self> {
        Ok(match field {
            VendorField::Name => {
                validate_name("vendor name", raw)?;
                VendorUpdate::Name(raw.trim().to_string())
            }
            VendorField::Phone => {
                let phone = optional_text(raw);
                if let Some(phone) = &phone {
                    validate_phone(phone)?;
                }
                VendorUpdate::Phone(phone)
            }
            VendorField::Email => {
                let email = optional_text(raw);
                if let Some(email) = &email {
                    validate_email(email)?;
                }
                VendorUpdate::Email(email)
            }
            VendorField::Address => {
                let address = optional_text(raw);
                validate_optional_text("address", address.as_deref())?;
                VendorUpdate::Address(address)
            }
        })
    }

    pub fn field(&self) -> VendorField {
        match self {
            VendorUpdate::Name(_) => VendorField::Name,
            VendorUpdate::Phone(_) => VendorField::Phone,
            VendorUpdate::Email(_) => VendorField::Email,
            VendorUpdate::Address(_) => VendorField::Address,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A single validated product edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductUpdate {
    Name(String),
    /// `None` detaches the product from its vendor.
    VendorId(Option<i64>),
    Price(Money),
    Quantity(i64),
}

impl ProductUpdate {
    pub fn parse(field: ProductField, raw: &str) -> ValidationResult<Self> {
        Ok(match field {
            ProductField::Name => {
                validate_name("product name", raw)?;
                ProductUpdate::Name(raw.trim().to_string())
            }
            ProductField::VendorId => match optional_text(raw) {
                Some(raw) => ProductUpdate::VendorId(Some(parse_id("vendor ID", &raw)?)),
                None => ProductUpdate::VendorId(None),
            },
            ProductField::Price => {
                let price = parse_money("price", raw)?;
                validate_price("price", price)?;
                ProductUpdate::Price(price)
            }
            ProductField::Quantity => {
                let quantity = parse_integer("quantity", raw)?;
                validate_stock_level(quantity)?;
                ProductUpdate::Quantity(quantity)
            }
        })
    }

    pub fn field(&self) -> ProductField {
        match self {
            ProductUpdate::Name(_) => ProductField::Name,
            ProductUpdate::VendorId(_) => ProductField::VendorId,
            ProductUpdate::Price(_) => ProductField::Price,
            ProductUpdate::Quantity(_) => ProductField::Quantity,
        }
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A single validated coupon edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CouponUpdate {
    Code(String),
    Discount(Money),
    ExpirationDate(NaiveDate),
}

impl CouponUpdate {
    pub fn parse(field: CouponField, raw: &str) -> ValidationResult<Self> {
        Ok(match field {
            CouponField::Code => {
                validate_coupon_code(raw)?;
                CouponUpdate::Code(raw.trim().to_string())
            }
            CouponField::Discount => {
                let discount = parse_money("discount", raw)?;
                validate_price("discount", discount)?;
                CouponUpdate::Discount(discount)
            }
            CouponField::ExpirationDate => {
                CouponUpdate::ExpirationDate(parse_date("expiration date", raw)?)
            }
        })
    }

    pub fn field(&self) -> CouponField {
        match self {
            CouponUpdate::Code(_) => CouponField::Code,
            CouponUpdate::Discount(_) => CouponField::Discount,
            CouponUpdate::ExpirationDate(_) => CouponField::ExpirationDate,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_parse_loosely() {
        assert_eq!(
            "first_name".parse::<CustomerField>().unwrap(),
            CustomerField::FirstName
        );
        assert_eq!(
            "First Name".parse::<CustomerField>().unwrap(),
            CustomerField::FirstName
        );
        assert_eq!(
            "vendor-id".parse::<ProductField>().unwrap(),
            ProductField::VendorId
        );
        assert_eq!(
            "EXPIRATION_DATE".parse::<CouponField>().unwrap(),
            CouponField::ExpirationDate
        );
    }

    #[test]
    fn test_unknown_field_lists_allowed() {
        let err = "customer_id".parse::<CustomerField>().unwrap_err();
        match err {
            ValidationError::NotAllowed { field, allowed } => {
                assert_eq!(field, "customer field");
                assert_eq!(allowed.len(), CustomerField::ALL.len());
                assert!(allowed.contains(&"email".to_string()));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!("name; DROP TABLE vendors".parse::<VendorField>().is_err());
    }

    #[test]
    fn test_customer_update_parse() {
        assert_eq!(
            CustomerUpdate::parse(CustomerField::FirstName, " Ana ").unwrap(),
            CustomerUpdate::FirstName("Ana".to_string())
        );
        assert_eq!(
            CustomerUpdate::parse(CustomerField::Email, "").unwrap(),
            CustomerUpdate::Email(None)
        );
        assert!(CustomerUpdate::parse(CustomerField::Email, "not-an-email").is_err());
        assert!(CustomerUpdate::parse(CustomerField::LastName, "").is_err());
    }

    #[test]
    fn test_product_update_parse() {
        assert_eq!(
            ProductUpdate::parse(ProductField::Price, "12.5").unwrap(),
            ProductUpdate::Price(Money::from_cents(1250))
        );
        assert!(ProductUpdate::parse(ProductField::Price, "-1").is_err());
        assert_eq!(
            ProductUpdate::parse(ProductField::VendorId, " ").unwrap(),
            ProductUpdate::VendorId(None)
        );
        assert_eq!(
            ProductUpdate::parse(ProductField::Quantity, "0").unwrap(),
            ProductUpdate::Quantity(0)
        );
        assert!(ProductUpdate::parse(ProductField::Quantity, "-4").is_err());
        assert!(ProductUpdate::parse(ProductField::Quantity, "lots").is_err());
    }

    #[test]
    fn test_coupon_update_parse() {
        let update = CouponUpdate::parse(CouponField::ExpirationDate, "2026-12-31").unwrap();
        assert_eq!(update.field(), CouponField::ExpirationDate);
        assert!(CouponUpdate::parse(CouponField::Code, "A B").is_err());
        assert_eq!(
            CouponUpdate::parse(CouponField::Discount, "$5").unwrap(),
            CouponUpdate::Discount(Money::from_cents(500))
        );
    }

    #[test]
    fn test_vendor_update_roundtrips_field() {
        for field in VendorField::ALL {
            let raw = match field {
                VendorField::Name => "Fresh Farms",
                VendorField::Phone => "555-0100",
                VendorField::Email => "orders@freshfarms.com",
                VendorField::Address => "1 Farm Rd",
            };
            assert_eq!(VendorUpdate::parse(*field, raw).unwrap().field(), *field);
        }
    }
}
