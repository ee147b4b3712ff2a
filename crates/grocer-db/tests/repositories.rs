//! Integration tests for the per-table repositories.

use chrono::NaiveDate;
use grocer_core::{
    CouponField, CouponUpdate, CoreError, CustomerField, CustomerUpdate, Money, NewCoupon,
    NewCustomer, NewProduct, NewVendor, ProductUpdate, Table, TransactionRequest, VendorUpdate,
};
use grocer_db::{Database, DbConfig, DbError};

async fn db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

fn new_customer(first: &str, last: &str) -> NewCustomer {
    NewCustomer {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: Some(format!("{}@example.com", first.to_lowercase())),
        phone: None,
        address: None,
    }
}

fn new_product(name: &str, vendor_id: Option<i64>, cents: i64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        vendor_id,
        price: Money::from_cents(cents),
        quantity: 10,
    }
}

// =============================================================================
// Customers
// =============================================================================

#[tokio::test]
async fn customer_insert_opens_accounts() {
    let db = db().await;

    let customer = db
        .customers()
        .insert(&new_customer("Ana", "Alvarez"))
        .await
        .unwrap();

    assert!(customer.customer_id > 0);
    assert_eq!(customer.full_name(), "Ana Alvarez");
    assert_eq!(
        db.credit().balance(customer.customer_id).await.unwrap(),
        Money::zero()
    );
    assert_eq!(
        db.rewards()
            .get(customer.customer_id)
            .await
            .unwrap()
            .map(|r| r.points),
        Some(0)
    );
}

#[tokio::test]
async fn customer_insert_validates() {
    let db = db().await;

    let err = db
        .customers()
        .insert(&new_customer("", "Alvarez"))
        .await
        .unwrap_err();

    assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    assert_eq!(db.customers().count().await.unwrap(), 0);
}

#[tokio::test]
async fn customer_field_update() {
    let db = db().await;
    let customer = db
        .customers()
        .insert(&new_customer("Ben", "Brooks"))
        .await
        .unwrap();

    let field: CustomerField = "Email".parse().unwrap();
    let update = CustomerUpdate::parse(field, "ben@shop.example.com").unwrap();
    db.customers()
        .update(customer.customer_id, &update)
        .await
        .unwrap();

    let clear = CustomerUpdate::parse(CustomerField::Phone, "").unwrap();
    db.customers()
        .update(customer.customer_id, &clear)
        .await
        .unwrap();

    let stored = db
        .customers()
        .get_by_id(customer.customer_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.email.as_deref(), Some("ben@shop.example.com"));
    assert_eq!(stored.phone, None);

    let err = db
        .customers()
        .update(9999, &CustomerUpdate::LastName("Nobody".to_string()))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn unknown_field_names_are_rejected() {
    assert!("customer_id".parse::<CustomerField>().is_err());
    assert!("credit_cents".parse::<CouponField>().is_err());
    assert!("email = 'x' --".parse::<CustomerField>().is_err());
}

#[tokio::test]
async fn customer_delete_cascades_to_accounts() {
    let db = db().await;
    let customer = db
        .customers()
        .insert(&new_customer("Chloe", "Chen"))
        .await
        .unwrap();

    db.customers().delete(customer.customer_id).await.unwrap();

    assert!(db.credit().get(customer.customer_id).await.unwrap().is_none());
    assert!(db.rewards().get(customer.customer_id).await.unwrap().is_none());
    assert!(db
        .customers()
        .delete(customer.customer_id)
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn customer_with_transactions_cannot_be_deleted() {
    let db = db().await;
    let customer = db
        .customers()
        .insert(&new_customer("Dev", "Dubois"))
        .await
        .unwrap();
    let product = db
        .products()
        .insert(&new_product("Bananas", None, 69))
        .await
        .unwrap();
    db.recorder()
        .record(&TransactionRequest::new(
            customer.customer_id,
            product.product_id,
            "cash",
            1,
        ))
        .await
        .unwrap();

    let err = db.customers().delete(customer.customer_id).await.unwrap_err();
    assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "{err:?}");

    let err = db.products().delete(product.product_id).await.unwrap_err();
    assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "{err:?}");
}

// =============================================================================
// Vendors & Products
// =============================================================================

#[tokio::test]
async fn vendor_crud_and_product_link() {
    let db = db().await;
    let vendor = db
        .vendors()
        .insert(&NewVendor {
            name: "Green Valley Dairy".to_string(),
            phone: Some("555-0101".to_string()),
            email: None,
            address: None,
        })
        .await
        .unwrap();

    db.vendors()
        .update(vendor.vendor_id, &VendorUpdate::Name("Green Valley Farms".to_string()))
        .await
        .unwrap();
    let stored = db.vendors().get_by_id(vendor.vendor_id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Green Valley Farms");

    let milk = db
        .products()
        .insert(&new_product("Whole Milk", Some(vendor.vendor_id), 429))
        .await
        .unwrap();
    assert_eq!(
        db.products()
            .list_by_vendor(vendor.vendor_id)
            .await
            .unwrap()
            .len(),
        1
    );

    db.vendors().delete(vendor.vendor_id).await.unwrap();

    let orphan = db.products().get_by_id(milk.product_id).await.unwrap().unwrap();
    assert_eq!(orphan.vendor_id, None);
    assert!(db
        .vendors()
        .delete(vendor.vendor_id)
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn product_field_updates() {
    let db = db().await;
    let product = db
        .products()
        .insert(&new_product("Sourdough", None, 549))
        .await
        .unwrap();

    db.products()
        .update(product.product_id, &ProductUpdate::Price(Money::from_cents(599)))
        .await
        .unwrap();
    db.products()
        .update(product.product_id, &ProductUpdate::Quantity(42))
        .await
        .unwrap();

    let stored = db
        .products()
        .get_by_id(product.product_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.price(), Money::from_cents(599));
    assert_eq!(stored.quantity, 42);

    let err = db
        .products()
        .update(product.product_id, &ProductUpdate::VendorId(Some(9999)))
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "{err:?}");

    let err = db
        .products()
        .update(9999, &ProductUpdate::Name("Rye".to_string()))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

// =============================================================================
// Coupons
// =============================================================================

#[tokio::test]
async fn coupon_crud() {
    let db = db().await;
    let expires = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
    let coupon = db
        .coupons()
        .insert(&NewCoupon {
            code: "WELCOME5".to_string(),
            discount: Money::from_cents(500),
            expiration_date: expires,
        })
        .await
        .unwrap();
    assert_eq!(coupon.expiration_date, expires);

    let err = db
        .coupons()
        .insert(&NewCoupon {
            code: "WELCOME5".to_string(),
            discount: Money::from_cents(100),
            expiration_date: expires,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::UniqueViolation { .. }), "{err:?}");

    let update = CouponUpdate::parse(CouponField::ExpirationDate, "2027-01-15").unwrap();
    db.coupons().update(coupon.coupon_id, &update).await.unwrap();

    let stored = db.coupons().get_by_code("welcome5").await.unwrap().unwrap();
    assert_eq!(
        stored.expiration_date,
        NaiveDate::from_ymd_opt(2027, 1, 15).unwrap()
    );

    db.coupons().delete(coupon.coupon_id).await.unwrap();
    assert_eq!(db.coupons().count().await.unwrap(), 0);
}

// =============================================================================
// Rewards
// =============================================================================

#[tokio::test]
async fn rewards_points_upsert() {
    let db = db().await;
    let customer = db
        .customers()
        .insert(&new_customer("Elena", "Okafor"))
        .await
        .unwrap();
    let id = customer.customer_id;

    assert_eq!(db.rewards().add_points(id, 10).await.unwrap().points, 10);
    assert_eq!(db.rewards().add_points(id, 5).await.unwrap().points, 15);

    sqlx::query("DELETE FROM rewards WHERE customer_id = ?1")
        .bind(id)
        .execute(db.pool())
        .await
        .unwrap();
    assert_eq!(db.rewards().add_points(id, 7).await.unwrap().points, 7);

    let err = db.rewards().add_points(id, 0).await.unwrap_err();
    assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));

    let err = db.rewards().add_points(9999, 3).await.unwrap_err();
    assert!(matches!(err, DbError::ForeignKeyViolation { .. }), "{err:?}");
}

// =============================================================================
// Display
// =============================================================================

#[tokio::test]
async fn every_table_dumps() {
    let db = db().await;
    db.customers()
        .insert(&new_customer("Farid", "Patel"))
        .await
        .unwrap();
    db.products()
        .insert(&new_product("Rolled Oats", None, 449))
        .await
        .unwrap();

    for table in Table::ALL {
        let dump = db.tables().dump(table).await.unwrap();
        assert_eq!(dump.table, table);
        for row in &dump.rows {
            assert_eq!(row.len(), dump.columns.len(), "{table}");
        }
    }

    let products = db.tables().dump("products".parse().unwrap()).await.unwrap();
    assert_eq!(
        products.columns,
        vec!["product_id", "name", "vendor_id", "price", "quantity"]
    );
    assert_eq!(products.rows[0][1], "Rolled Oats");
    assert_eq!(products.rows[0][2], "");
    assert_eq!(products.rows[0][3], "$4.49");

    let credit = db.tables().dump(Table::Credit).await.unwrap();
    assert_eq!(credit.rows.len(), 1);
    assert_eq!(credit.rows[0][1], "$0.00");

    assert!(db.tables().dump(Table::Transactions).await.unwrap().is_empty());
}
