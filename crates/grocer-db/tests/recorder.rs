//! Integration tests for the transaction recorder.

use std::time::Duration;

use grocer_core::{CoreError, Money, NewCustomer, NewProduct, StockPolicy, TransactionRequest};
use grocer_db::{Database, DbConfig, DbError, RecordError};

/// A store with customer C1 (credit $50.00) and product P1 ($10.00, 20 on hand).
struct Store {
    db: Database,
    customer_id: i64,
    product_id: i64,
}

async fn seed(db: Database) -> Store {
    let customer = db
        .customers()
        .insert(&NewCustomer {
            first_name: "Ana".to_string(),
            last_name: "Alvarez".to_string(),
            email: None,
            phone: None,
            address: None,
        })
        .await
        .unwrap();

    sqlx::query("UPDATE credit SET credit_cents = 5000 WHERE customer_id = ?1")
        .bind(customer.customer_id)
        .execute(db.pool())
        .await
        .unwrap();

    let product = db
        .products()
        .insert(&NewProduct {
            name: "P1".to_string(),
            vendor_id: None,
            price: Money::from_cents(1000),
            quantity: 20,
        })
        .await
        .unwrap();

    Store {
        db,
        customer_id: customer.customer_id,
        product_id: product.product_id,
    }
}

async fn store() -> Store {
    seed(Database::new(DbConfig::in_memory()).await.unwrap()).await
}

impl Store {
    async fn balance(&self) -> Money {
        self.db.credit().balance(self.customer_id).await.unwrap()
    }

    async fn on_hand(&self) -> i64 {
        self.db
            .products()
            .get_by_id(self.product_id)
            .await
            .unwrap()
            .unwrap()
            .quantity
    }

    async fn logged(&self) -> i64 {
        self.db.transactions().count().await.unwrap()
    }

    fn request(&self, kind: &str, quantity: i64) -> TransactionRequest {
        TransactionRequest::new(self.customer_id, self.product_id, kind, quantity)
    }
}

#[tokio::test]
async fn credit_then_cash_purchase() {
    let store = store().await;

    let receipt = store
        .db
        .recorder()
        .record(&store.request("credit", 3))
        .await
        .unwrap();

    assert!(receipt.is_credit());
    assert_eq!(receipt.charged, Some(Money::from_cents(3000)));
    assert_eq!(receipt.credit_balance, Some(Money::from_cents(8000)));
    assert_eq!(receipt.quantity_on_hand, 17);
    assert_eq!(store.balance().await, Money::from_cents(8000));
    assert_eq!(store.on_hand().await, 17);
    assert_eq!(store.logged().await, 1);

    let receipt = store
        .db
        .recorder()
        .record(&store.request("cash", 5))
        .await
        .unwrap();

    assert!(!receipt.is_credit());
    assert_eq!(receipt.credit_balance, None);
    assert_eq!(store.balance().await, Money::from_cents(8000));
    assert_eq!(store.on_hand().await, 12);
    assert_eq!(store.logged().await, 2);

    let log = store
        .db
        .transactions()
        .list_for_customer(store.customer_id)
        .await
        .unwrap();
    assert_eq!(log.len(), 2);
    assert!(log[0].kind().is_credit());
    assert_eq!(log[1].transaction_type, "cash");
    assert_eq!(log[1].quantity, 5);
}

#[tokio::test]
async fn credit_label_ignores_case() {
    for label in ["credit", "Credit", "CREDIT"] {
        let store = store().await;

        store
            .db
            .recorder()
            .record(&store.request(label, 2))
            .await
            .unwrap();

        assert_eq!(store.balance().await, Money::from_cents(7000), "{label}");
        assert_eq!(store.on_hand().await, 18, "{label}");
    }
}

#[tokio::test]
async fn other_labels_leave_credit_alone() {
    for label in ["cash", "CASH", "Cash", "credit card"] {
        let store = store().await;

        let receipt = store
            .db
            .recorder()
            .record(&store.request(label, 4))
            .await
            .unwrap();

        assert_eq!(receipt.charged, None, "{label}");
        assert_eq!(store.balance().await, Money::from_cents(5000), "{label}");
        assert_eq!(store.on_hand().await, 16, "{label}");
        assert_eq!(store.logged().await, 1, "{label}");
    }
}

#[tokio::test]
async fn unknown_product_aborts_without_changes() {
    let store = store().await;
    let request = TransactionRequest::new(store.customer_id, 9999, "credit", 1);

    let err = store.db.recorder().record(&request).await.unwrap_err();

    assert!(matches!(err, RecordError::Aborted(_)), "{err:?}");
    assert!(!err.is_fatal());
    assert_eq!(store.logged().await, 0);
    assert_eq!(store.balance().await, Money::from_cents(5000));
    assert_eq!(store.on_hand().await, 20);
}

#[tokio::test]
async fn repeated_failure_is_identical() {
    let store = store().await;
    let request = TransactionRequest::new(store.customer_id, 9999, "credit", 1);

    let first = store.db.recorder().record(&request).await.unwrap_err();
    let second = store.db.recorder().record(&request).await.unwrap_err();

    assert_eq!(first.to_string(), second.to_string());
    assert_eq!(store.logged().await, 0);
    assert_eq!(store.balance().await, Money::from_cents(5000));
}

#[tokio::test]
async fn unknown_customer_aborts() {
    let store = store().await;
    let request = TransactionRequest::new(9999, store.product_id, "cash", 1);

    let err = store.db.recorder().record(&request).await.unwrap_err();

    assert!(
        matches!(err, RecordError::Aborted(DbError::ForeignKeyViolation { .. })),
        "{err:?}"
    );
    assert_eq!(store.logged().await, 0);
    assert_eq!(store.on_hand().await, 20);
}

#[tokio::test]
async fn missing_credit_account_rolls_back_log_row() {
    let store = store().await;
    sqlx::query("DELETE FROM credit WHERE customer_id = ?1")
        .bind(store.customer_id)
        .execute(store.db.pool())
        .await
        .unwrap();

    let err = store
        .db
        .recorder()
        .record(&store.request("credit", 2))
        .await
        .unwrap_err();

    match err {
        RecordError::Aborted(DbError::NotFound { entity, .. }) => {
            assert_eq!(entity, "Credit account")
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(store.logged().await, 0);
    assert_eq!(store.on_hand().await, 20);
}

#[tokio::test]
async fn out_of_range_quantity_is_rejected() {
    let store = store().await;

    for quantity in [0, -1, 1000] {
        let err = store
            .db
            .recorder()
            .record(&store.request("credit", quantity))
            .await
            .unwrap_err();

        assert!(matches!(err, RecordError::Rejected(_)), "{quantity}: {err:?}");
        assert!(err.cause().is_none());
    }

    assert_eq!(store.logged().await, 0);
    assert_eq!(store.balance().await, Money::from_cents(5000));
    assert_eq!(store.on_hand().await, 20);
}

#[tokio::test]
async fn oversell_is_rejected_by_default() {
    let store = store().await;

    let err = store
        .db
        .recorder()
        .record(&store.request("credit", 21))
        .await
        .unwrap_err();

    match err {
        RecordError::Aborted(DbError::Domain(CoreError::InsufficientStock {
            available,
            requested,
            ..
        })) => {
            assert_eq!(available, 20);
            assert_eq!(requested, 21);
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // The credit charge ran before the stock check and must be undone.
    assert_eq!(store.balance().await, Money::from_cents(5000));
    assert_eq!(store.on_hand().await, 20);
    assert_eq!(store.logged().await, 0);
}

#[tokio::test]
async fn oversell_allowed_when_configured() {
    let store = seed(
        Database::new(DbConfig::in_memory().stock_policy(StockPolicy::AllowNegative))
            .await
            .unwrap(),
    )
    .await;

    let receipt = store
        .db
        .recorder()
        .record(&store.request("cash", 25))
        .await
        .unwrap();

    assert_eq!(receipt.quantity_on_hand, -5);
    assert_eq!(store.on_hand().await, -5);
}

#[tokio::test]
async fn charge_overflow_aborts() {
    let store = store().await;
    let pricey = store
        .db
        .products()
        .insert(&NewProduct {
            name: "Saffron Vault".to_string(),
            vendor_id: None,
            price: Money::from_cents(i64::MAX / 2),
            quantity: 10,
        })
        .await
        .unwrap();

    let request = TransactionRequest::new(store.customer_id, pricey.product_id, "credit", 3);
    let err = store.db.recorder().record(&request).await.unwrap_err();

    assert!(
        matches!(
            err,
            RecordError::Aborted(DbError::Domain(CoreError::AmountOverflow { .. }))
        ),
        "{err:?}"
    );
    assert_eq!(store.balance().await, Money::from_cents(5000));
    assert_eq!(store.logged().await, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_recorders_serialize() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(DbConfig::new(dir.path().join("grocer.db")).max_connections(5))
        .await
        .unwrap();
    let store = seed(db).await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let recorder = store.db.recorder();
        let request = store.request("credit", 2);
        handles.push(tokio::spawn(async move { recorder.record(&request).await }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    // 10 × 2 × $10.00 on top of $50.00
    assert_eq!(store.balance().await, Money::from_cents(25000));
    assert_eq!(store.on_hand().await, 0);
    assert_eq!(store.logged().await, 10);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn rolled_back_price_is_never_charged() {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::new(DbConfig::new(dir.path().join("grocer.db")).max_connections(3))
        .await
        .unwrap();
    let store = seed(db).await;

    // Another writer raises the price but has not committed.
    let mut pending = store.db.pool().begin().await.unwrap();
    sqlx::query("UPDATE products SET price_cents = 99900 WHERE product_id = ?1")
        .bind(store.product_id)
        .execute(&mut *pending)
        .await
        .unwrap();

    let recorder = store.db.recorder();
    let request = store.request("credit", 1);
    let recording = tokio::spawn(async move { recorder.record(&request).await });

    tokio::time::sleep(Duration::from_millis(200)).await;
    pending.rollback().await.unwrap();

    let receipt = recording.await.unwrap().unwrap();
    assert_eq!(receipt.charged, Some(Money::from_cents(1000)));
    assert_eq!(store.balance().await, Money::from_cents(6000));
}
