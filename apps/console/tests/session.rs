//! Scripted menu sessions against an in-memory database.

use std::io::Cursor;

use grocer_console::prompt::Prompter;
use grocer_console::run_menu;
use grocer_core::Money;
use grocer_db::{Database, DbConfig};

async fn db() -> Database {
    Database::new(DbConfig::in_memory()).await.unwrap()
}

/// Feeds `lines` to the menu loop and returns everything it printed.
async fn session(db: &Database, lines: &[&str]) -> String {
    let mut script = lines.join("\n");
    script.push('\n');
    session_bytes(db, script.into_bytes()).await
}

async fn session_bytes(db: &Database, script: Vec<u8>) -> String {
    let mut prompt = Prompter::new(Cursor::new(script), Vec::new());
    run_menu(db, &mut prompt).await.unwrap();
    String::from_utf8(prompt.into_output()).unwrap()
}

#[tokio::test]
async fn add_records_then_sell_on_credit() {
    let db = db().await;

    let out = session(
        &db,
        &[
            // 4. Add a customer
            "4", "Ana", "Alvarez", "ana@example.com", "", "",
            // 6. Add a product, registering its vendor on the way
            "6", "Rolled Oats", "N", "Pantry Wholesale", "", "", "", "1", "4.49", "10",
            // 1. Make a transaction
            "1", "Y", "1", "1", "Credit", "3",
            // 2. Display records
            "2", "credit",
        ],
    )
    .await;

    assert!(out.contains("✓ Customer added: #1 Ana Alvarez"), "{out}");
    assert!(out.contains("Vendor added: #1 Pantry Wholesale"), "{out}");
    assert!(out.contains("✓ Product added: #1 Rolled Oats at $4.49"), "{out}");
    assert!(out.contains("charged to credit $13.47"), "{out}");
    assert!(out.contains("7 left on hand"), "{out}");
    assert!(out.contains("✓ Transaction #1 recorded"), "{out}");
    assert!(out.contains("✓ Credit displayed"), "{out}");

    assert_eq!(db.credit().balance(1).await.unwrap(), Money::from_cents(1347));
    assert_eq!(db.products().get_by_id(1).await.unwrap().unwrap().quantity, 7);
}

#[tokio::test]
async fn bad_input_reprompts_and_failures_keep_looping() {
    let db = db().await;

    let out = session(
        &db,
        &[
            "abc",
            "0",
            // 12. Delete a customer that does not exist
            "12", "x", "99",
            // 16. Quit
            "16",
        ],
    )
    .await;

    assert_eq!(out.matches("choice must be between 1 and 16").count(), 2, "{out}");
    assert!(out.contains("customer ID has invalid format"), "{out}");
    assert!(out.contains("✗ Customer not found: 99"), "{out}");
    assert!(out.trim_end().ends_with("Goodbye"), "{out}");
}

#[tokio::test]
async fn unknown_update_field_is_asked_again() {
    let db = db().await;

    let out = session(
        &db,
        &[
            "4", "Ben", "Brooks", "", "", "",
            // 8. Update a customer
            "8", "1", "customer_id", "Email", "ben@shop.example.com",
        ],
    )
    .await;

    assert!(out.contains("customer field must be one of"), "{out}");
    assert!(out.contains("✓ Customer 1 updated: email"), "{out}");

    let stored = db.customers().get_by_id(1).await.unwrap().unwrap();
    assert_eq!(stored.email.as_deref(), Some("ben@shop.example.com"));
}

#[tokio::test]
async fn oversell_is_reported_and_nothing_changes() {
    let db = db().await;

    let out = session(
        &db,
        &[
            "4", "Chloe", "Chen", "", "", "",
            "6", "Croissant", "N", "Sunrise Bakery", "", "", "", "", "1.99", "2",
            "1", "Y", "1", "1", "cash", "5",
        ],
    )
    .await;

    assert!(
        out.contains("✗ Transaction not recorded: Not enough stock for product 1: 2 available, 5 requested"),
        "{out}"
    );
    assert_eq!(db.transactions().count().await.unwrap(), 0);
    assert_eq!(db.products().get_by_id(1).await.unwrap().unwrap().quantity, 2);
}

#[tokio::test]
async fn rewards_and_coupons() {
    let db = db().await;

    let out = session(
        &db,
        &[
            "4", "Dev", "Dubois", "", "", "",
            // 3. Update rewards points
            "3", "1", "0", "25",
            // 7. Add a coupon, then drop it
            "7", "WELCOME5", "5", "2020-01-31",
            "15", "1",
        ],
    )
    .await;

    assert!(out.contains("points must be positive"), "{out}");
    assert!(out.contains("✓ Rewards points updated: customer 1 now has 25 points"), "{out}");
    assert!(
        out.contains("✓ Coupon added: #1 WELCOME5 for $5.00 until 2020-01-31 (already expired)"),
        "{out}"
    );
    assert!(out.contains("✓ Coupon 1 deleted"), "{out}");
    assert_eq!(db.coupons().count().await.unwrap(), 0);
}

#[tokio::test]
async fn latin1_name_is_asked_again_and_the_menu_keeps_going() {
    let db = db().await;

    let out = session_bytes(&db, b"4\nJos\xe9\nAna\nAlvarez\n\n\n\n16\n".to_vec()).await;

    assert!(out.contains("Input is not valid UTF-8 text"), "{out}");
    assert!(out.contains("✓ Customer added: #1 Ana Alvarez"), "{out}");
    assert!(out.trim_end().ends_with("Goodbye"), "{out}");
    assert_eq!(db.customers().count().await.unwrap(), 1);
}
