//! # Seed Data Generator
//!
//! Populates a database with a small grocery for local development.
//!
//! ## Usage
//! ```bash
//! # Seed ./grocer_dev.db
//! cargo run -p grocer-db --bin seed
//!
//! # Specify database path and customer count
//! cargo run -p grocer-db --bin seed -- --db ./data/grocer.db --customers 40
//! ```
//!
//! ## Generated Data
//! - One vendor per department, each supplying a shelf of products
//! - Customers with generated names (every one gets credit and rewards rows)
//! - A few coupons, one already expired
//! - A handful of recorded purchases, half of them on credit

use chrono::{Days, Utc};
use grocer_core::{Money, NewCoupon, NewCustomer, NewProduct, NewVendor, TransactionRequest};
use grocer_db::{Database, DbConfig};
use std::env;

/// Vendors and the products they supply: (name, price in cents).
const VENDORS: &[(&str, &str, &[(&str, i64)])] = &[
    (
        "Green Valley Dairy",
        "555-0101",
        &[
            ("Whole Milk 1gal", 429),
            ("2% Milk 1gal", 419),
            ("Cheddar Cheese 8oz", 349),
            ("Greek Yogurt", 129),
            ("Butter 1lb", 479),
            ("Eggs Dozen", 389),
        ],
    ),
    (
        "Sunrise Bakery",
        "555-0102",
        &[
            ("Sourdough Loaf", 549),
            ("Whole Wheat Bread", 379),
            ("Bagels 6ct", 449),
            ("Croissant", 199),
        ],
    ),
    (
        "Hillside Produce",
        "555-0103",
        &[
            ("Bananas 1lb", 69),
            ("Gala Apples 1lb", 179),
            ("Baby Spinach", 399),
            ("Roma Tomatoes 1lb", 149),
            ("Yellow Onions 3lb", 329),
            ("Russet Potatoes 5lb", 499),
        ],
    ),
    (
        "Pantry Wholesale",
        "555-0104",
        &[
            ("Spaghetti 1lb", 159),
            ("Long Grain Rice 2lb", 289),
            ("Canned Tomatoes", 129),
            ("Peanut Butter", 369),
            ("Rolled Oats", 449),
            ("Olive Oil 500ml", 899),
        ],
    ),
];

const FIRST_NAMES: &[&str] = &[
    "Ana", "Ben", "Chloe", "Dev", "Elena", "Farid", "Grace", "Hiro", "Iris", "Jonah",
];
const LAST_NAMES: &[&str] = &[
    "Alvarez", "Brooks", "Chen", "Dubois", "Okafor", "Patel", "Reyes", "Schmidt",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut customers: usize = 12;
    let mut db_path = String::from("./grocer_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--customers" | "-c" => {
                if i + 1 < args.len() {
                    customers = args[i + 1].parse().unwrap_or(customers);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Grocer Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --customers <N>  Number of customers to generate (default: 12)");
                println!("  -d, --db <PATH>      Database file path (default: ./grocer_dev.db)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Grocer Seed Data Generator");
    println!("=============================");
    println!("Database:  {}", db_path);
    println!("Customers: {}", customers);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Vendors and their products
    let mut product_ids = Vec::new();
    for (idx, (name, phone, shelf)) in VENDORS.iter().enumerate() {
        let vendor = db
            .vendors()
            .insert(&NewVendor {
                name: name.to_string(),
                phone: Some(phone.to_string()),
                email: Some(format!("orders{}@vendors.example.com", idx + 1)),
                address: None,
            })
            .await?;

        for (seq, (product, price_cents)) in shelf.iter().enumerate() {
            let stored = db
                .products()
                .insert(&NewProduct {
                    name: product.to_string(),
                    vendor_id: Some(vendor.vendor_id),
                    price: Money::from_cents(*price_cents),
                    quantity: 20 + ((idx * 7 + seq * 13) % 60) as i64,
                })
                .await?;
            product_ids.push(stored.product_id);
        }
    }
    println!("✓ {} vendors, {} products", VENDORS.len(), product_ids.len());

    // Customers
    let mut customer_ids = Vec::with_capacity(customers);
    for n in 0..customers {
        let first = FIRST_NAMES[n % FIRST_NAMES.len()];
        let last = LAST_NAMES[(n * 3) % LAST_NAMES.len()];
        let customer = db
            .customers()
            .insert(&NewCustomer {
                first_name: first.to_string(),
                last_name: last.to_string(),
                email: Some(format!(
                    "{}.{}{}@mail.example.com",
                    first.to_lowercase(),
                    last.to_lowercase(),
                    n
                )),
                phone: Some(format!("555-{:04}", 1000 + n)),
                address: None,
            })
            .await?;
        customer_ids.push(customer.customer_id);
    }
    println!("✓ {} customers", customer_ids.len());

    // Coupons
    let today = Utc::now().date_naive();
    let coupons = [
        ("WELCOME5", 500, today.checked_add_days(Days::new(90))),
        ("DAIRY1", 100, today.checked_add_days(Days::new(30))),
        ("SPRING10", 1000, today.checked_sub_days(Days::new(10))),
    ];
    for (code, discount, expiration) in coupons {
        let Some(expiration_date) = expiration else {
            continue;
        };
        db.coupons()
            .insert(&NewCoupon {
                code: code.to_string(),
                discount: Money::from_cents(discount),
                expiration_date,
            })
            .await?;
    }
    println!("✓ {} coupons", db.coupons().count().await?);

    // A few purchases
    let recorder = db.recorder();
    let mut recorded = 0;
    for (n, customer_id) in customer_ids.iter().enumerate().take(8) {
        let product_id = product_ids[(n * 5) % product_ids.len()];
        let kind = if n % 2 == 0 { "credit" } else { "cash" };
        let request = TransactionRequest::new(*customer_id, product_id, kind, 1 + (n % 3) as i64);

        match recorder.record(&request).await {
            Ok(_) => recorded += 1,
            Err(e) => eprintln!("Failed to record purchase for customer {}: {}", customer_id, e),
        }
    }
    println!("✓ {} transactions recorded", recorded);

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
