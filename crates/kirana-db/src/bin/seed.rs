//! # Seed Data Generator
//!
//! Populates a fresh database with the demo shop catalog and a week of
//! demo sales for dashboard development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p kirana-db --bin seed
//!
//! # Specify database path
//! cargo run -p kirana-db --bin seed -- --db ./data/kirana.db
//! ```
//!
//! ## Generated Data
//! - The eight-product starter catalog (dairy, bakery, snacks, staples)
//! - Seven days of deterministic demo sales (no RNG, same data on every
//!   fresh run), with stock decremented accordingly

use std::env;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use uuid::Uuid;

use kirana_core::{Product, Sale, SaleLineItem};
use kirana_db::{Database, DbConfig};

/// Demo shop/session key stamped onto seeded sales.
const DEMO_USER_ID: &str = "demo-shop";

/// Demo tax rate applied to seeded sales (percent).
const DEMO_TAX_RATE: f64 = 5.0;

/// The starter catalog: (name, category, price, stock, low-stock
/// threshold, shelf-life days, barcode).
const STARTER_PRODUCTS: &[(&str, &str, f64, i64, i64, i64, &str)] = &[
    ("Organic Milk", "Dairy", 60.0, 50, 10, 21, "8901234567890"),
    ("Brown Bread", "Bakery", 45.0, 30, 8, 7, "8901234567891"),
    ("Cheddar Cheese", "Dairy", 250.0, 20, 5, 60, "8901234567892"),
    ("Fresh Apples", "Produce", 150.0, 100, 20, 14, "8901234567893"),
    ("Instant Noodles", "Snacks", 25.0, 80, 15, 180, "8901234567894"),
    ("Coca-Cola (Can)", "Beverages", 40.0, 120, 24, 270, "8901234567895"),
    ("Lays Chips", "Snacks", 15.0, 15, 10, 90, "8901234567896"),
    ("Basmati Rice", "Staples", 120.0, 40, 10, 365, "8901234567897"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let mut db_path = String::from("./kirana_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kirana POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./kirana_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Kirana POS Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
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

    // Catalog
    println!();
    println!("Seeding starter catalog...");

    let today = Utc::now().date_naive();
    let mut products = Vec::new();
    for &(name, category, price, stock, threshold, shelf_days, barcode) in STARTER_PRODUCTS {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            category: category.to_string(),
            price,
            stock,
            low_stock_threshold: threshold,
            expiry_date: today + Duration::days(shelf_days),
            barcode: barcode.to_string(),
        };
        db.products().insert(&product).await?;
        products.push(product);
    }
    println!("✓ Seeded {} products", products.len());

    // A week of demo sales
    println!();
    println!("Seeding demo sales...");

    let mut seeded_sales = 0;
    for days_ago in (1..=7).rev() {
        let date = Utc::now() - Duration::days(days_ago);
        for sale_idx in 0..sales_for_day(date.date_naive()) {
            let sale = demo_sale(&products, days_ago, sale_idx, date);
            db.sales().record_sale(&sale).await?;
            seeded_sales += 1;
        }
    }
    println!("✓ Seeded {} sales across 7 days", seeded_sales);

    println!();
    println!(
        "✓ Seed complete! {} products, {} sales",
        products.len(),
        seeded_sales
    );

    Ok(())
}

/// Number of demo sales for a calendar day. Weekends are busier.
fn sales_for_day(date: NaiveDate) -> usize {
    match date.weekday().num_days_from_monday() {
        5 | 6 => 4, // Saturday, Sunday
        _ => 2,
    }
}

/// Builds one deterministic demo sale.
///
/// Line selection walks the catalog by arithmetic on the day/sale
/// indices, so a fresh seed always produces the same ledger.
fn demo_sale(
    products: &[Product],
    days_ago: i64,
    sale_idx: usize,
    date: chrono::DateTime<Utc>,
) -> Sale {
    let seed = days_ago as usize * 10 + sale_idx;
    let line_count = 1 + seed % 3;

    let items: Vec<SaleLineItem> = (0..line_count)
        .map(|line_idx| {
            let product = &products[(seed + line_idx * 3) % products.len()];
            SaleLineItem {
                product_id: product.id.clone(),
                name: product.name.clone(),
                quantity: 1 + ((seed + line_idx) % 2) as i64,
                price: product.price,
            }
        })
        .collect();

    let subtotal: f64 = items.iter().map(SaleLineItem::line_total).sum();
    let tax_amount = subtotal * DEMO_TAX_RATE / 100.0;

    Sale {
        id: Uuid::new_v4().to_string(),
        date,
        items,
        subtotal,
        discount_amount: None,
        discount_type: None,
        discount_value: None,
        tax_amount,
        total: subtotal + tax_amount,
        user_id: DEMO_USER_ID.to_string(),
    }
}
