//! Database seeding for local development and load testing.
//!
//! - [`catalog`] - category and product generation and insertion
//! - [`users`] - customer generation and insertion
//! - [`models`] - seed rows and [`SeedConfig`]
//!
//! Generation runs on Rayon, inserts are batched multi-value statements, and
//! one low-cost bcrypt hash is shared by every seeded customer.

pub mod catalog;
pub mod models;
pub mod users;

pub use models::{SEED_PASSWORD, SeedConfig};

use std::time::Instant;

use bcrypt::hash;
use sqlx::PgPool;

/// Seeds categories, their products, and customers.
pub async fn seed_all(db: &PgPool, config: SeedConfig) -> anyhow::Result<()> {
    let start_time = Instant::now();

    println!("🌱 Starting database seeding...");
    println!("   - Categories: {}", config.num_categories);
    println!("   - Products per category: {}", config.products_per_category);
    println!("   - Customers: {}", config.num_customers);

    let password_hash = hash_seed_password()?;

    let category_ids = catalog::seed_categories(db, config.num_categories).await?;
    let product_ids =
        catalog::seed_products(db, &category_ids, config.products_per_category).await?;
    let customer_ids = users::seed_customers(db, config.num_customers, &password_hash).await?;

    println!(
        "\n✅ Seeding complete! Created {} categories, {} products, {} customers in {:?}",
        category_ids.len(),
        product_ids.len(),
        customer_ids.len(),
        start_time.elapsed()
    );
    println!("\n📝 Password for all seeded customers: {SEED_PASSWORD}");

    Ok(())
}

/// Removes everything `seed_all` created. Admin accounts and hand-made
/// catalog rows are left alone.
pub async fn clear_all(db: &PgPool) -> anyhow::Result<()> {
    let start_time = Instant::now();
    println!("🗑️  Clearing all seeded data...");

    users::clear_customers(db).await?;
    catalog::clear_catalog(db).await?;

    println!("✅ All seeded data cleared in {:?}", start_time.elapsed());
    Ok(())
}

fn hash_seed_password() -> anyhow::Result<String> {
    println!("🔐 Hashing password...");
    let start = Instant::now();
    // cost 4 is ~6ms against ~250ms at the default cost
    let hash = hash(SEED_PASSWORD, 4)?;
    println!("   ✓ Hashed password in {:?}", start.elapsed());
    Ok(hash)
}
