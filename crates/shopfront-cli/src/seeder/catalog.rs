//! Category and product seeding.
//!
//! Rows are generated in parallel with Rayon and inserted with multi-value
//! INSERT statements inside one transaction per table.

use std::time::Instant;

use fake::Fake;
use fake::faker::company::en::{Buzzword, Industry};
use fake::faker::lorem::en::{Sentence, Word};
use rayon::prelude::*;
use rust_decimal::Decimal;
use shopfront_models::{CategoryId, ProductId};
use sqlx::{PgPool, Postgres, Transaction};

use super::models::{CategorySeed, ProductSeed, SEED_CATEGORY_DESCRIPTION};

pub fn generate_categories(count: usize) -> Vec<CategorySeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let industry: String = Industry().fake();
            CategorySeed {
                name: format!("{industry} {}", idx + 1),
            }
        })
        .collect()
}

pub fn generate_products(category_ids: &[CategoryId], per_category: usize) -> Vec<ProductSeed> {
    category_ids
        .par_iter()
        .flat_map(|&category_id| {
            (0..per_category)
                .map(|_| {
                    let adjective: String = Buzzword().fake();
                    let noun: String = Word().fake();
                    let cents: i64 = (100..50_000).fake();

                    ProductSeed {
                        name: format!("{adjective} {noun}"),
                        description: Sentence(5..12).fake(),
                        price: Decimal::new(cents, 2),
                        stock: (0..200).fake(),
                        category_id,
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

pub async fn seed_categories(db: &PgPool, count: usize) -> anyhow::Result<Vec<CategoryId>> {
    let start_time = Instant::now();
    println!("📂 Seeding {} categories...", count);

    let categories = generate_categories(count);

    let mut tx = db.begin().await?;
    const BATCH_SIZE: usize = 1000;
    let mut all_ids = Vec::with_capacity(categories.len());
    for chunk in categories.chunks(BATCH_SIZE) {
        all_ids.extend(insert_categories_chunk(&mut tx, chunk).await?);
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} categories in {:?}",
        all_ids.len(),
        start_time.elapsed()
    );

    Ok(all_ids)
}

async fn insert_categories_chunk(
    tx: &mut Transaction<'_, Postgres>,
    categories: &[CategorySeed],
) -> anyhow::Result<Vec<CategoryId>> {
    if categories.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO categories (name, description) VALUES ");
    for i in 0..categories.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 2;
        query.push_str(&format!("(${}, ${})", param_idx + 1, param_idx + 2));
    }
    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for category in categories {
        q = q.bind(&category.name).bind(SEED_CATEGORY_DESCRIPTION);
    }

    let ids: Vec<CategoryId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

pub async fn seed_products(
    db: &PgPool,
    category_ids: &[CategoryId],
    per_category: usize,
) -> anyhow::Result<Vec<ProductId>> {
    let start_time = Instant::now();
    println!(
        "📦 Seeding {} products ({} per category)...",
        category_ids.len() * per_category,
        per_category
    );

    let products = generate_products(category_ids, per_category);

    let mut tx = db.begin().await?;
    // 5 params per product
    const BATCH_SIZE: usize = 1000;
    let mut all_ids = Vec::with_capacity(products.len());
    for chunk in products.chunks(BATCH_SIZE) {
        all_ids.extend(insert_products_chunk(&mut tx, chunk).await?);
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} products in {:?}",
        all_ids.len(),
        start_time.elapsed()
    );

    Ok(all_ids)
}

async fn insert_products_chunk(
    tx: &mut Transaction<'_, Postgres>,
    products: &[ProductSeed],
) -> anyhow::Result<Vec<ProductId>> {
    if products.is_empty() {
        return Ok(Vec::new());
    }

    let mut query =
        String::from("INSERT INTO products (name, description, price, stock, category_id) VALUES ");
    for i in 0..products.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 5;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4,
            param_idx + 5
        ));
    }
    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for product in products {
        q = q
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(product.stock)
            .bind(product.category_id);
    }

    let ids: Vec<ProductId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Deletes seeded categories together with their products, reviews and any
/// orders that bought those products.
pub async fn clear_catalog(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded catalog...");

    let mut tx = db.begin().await?;

    sqlx::query(
        "DELETE FROM orders WHERE id IN (
            SELECT oi.order_id FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            JOIN categories c ON c.id = p.category_id
            WHERE c.description = $1
        )",
    )
    .bind(SEED_CATEGORY_DESCRIPTION)
    .execute(&mut *tx)
    .await?;

    let products = sqlx::query(
        "DELETE FROM products WHERE category_id IN (
            SELECT id FROM categories WHERE description = $1
        )",
    )
    .bind(SEED_CATEGORY_DESCRIPTION)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    let categories = sqlx::query("DELETE FROM categories WHERE description = $1")
        .bind(SEED_CATEGORY_DESCRIPTION)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    println!(
        "   ✓ Deleted {} categories and {} products in {:?}",
        categories,
        products,
        start_time.elapsed()
    );

    Ok(categories + products)
}
