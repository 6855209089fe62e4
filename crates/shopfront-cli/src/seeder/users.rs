//! Customer seeding.

use std::time::Instant;

use fake::Fake;
use fake::faker::name::en::{FirstName, LastName};
use rayon::prelude::*;
use shopfront_models::{RoleId, UserId};
use sqlx::{PgPool, Postgres, Transaction};

use super::models::{SEED_EMAIL_DOMAIN, UserSeed};

/// Generates customers whose usernames are unique within one run. `run_tag`
/// keeps them unique across runs.
pub fn generate_customers(
    count: usize,
    role_id: RoleId,
    run_tag: &str,
    password_hash: &str,
) -> Vec<UserSeed> {
    (0..count)
        .into_par_iter()
        .map(|idx| {
            let first_name: String = FirstName().fake();
            let last_name: String = LastName().fake();
            let username = format!(
                "{}.{}.{}{}",
                first_name.to_lowercase(),
                last_name.to_lowercase(),
                run_tag,
                idx
            );

            UserSeed {
                email: format!("{username}@{SEED_EMAIL_DOMAIN}"),
                username,
                password_hash: password_hash.to_string(),
                role_id,
            }
        })
        .collect()
}

pub async fn seed_customers(
    db: &PgPool,
    count: usize,
    password_hash: &str,
) -> anyhow::Result<Vec<UserId>> {
    let start_time = Instant::now();
    println!("👥 Seeding {} customers...", count);

    let role_id: RoleId = sqlx::query_scalar("SELECT id FROM roles WHERE name = 'user'")
        .fetch_optional(db)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Role 'user' is missing; run the migrations first"))?;

    let run_tag = UserId::new().to_string()[..6].to_string();
    let users = generate_customers(count, role_id, &run_tag, password_hash);

    let mut tx = db.begin().await?;
    // 4 params per user
    const BATCH_SIZE: usize = 1000;
    let mut all_ids = Vec::with_capacity(users.len());
    for chunk in users.chunks(BATCH_SIZE) {
        all_ids.extend(insert_users_chunk(&mut tx, chunk).await?);
    }
    tx.commit().await?;

    println!(
        "   ✓ Inserted {} customers in {:?}",
        all_ids.len(),
        start_time.elapsed()
    );

    Ok(all_ids)
}

async fn insert_users_chunk(
    tx: &mut Transaction<'_, Postgres>,
    users: &[UserSeed],
) -> anyhow::Result<Vec<UserId>> {
    if users.is_empty() {
        return Ok(Vec::new());
    }

    let mut query =
        String::from("INSERT INTO users (username, email, password_hash, role_id) VALUES ");
    for i in 0..users.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 4;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4
        ));
    }
    query.push_str(" RETURNING id");

    let mut q = sqlx::query_scalar(&query);
    for user in users {
        q = q
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role_id);
    }

    let ids: Vec<UserId> = q.fetch_all(&mut **tx).await?;
    Ok(ids)
}

/// Deletes seeded customers and the orders they placed. Carts, reviews and
/// tasks go with them through `ON DELETE CASCADE`.
pub async fn clear_customers(db: &PgPool) -> anyhow::Result<u64> {
    let start_time = Instant::now();
    println!("🗑️  Clearing seeded customers...");

    let pattern = format!("%@{SEED_EMAIL_DOMAIN}");
    let mut tx = db.begin().await?;

    sqlx::query("DELETE FROM orders WHERE user_id IN (SELECT id FROM users WHERE email LIKE $1)")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?;

    let deleted = sqlx::query("DELETE FROM users WHERE email LIKE $1")
        .bind(&pattern)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    tx.commit().await?;

    println!(
        "   ✓ Deleted {} customers in {:?}",
        deleted,
        start_time.elapsed()
    );

    Ok(deleted)
}
