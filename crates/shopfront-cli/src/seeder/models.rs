//! Data models for database seeding configuration.

use rust_decimal::Decimal;
use shopfront_models::{CategoryId, RoleId};

/// Every seeded category carries this description. `clear-seed` finds seeded
/// catalog rows through it.
pub const SEED_CATEGORY_DESCRIPTION: &str = "Seeded category";

/// Domain of every seeded customer's email address.
pub const SEED_EMAIL_DOMAIN: &str = "seed.shopfront.test";

/// Password shared by all seeded customers.
pub const SEED_PASSWORD: &str = "Password@123";

pub struct CategorySeed {
    pub name: String,
}

pub struct ProductSeed {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: CategoryId,
}

pub struct UserSeed {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: RoleId,
}

/// Complete configuration for database seeding.
#[derive(Clone, Debug)]
pub struct SeedConfig {
    pub num_categories: usize,
    pub products_per_category: usize,
    pub num_customers: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            num_categories: 5,
            products_per_category: 20,
            num_customers: 50,
        }
    }
}

impl SeedConfig {
    /// Creates a new seed configuration with the specified number of categories.
    pub fn new(num_categories: usize) -> Self {
        Self {
            num_categories,
            ..Default::default()
        }
    }

    pub fn with_products(mut self, products_per_category: usize) -> Self {
        self.products_per_category = products_per_category;
        self
    }

    pub fn with_customers(mut self, num_customers: usize) -> Self {
        self.num_customers = num_customers;
        self
    }

    pub fn total_products(&self) -> usize {
        self.num_categories * self.products_per_category
    }
}
