//! # Shopfront CLI
//!
//! Database seeding utilities for Shopfront testing and development.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use shopfront_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(10); // 10 categories with defaults
//! seed_all(&pool, config).await?;
//! ```

pub mod seeder;
