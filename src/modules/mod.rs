pub mod admin;
pub mod auth;
pub mod carts;
pub mod categories;
pub mod health;
pub mod items;
pub mod orders;
pub mod products;
pub mod reports;
pub mod reviews;
pub mod roles;
pub mod tasks;
pub mod users;
