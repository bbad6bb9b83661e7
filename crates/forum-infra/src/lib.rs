//! # Forum Infrastructure
//!
//! Concrete implementations of the ports defined in `forum-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL storage via SeaORM

pub mod cooldown;
pub mod database;

pub use cooldown::{CooldownConfig, InMemoryCooldownCache};
pub use database::DatabaseConnections;

#[cfg(feature = "postgres")]
pub use database::PostgresForumRepository;
