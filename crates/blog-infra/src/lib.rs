//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! the SeaORM post store, an in-memory store, and synthetic data seeding.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - In-memory store only
//! - `sql` - PostgreSQL / SQLite store via SeaORM

pub mod database;
pub mod memory;
pub mod seed;
pub mod store;

pub use database::DatabaseConfig;
pub use memory::InMemoryPostRepository;
pub use seed::{FixedPostFactory, PostFactory, RandomPostFactory, seed_posts};
pub use store::PostStore;

#[cfg(feature = "sql")]
pub use database::SqlPostRepository;
