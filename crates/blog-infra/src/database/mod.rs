//! Database connection management and the SQL post store.

mod connections;

#[cfg(feature = "sql")]
pub mod entity;
#[cfg(feature = "sql")]
mod sql_repo;

pub use connections::{DatabaseConfig, MEMORY_URL_SCHEME};

#[cfg(feature = "sql")]
pub use connections::{connect, ensure_schema};
#[cfg(feature = "sql")]
pub use sql_repo::SqlPostRepository;

#[cfg(feature = "sql")]
#[cfg(test)]
mod tests;
