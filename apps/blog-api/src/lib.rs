//! # Blog API
//!
//! Actix-web server exposing the blog post collection at `/posts`.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod state;
pub mod telemetry;

pub use config::{AppConfig, Environment};
pub use server::{ServerError, ServerHandle};
pub use state::AppState;
