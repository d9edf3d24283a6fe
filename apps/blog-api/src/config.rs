//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use blog_infra::DatabaseConfig;

const DEFAULT_DATABASE_URL: &str = "sqlite://data/blog.db?mode=rwc";
const DEFAULT_TEST_DATABASE_URL: &str = "sqlite://data/blog-test.db?mode=rwc";

/// Which store address the process should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Test,
}

impl Environment {
    /// `test` (any case) selects the test store; anything else is production.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("test") {
            Environment::Test
        } else {
            Environment::Production
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub database: DatabaseConfig,
    /// HTTP worker threads; `None` lets actix pick one per core.
    pub workers: Option<usize>,
    /// Random posts inserted at startup.
    pub seed_posts: usize,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("APP_ENV")
            .map(|v| Environment::parse(&v))
            .unwrap_or(Environment::Production);

        let url = match environment {
            Environment::Production => {
                lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
            }
            Environment::Test => lookup("TEST_DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_TEST_DATABASE_URL.to_string()),
        };

        let mut database = DatabaseConfig::new(url);
        if let Some(max) = parsed(&lookup, "DB_MAX_CONNECTIONS") {
            database.max_connections = max;
        }
        if let Some(min) = parsed(&lookup, "DB_MIN_CONNECTIONS") {
            database.min_connections = min;
        }

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parsed(&lookup, "PORT").unwrap_or(8080),
            environment,
            database,
            workers: parsed(&lookup, "WORKERS"),
            seed_posts: parsed(&lookup, "SEED_POSTS").unwrap_or(0),
        }
    }

    /// Loopback config on an ephemeral port against the given store.
    pub fn for_store(url: impl Into<String>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: Environment::Test,
            database: DatabaseConfig::new(url),
            workers: Some(1),
            seed_posts: 0,
        }
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable setting, using default");
            None
        }
    }
}
