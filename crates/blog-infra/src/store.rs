//! Post store lifecycle: connect, hand out the repository, close.

use std::sync::Arc;

use blog_core::error::RepoError;
use blog_core::ports::PostRepository;

use crate::database::DatabaseConfig;
use crate::memory::InMemoryPostRepository;

#[cfg(feature = "sql")]
use crate::database::{self, SqlPostRepository};

/// An open connection to the post store.
pub enum PostStore {
    #[cfg(feature = "sql")]
    Sql(Arc<SqlPostRepository>),
    Memory(Arc<InMemoryPostRepository>),
}

impl PostStore {
    /// Open the store named by `config.url` and make sure it is usable.
    ///
    /// `memory://` selects the in-memory store; anything else is handed to
    /// SeaORM.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, RepoError> {
        if config.is_memory() {
            tracing::info!("Using in-memory post store");
            return Ok(PostStore::Memory(Arc::new(InMemoryPostRepository::new())));
        }

        Self::connect_sql(config).await
    }

    #[cfg(feature = "sql")]
    async fn connect_sql(config: &DatabaseConfig) -> Result<Self, RepoError> {
        let conn = database::connect(config)
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))?;

        database::ensure_schema(&conn)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(PostStore::Sql(Arc::new(SqlPostRepository::new(conn))))
    }

    #[cfg(not(feature = "sql"))]
    async fn connect_sql(_config: &DatabaseConfig) -> Result<Self, RepoError> {
        Err(RepoError::Connection(
            "built without the `sql` feature; only memory:// stores are available".to_string(),
        ))
    }

    /// Repository view of the store.
    pub fn posts(&self) -> Arc<dyn PostRepository> {
        match self {
            #[cfg(feature = "sql")]
            PostStore::Sql(repo) => repo.clone() as Arc<dyn PostRepository>,
            PostStore::Memory(repo) => repo.clone() as Arc<dyn PostRepository>,
        }
    }

    /// Close the underlying connection pool.
    pub async fn close(self) -> Result<(), RepoError> {
        match self {
            #[cfg(feature = "sql")]
            PostStore::Sql(repo) => match Arc::try_unwrap(repo) {
                Ok(repo) => repo.close().await?,
                Err(_) => {
                    tracing::debug!("Post store still shared; pool closes with the last handle")
                }
            },
            PostStore::Memory(_) => {}
        }

        tracing::info!("Post store closed");
        Ok(())
    }
}
