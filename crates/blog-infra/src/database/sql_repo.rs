//! SeaORM-backed post repository.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter, TransactionTrait,
};
use uuid::Uuid;

use blog_core::domain::{BlogPost, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

use super::entity::post::{self, ActiveModel, Entity as PostEntity};

/// Rows per INSERT statement; keeps bound parameters under the SQLite limit.
const INSERT_CHUNK: usize = 1000;

/// Post repository over any SeaORM connection (PostgreSQL, SQLite).
pub struct SqlPostRepository {
    pub(crate) db: DbConn,
}

impl SqlPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    /// Close the connection pool.
    pub async fn close(self) -> Result<(), RepoError> {
        self.db
            .close()
            .await
            .map_err(|e| RepoError::Connection(e.to_string()))
    }

    async fn write_patch(&self, id: Uuid, patch: PostPatch) -> Result<(), RepoError> {
        let result = PostEntity::update_many()
            .set(ActiveModel::from(patch))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        tracing::debug!(post_id = %id, "Post updated");
        Ok(())
    }
}

fn map_db_err(err: DbErr) -> RepoError {
    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => {
            let err_str = other.to_string();
            if err_str.contains("duplicate") || err_str.contains("UNIQUE") || err_str.contains("unique") {
                RepoError::Constraint("Entity already exists".to_string())
            } else {
                RepoError::Query(err_str)
            }
        }
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for SqlPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn insert(&self, entity: BlogPost) -> Result<BlogPost, RepoError> {
        PostEntity::insert(ActiveModel::from(entity.clone()))
            .exec_without_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(post_id = %entity.id, "Post inserted");
        Ok(entity)
    }

    async fn update(&self, entity: BlogPost) -> Result<BlogPost, RepoError> {
        let patch = PostPatch {
            author: Some(entity.author.clone()),
            title: Some(entity.title.clone()),
            content: Some(entity.content.clone()),
        };

        self.write_patch(entity.id, patch).await?;
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl PostRepository for SqlPostRepository {
    async fn list(&self) -> Result<Vec<BlogPost>, RepoError> {
        let result = PostEntity::find()
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError> {
        let result = PostEntity::find()
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn update_fields(&self, id: Uuid, patch: PostPatch) -> Result<(), RepoError> {
        if patch.is_empty() {
            return match self.find_by_id(id).await? {
                Some(_) => Ok(()),
                None => Err(RepoError::NotFound),
            };
        }

        self.write_patch(id, patch).await
    }

    async fn insert_many(&self, posts: Vec<BlogPost>) -> Result<Vec<BlogPost>, RepoError> {
        if posts.is_empty() {
            return Ok(posts);
        }

        let txn = self.db.begin().await.map_err(map_db_err)?;
        for chunk in posts.chunks(INSERT_CHUNK) {
            let inserted = PostEntity::insert_many(chunk.iter().cloned().map(ActiveModel::from))
                .exec_without_returning(&txn)
                .await;

            if let Err(e) = inserted {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::warn!(error = %rollback_err, "Bulk insert rollback failed");
                }
                return Err(map_db_err(e));
            }
        }
        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(count = posts.len(), "Posts inserted");
        Ok(posts)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        PostEntity::find()
            .count(&self.db)
            .await
            .map_err(map_db_err)
    }

    async fn clear(&self) -> Result<(), RepoError> {
        let result = PostEntity::delete_many()
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        tracing::debug!(removed = result.rows_affected, "Post store cleared");
        Ok(())
    }
}
