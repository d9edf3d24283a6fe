use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, PostPatch};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Replace an existing entity. Fails with `RepoError::NotFound` if absent.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Blog post store.
#[async_trait]
pub trait PostRepository: BaseRepository<BlogPost, Uuid> {
    /// Every stored post, in store order.
    async fn list(&self) -> Result<Vec<BlogPost>, RepoError>;

    /// Any single post, or `None` when the store is empty.
    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError>;

    /// Overwrite only the fields the patch carries, in one atomic write.
    /// Fails with `RepoError::NotFound` if no post has this id.
    async fn update_fields(&self, id: Uuid, patch: PostPatch) -> Result<(), RepoError>;

    /// Bulk insert. Either every post is stored or none is.
    async fn insert_many(&self, posts: Vec<BlogPost>) -> Result<Vec<BlogPost>, RepoError>;

    async fn count(&self) -> Result<u64, RepoError>;

    /// Remove every post.
    async fn clear(&self) -> Result<(), RepoError>;
}
