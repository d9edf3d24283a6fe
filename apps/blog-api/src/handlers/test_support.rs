use async_trait::async_trait;
use uuid::Uuid;

use blog_core::domain::{BlogPost, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

/// A store that refuses every call.
pub struct DownRepository;

fn down() -> RepoError {
    RepoError::Connection("connection refused".to_string())
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for DownRepository {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        Err(down())
    }
    async fn insert(&self, _entity: BlogPost) -> Result<BlogPost, RepoError> {
        Err(down())
    }
    async fn update(&self, _entity: BlogPost) -> Result<BlogPost, RepoError> {
        Err(down())
    }
    async fn delete(&self, _id: Uuid) -> Result<(), RepoError> {
        Err(down())
    }
}

#[async_trait]
impl PostRepository for DownRepository {
    async fn list(&self) -> Result<Vec<BlogPost>, RepoError> {
        Err(down())
    }
    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError> {
        Err(down())
    }
    async fn update_fields(&self, _id: Uuid, _patch: PostPatch) -> Result<(), RepoError> {
        Err(down())
    }
    async fn insert_many(&self, _posts: Vec<BlogPost>) -> Result<Vec<BlogPost>, RepoError> {
        Err(down())
    }
    async fn count(&self) -> Result<u64, RepoError> {
        Err(down())
    }
    async fn clear(&self) -> Result<(), RepoError> {
        Err(down())
    }
}
