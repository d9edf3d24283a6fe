//! In-memory post store - used for local runs and tests without a database.
//! Data is lost on process restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{BlogPost, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};

/// Posts kept in insertion order behind an async RwLock.
pub struct InMemoryPostRepository {
    store: RwLock<Vec<BlogPost>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(Vec::new()),
        }
    }
}

impl Default for InMemoryPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        let store = self.store.read().await;
        Ok(store.iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, entity: BlogPost) -> Result<BlogPost, RepoError> {
        let mut store = self.store.write().await;
        if store.iter().any(|p| p.id == entity.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        store.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: BlogPost) -> Result<BlogPost, RepoError> {
        let mut store = self.store.write().await;
        let slot = store
            .iter_mut()
            .find(|p| p.id == entity.id)
            .ok_or(RepoError::NotFound)?;

        // `created` belongs to the stored record.
        slot.author = entity.author.clone();
        slot.title = entity.title.clone();
        slot.content = entity.content.clone();
        Ok(slot.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let before = store.len();
        store.retain(|p| p.id != id);

        if store.len() == before {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self) -> Result<Vec<BlogPost>, RepoError> {
        Ok(self.store.read().await.clone())
    }

    async fn find_one(&self) -> Result<Option<BlogPost>, RepoError> {
        Ok(self.store.read().await.first().cloned())
    }

    async fn update_fields(&self, id: Uuid, patch: PostPatch) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        let slot = store
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(RepoError::NotFound)?;

        slot.apply(patch);
        Ok(())
    }

    async fn insert_many(&self, posts: Vec<BlogPost>) -> Result<Vec<BlogPost>, RepoError> {
        let mut store = self.store.write().await;

        // Check everything first so a rejected batch leaves no trace.
        for (i, post) in posts.iter().enumerate() {
            let clash = store.iter().any(|p| p.id == post.id)
                || posts[..i].iter().any(|p| p.id == post.id);
            if clash {
                return Err(RepoError::Constraint("Entity already exists".to_string()));
            }
        }

        store.extend(posts.iter().cloned());
        Ok(posts)
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Ok(self.store.read().await.len() as u64)
    }

    async fn clear(&self) -> Result<(), RepoError> {
        self.store.write().await.clear();
        Ok(())
    }
}
