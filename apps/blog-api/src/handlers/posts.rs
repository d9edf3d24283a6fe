//! Blog post collection and item handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{BlogPost, NewPost, PostFields, PostPatch};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};
use blog_shared::dto::{CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Ids that do not parse can never name a stored post.
fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

fn not_found(raw: &str) -> AppError {
    AppError::NotFound(format!("BlogPost with id {} not found", raw))
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    tracing::debug!(count = posts.len(), "Listing posts");

    let body: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let raw = path.into_inner();
    let id = parse_id(&raw).ok_or_else(|| not_found(&raw))?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or(DomainError::NotFound {
            entity_type: "BlogPost",
            id,
        })?;

    Ok(HttpResponse::Ok().json(PostResponse::from(post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let new_post = NewPost::try_from(PostFields::from(body.into_inner()))?;

    let saved = state.posts.insert(BlogPost::create(new_post)).await?;
    tracing::info!(post_id = %saved.id, "Post created");

    Ok(HttpResponse::Created().json(PostResponse::from(saved)))
}

/// PUT /posts/{id}
///
/// Replaces the fields present in the body. A body `id`, if sent, must match
/// the path.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let raw = path.into_inner();
    let id = parse_id(&raw).ok_or_else(|| not_found(&raw))?;
    let req = body.into_inner();

    if let Some(body_id) = req.id.as_deref() {
        if parse_id(body_id) != Some(id) {
            return Err(AppError::BadRequest(format!(
                "Request path id ({}) and request body id ({}) must match",
                raw, body_id
            )));
        }
    }

    let patch = PostPatch::try_from(PostFields::from(req))?;

    let changed = !patch.is_empty();
    match state.posts.update_fields(id, patch).await {
        Ok(()) if changed => tracing::info!(post_id = %id, "Post updated"),
        Ok(()) => {}
        Err(RepoError::NotFound) => return Err(not_found(&raw)),
        Err(e) => return Err(e.into()),
    }

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /posts/{id}
///
/// Deleting an unknown id is not an error.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let raw = path.into_inner();

    if let Some(id) = parse_id(&raw) {
        match state.posts.delete(id).await {
            Ok(()) => tracing::info!(post_id = %id, "Post deleted"),
            Err(RepoError::NotFound) => tracing::debug!(post_id = %id, "Delete of absent post"),
            Err(e) => return Err(e.into()),
        }
    }

    Ok(HttpResponse::NoContent().finish())
}
