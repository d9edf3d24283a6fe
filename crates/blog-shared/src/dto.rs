//! Data Transfer Objects - request/response types for the API.
//!
//! Requests accept `author` as a structured `{firstName, lastName}` object.
//! Responses flatten it into a single display string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use blog_core::domain::{AuthorFields, BlogPost, PostFields};

/// Author name pair as sent by clients. Missing halves are reported by
/// validation rather than by the JSON decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<AuthorInput> for AuthorFields {
    fn from(input: AuthorInput) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
        }
    }
}

/// Request to create a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub author: Option<AuthorInput>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

impl From<CreatePostRequest> for PostFields {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            author: req.author.map(Into::into),
            title: req.title,
            content: req.content,
            created: req.created,
        }
    }
}

/// Request to replace some fields of a post.
///
/// `id`, when present, must match the id in the request path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub id: Option<String>,
    pub author: Option<AuthorInput>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl From<UpdatePostRequest> for PostFields {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            author: req.author.map(Into::into),
            title: req.title,
            content: req.content,
            created: None,
        }
    }
}

/// Public representation of a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: String,
    pub author: String,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl From<BlogPost> for PostResponse {
    fn from(post: BlogPost) -> Self {
        Self {
            id: post.id.to_string(),
            author: post.author.full_name(),
            title: post.title,
            content: post.content,
            created: post.created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::NewPost;

    #[test]
    fn test_create_request_reads_camel_case_author() {
        let req: CreatePostRequest = serde_json::from_value(serde_json::json!({
            "author": {"firstName": "Jane", "lastName": "Doe"},
            "title": "T",
            "content": "C"
        }))
        .unwrap();

        let post = NewPost::try_from(PostFields::from(req)).unwrap();
        assert_eq!(post.author.first_name, "Jane");
        assert_eq!(post.author.last_name, "Doe");
        assert!(post.created.is_none());
    }

    #[test]
    fn test_response_flattens_author() {
        let req = CreatePostRequest {
            author: Some(AuthorInput {
                first_name: Some("Jane".into()),
                last_name: Some("Doe".into()),
            }),
            title: Some("T".into()),
            content: Some("C".into()),
            created: None,
        };
        let post = BlogPost::create(NewPost::try_from(PostFields::from(req)).unwrap());
        let id = post.id.to_string();

        let json = serde_json::to_value(PostResponse::from(post)).unwrap();
        assert_eq!(json["author"], "Jane Doe");
        assert_eq!(json["id"], id.as_str());
        for key in ["id", "author", "title", "content", "created"] {
            assert!(json.get(key).is_some(), "missing key {key}");
        }
    }
}
