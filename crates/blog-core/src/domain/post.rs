use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Structured author name. Both halves are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub first_name: String,
    pub last_name: String,
}

impl Author {
    /// Build an author from raw name parts, rejecting missing or blank halves.
    pub fn new(first_name: Option<String>, last_name: Option<String>) -> Result<Self, DomainError> {
        Ok(Self {
            first_name: required("author.firstName", first_name)?,
            last_name: required("author.lastName", last_name)?,
        })
    }

    /// Display form used in API responses: "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

/// Raw author input, before validation.
#[derive(Debug, Clone, Default)]
pub struct AuthorFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl TryFrom<AuthorFields> for Author {
    type Error = DomainError;

    fn try_from(fields: AuthorFields) -> Result<Self, Self::Error> {
        Author::new(fields.first_name, fields.last_name)
    }
}

/// Raw post input as received from a client or a fixture generator.
#[derive(Debug, Clone, Default)]
pub struct PostFields {
    pub author: Option<AuthorFields>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub created: Option<DateTime<Utc>>,
}

/// A validated post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: Option<DateTime<Utc>>,
}

impl TryFrom<PostFields> for NewPost {
    type Error = DomainError;

    /// Fields are checked in order: author, title, content. The first
    /// failure wins.
    fn try_from(fields: PostFields) -> Result<Self, Self::Error> {
        let author = fields
            .author
            .ok_or_else(|| DomainError::missing("author"))?
            .try_into()?;

        Ok(Self {
            author,
            title: required("title", fields.title)?,
            content: required("content", fields.content)?,
            created: fields.created,
        })
    }
}

/// Partial update: only the present fields are replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub author: Option<Author>,
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostPatch {
    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.title.is_none() && self.content.is_none()
    }
}

impl TryFrom<PostFields> for PostPatch {
    type Error = DomainError;

    /// `created` is not updatable and is ignored.
    fn try_from(fields: PostFields) -> Result<Self, Self::Error> {
        Ok(Self {
            author: fields.author.map(Author::try_from).transpose()?,
            title: fields.title.map(|t| required("title", Some(t))).transpose()?,
            content: fields
                .content
                .map(|c| required("content", Some(c)))
                .transpose()?,
        })
    }
}

/// BlogPost entity - a stored blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub author: Author,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl BlogPost {
    /// Create a new post with a fresh id. `created` defaults to now.
    pub fn create(new: NewPost) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: new.author,
            title: new.title,
            content: new.content,
            created: new.created.unwrap_or_else(Utc::now),
        }
    }

    /// Replace the fields carried by `patch`. `id` and `created` never change.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, DomainError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(DomainError::missing(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(first: &str, last: &str, title: &str, content: &str) -> PostFields {
        PostFields {
            author: Some(AuthorFields {
                first_name: Some(first.to_string()),
                last_name: Some(last.to_string()),
            }),
            title: Some(title.to_string()),
            content: Some(content.to_string()),
            created: None,
        }
    }

    #[test]
    fn test_full_name_joins_parts() {
        let author = Author::new(Some("Jane".into()), Some("Doe".into())).unwrap();
        assert_eq!(author.full_name(), "Jane Doe");
    }

    #[test]
    fn test_new_post_requires_every_field() {
        let mut missing_author = fields("Jane", "Doe", "T", "C");
        missing_author.author = None;
        let err = NewPost::try_from(missing_author).unwrap_err();
        assert_eq!(err.field(), Some("author"));

        let mut partial_author = fields("Jane", "Doe", "T", "C");
        partial_author.author.as_mut().unwrap().last_name = None;
        let err = NewPost::try_from(partial_author).unwrap_err();
        assert_eq!(err.field(), Some("author.lastName"));

        let err = NewPost::try_from(fields("Jane", "Doe", "  ", "C")).unwrap_err();
        assert_eq!(err.field(), Some("title"));

        let mut no_content = fields("Jane", "Doe", "T", "C");
        no_content.content = None;
        let err = NewPost::try_from(no_content).unwrap_err();
        assert_eq!(err.field(), Some("content"));
    }

    #[test]
    fn test_create_defaults_created_to_now() {
        let before = Utc::now();
        let post = BlogPost::create(NewPost::try_from(fields("Jane", "Doe", "T", "C")).unwrap());
        assert!(post.created >= before);
        assert_eq!(post.title, "T");
        assert_eq!(post.author.first_name, "Jane");
    }

    #[test]
    fn test_create_keeps_supplied_created() {
        let created = "2020-01-02T03:04:05Z".parse::<DateTime<Utc>>().unwrap();
        let mut input = fields("Jane", "Doe", "T", "C");
        input.created = Some(created);
        let post = BlogPost::create(NewPost::try_from(input).unwrap());
        assert_eq!(post.created, created);
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut post = BlogPost::create(NewPost::try_from(fields("Jane", "Doe", "T", "C")).unwrap());
        let (id, created) = (post.id, post.created);

        post.apply(PostPatch {
            title: Some("New title".into()),
            ..Default::default()
        });

        assert_eq!(post.id, id);
        assert_eq!(post.created, created);
        assert_eq!(post.title, "New title");
        assert_eq!(post.content, "C");
    }

    #[test]
    fn test_patch_rejects_partial_author_and_blank_fields() {
        let err = PostPatch::try_from(PostFields {
            author: Some(AuthorFields {
                first_name: Some("Jane".into()),
                last_name: None,
            }),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("author.lastName"));

        let err = PostPatch::try_from(PostFields {
            content: Some(String::new()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("content"));

        assert!(PostPatch::try_from(PostFields::default()).unwrap().is_empty());
    }

    #[test]
    fn test_author_serializes_camel_case() {
        let author = Author::new(Some("Jane".into()), Some("Doe".into())).unwrap();
        let json = serde_json::to_value(&author).unwrap();
        assert_eq!(json["firstName"], "Jane");
        assert_eq!(json["lastName"], "Doe");
    }
}
