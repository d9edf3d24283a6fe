//! Blog post entity for SeaORM.
//!
//! The author is stored as two columns; the combined display name is only
//! ever computed at the API edge.

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::NotSet, Set};

use blog_core::domain::{Author, BlogPost, PostPatch};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_first_name: String,
    pub author_last_name: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to domain BlogPost.
impl From<Model> for BlogPost {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author: Author {
                first_name: model.author_first_name,
                last_name: model.author_last_name,
            },
            title: model.title,
            content: model.content,
            created: model.created.into(),
        }
    }
}

/// Conversion from domain BlogPost to a fully populated ActiveModel.
impl From<BlogPost> for ActiveModel {
    fn from(post: BlogPost) -> Self {
        Self {
            id: Set(post.id),
            author_first_name: Set(post.author.first_name),
            author_last_name: Set(post.author.last_name),
            title: Set(post.title),
            content: Set(post.content),
            created: Set(post.created.into()),
        }
    }
}

/// Only the fields a patch carries are set; `id` and `created` stay untouched.
impl From<PostPatch> for ActiveModel {
    fn from(patch: PostPatch) -> Self {
        let (first, last) = match patch.author {
            Some(author) => (Set(author.first_name), Set(author.last_name)),
            None => (NotSet, NotSet),
        };

        Self {
            id: NotSet,
            author_first_name: first,
            author_last_name: last,
            title: patch.title.map_or(NotSet, Set),
            content: patch.content.map_or(NotSet, Set),
            created: NotSet,
        }
    }
}
