//! Domain entities - the blog post and its validated inputs.

mod post;

pub use post::{Author, AuthorFields, BlogPost, NewPost, PostFields, PostPatch};
