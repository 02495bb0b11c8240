//! Blog domain
//!
//! Posts authored by users, tags and slug generation.

mod post;
mod repository;
mod slug;
mod tag;

pub use post::{NewPost, Post, PostId, PostStatus, MAX_TITLE_LENGTH};
pub use repository::{PostRepository, TagRepository};
pub use slug::{slugify, MAX_SLUG_LENGTH};
pub use tag::{Tag, TagId};

#[cfg(test)]
pub use repository::{MockPostRepository, MockTagRepository};
