//! Blog repository traits

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::post::{NewPost, Post, PostId, PostStatus};
use super::tag::{Tag, TagId};
use crate::domain::user::UserId;
use crate::domain::DomainError;

/// Record store for posts; slugs are unique
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn get(&self, id: PostId) -> Result<Option<Post>, DomainError>;

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError>;

    /// Persist a new post and return it with its assigned ID
    async fn create(&self, post: NewPost) -> Result<Post, DomainError>;

    async fn update(&self, post: &Post) -> Result<Post, DomainError>;

    async fn delete(&self, id: PostId) -> Result<bool, DomainError>;

    /// List posts newest first, optionally filtered by status
    async fn list(&self, status: Option<PostStatus>) -> Result<Vec<Post>, DomainError>;

    /// Count posts written by a user
    async fn count_by_author(&self, author_id: UserId) -> Result<usize, DomainError>;
}

/// Record store for tags; names are unique
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn get(&self, id: TagId) -> Result<Option<Tag>, DomainError>;

    async fn get_by_name(&self, name: &str) -> Result<Option<Tag>, DomainError>;

    async fn create(&self, name: &str) -> Result<Tag, DomainError>;

    /// List tags ordered by name
    async fn list(&self) -> Result<Vec<Tag>, DomainError>;
}
