//! Blog service for posts and tags

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::info;

use crate::domain::blog::{
    slugify, NewPost, Post, PostRepository, PostStatus, Tag, TagId, TagRepository,
    MAX_TITLE_LENGTH,
};
use crate::domain::user::{UserId, UserRepository};
use crate::domain::DomainError;

const MAX_TAG_NAME_LENGTH: usize = 255;

/// Request for creating a new post
#[derive(Debug, Clone)]
pub struct CreatePostRequest {
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub tags: Vec<TagId>,
    pub status: PostStatus,
    /// Derived from the title when blank
    pub slug: Option<String>,
}

/// Blog service: posts reference existing users and tags
#[derive(Clone)]
pub struct BlogService {
    posts: Arc<dyn PostRepository>,
    tags: Arc<dyn TagRepository>,
    users: Arc<dyn UserRepository>,
}

impl std::fmt::Debug for BlogService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogService").finish_non_exhaustive()
    }
}

impl BlogService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        tags: Arc<dyn TagRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self { posts, tags, users }
    }

    /// Create a tag with a unique, non-empty name
    pub async fn create_tag(&self, name: &str) -> Result<Tag, DomainError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(DomainError::validation("Tag name cannot be empty"));
        }

        if name.chars().count() > MAX_TAG_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Tag name exceeds maximum length of {} characters",
                MAX_TAG_NAME_LENGTH
            )));
        }

        let tag = self.tags.create(name).await?;
        info!(tag_id = %tag.id(), name = %tag.name(), "Created tag");

        Ok(tag)
    }

    pub async fn list_tags(&self) -> Result<Vec<Tag>, DomainError> {
        self.tags.list().await
    }

    /// Create a post, deriving the slug from the title when none is given
    pub async fn create_post(&self, request: CreatePostRequest) -> Result<Post, DomainError> {
        let title = request.title.trim();

        if title.is_empty() {
            return Err(DomainError::validation("Post title cannot be empty"));
        }

        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(DomainError::validation(format!(
                "Post title exceeds maximum length of {} characters",
                MAX_TITLE_LENGTH
            )));
        }

        if self.users.get(request.author_id).await?.is_none() {
            return Err(DomainError::not_found(format!(
                "User '{}' not found",
                request.author_id
            )));
        }

        let mut tags = BTreeSet::new();

        for tag_id in request.tags {
            if self.tags.get(tag_id).await?.is_none() {
                return Err(DomainError::not_found(format!("Tag '{}' not found", tag_id)));
            }
            tags.insert(tag_id);
        }

        let mut post = NewPost::new(request.author_id, title, request.content);
        post.tags = tags;
        post.status = request.status;
        post.slug = request.slug.map(|s| slugify(&s)).unwrap_or_default();
        post.ensure_slug();

        if post.slug.is_empty() {
            return Err(DomainError::validation(
                "Post slug cannot be empty; use a title with letters or digits",
            ));
        }

        let post = self.posts.create(post).await?;
        info!(post_id = %post.id(), slug = %post.slug(), "Created post");

        Ok(post)
    }

    pub async fn get_post(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        self.posts.get_by_slug(slug).await
    }

    /// List posts newest first
    pub async fn list_posts(&self, status: Option<PostStatus>) -> Result<Vec<Post>, DomainError> {
        self.posts.list(status).await
    }

    /// Mark a draft as published
    pub async fn publish(&self, slug: &str) -> Result<Post, DomainError> {
        let mut post = self
            .posts
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Post '{}' not found", slug)))?;

        if post.is_published() {
            return Ok(post);
        }

        post.publish();
        self.posts.update(&post).await
    }

    pub async fn delete_post(&self, slug: &str) -> Result<bool, DomainError> {
        match self.posts.get_by_slug(slug).await? {
            Some(post) => self.posts.delete(post.id()).await,
            None => Ok(false),
        }
    }

    /// Delete a user unless they still author posts
    pub async fn delete_author(&self, user_id: UserId) -> Result<bool, DomainError> {
        let posts = self.posts.count_by_author(user_id).await?;

        if posts > 0 {
            return Err(DomainError::conflict(format!(
                "User '{}' is still referenced by {} blog post(s)",
                user_id, posts
            )));
        }

        self.users.delete(user_id).await
    }
}
