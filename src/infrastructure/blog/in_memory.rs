//! In-memory blog repositories

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::blog::{
    NewPost, Post, PostId, PostRepository, PostStatus, Tag, TagId, TagRepository,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct PostTable {
    posts: BTreeMap<PostId, Post>,
    last_id: i64,
}

/// In-memory implementation of PostRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryPostRepository {
    table: Arc<RwLock<PostTable>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn get(&self, id: PostId) -> Result<Option<Post>, DomainError> {
        let table = self.table.read().await;
        Ok(table.posts.get(&id).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        let table = self.table.read().await;
        Ok(table.posts.values().find(|p| p.slug() == slug).cloned())
    }

    async fn create(&self, post: NewPost) -> Result<Post, DomainError> {
        let mut table = self.table.write().await;

        if table.posts.values().any(|p| p.slug() == post.slug) {
            return Err(DomainError::conflict(format!(
                "Post with slug '{}' already exists",
                post.slug
            )));
        }

        table.last_id += 1;
        let post = post.into_post(PostId::new(table.last_id));
        table.posts.insert(post.id(), post.clone());

        Ok(post)
    }

    async fn update(&self, post: &Post) -> Result<Post, DomainError> {
        let mut table = self.table.write().await;

        if !table.posts.contains_key(&post.id()) {
            return Err(DomainError::not_found(format!("Post '{}' not found", post.id())));
        }

        let slug_taken = table
            .posts
            .values()
            .any(|p| p.slug() == post.slug() && p.id() != post.id());

        if slug_taken {
            return Err(DomainError::conflict(format!(
                "Post with slug '{}' already exists",
                post.slug()
            )));
        }

        table.posts.insert(post.id(), post.clone());

        Ok(post.clone())
    }

    async fn delete(&self, id: PostId) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        Ok(table.posts.remove(&id).is_some())
    }

    async fn list(&self, status: Option<PostStatus>) -> Result<Vec<Post>, DomainError> {
        let table = self.table.read().await;

        let mut posts: Vec<Post> = table
            .posts
            .values()
            .filter(|p| status.is_none_or(|s| p.status() == s))
            .cloned()
            .collect();

        posts.sort_by(|a, b| b.created_at().cmp(&a.created_at()).then(b.id().cmp(&a.id())));

        Ok(posts)
    }

    async fn count_by_author(&self, author_id: UserId) -> Result<usize, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .posts
            .values()
            .filter(|p| p.author_id() == author_id)
            .count())
    }
}

#[derive(Debug, Default)]
struct TagTable {
    tags: BTreeMap<TagId, Tag>,
    last_id: i64,
}

/// In-memory implementation of TagRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryTagRepository {
    table: Arc<RwLock<TagTable>>,
}

impl InMemoryTagRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TagRepository for InMemoryTagRepository {
    async fn get(&self, id: TagId) -> Result<Option<Tag>, DomainError> {
        let table = self.table.read().await;
        Ok(table.tags.get(&id).cloned())
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Tag>, DomainError> {
        let table = self.table.read().await;
        Ok(table.tags.values().find(|t| t.name() == name).cloned())
    }

    async fn create(&self, name: &str) -> Result<Tag, DomainError> {
        let mut table = self.table.write().await;

        if table.tags.values().any(|t| t.name() == name) {
            return Err(DomainError::conflict(format!("Tag '{}' already exists", name)));
        }

        table.last_id += 1;
        let tag = Tag::new(TagId::new(table.last_id), name);
        table.tags.insert(tag.id(), tag.clone());

        Ok(tag)
    }

    async fn list(&self) -> Result<Vec<Tag>, DomainError> {
        let table = self.table.read().await;

        let mut tags: Vec<Tag> = table.tags.values().cloned().collect();
        tags.sort_by(|a, b| a.name().cmp(b.name()));

        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_post(title: &str, slug: &str) -> NewPost {
        let mut post = NewPost::new(UserId::new(1), title, "content");
        post.slug = slug.to_string();
        post
    }

    #[tokio::test]
    async fn test_post_create_and_get_by_slug() {
        let repo = InMemoryPostRepository::new();

        let post = repo.create(new_post("Hello", "hello")).await.unwrap();
        assert_eq!(post.id(), PostId::new(1));

        let found = repo.get_by_slug("hello").await.unwrap();
        assert_eq!(found, Some(post));
    }

    #[tokio::test]
    async fn test_post_duplicate_slug() {
        let repo = InMemoryPostRepository::new();
        repo.create(new_post("Hello", "hello")).await.unwrap();

        let result = repo.create(new_post("Hello again", "hello")).await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_post_list_filters_status() {
        let repo = InMemoryPostRepository::new();
        let mut first = repo.create(new_post("One", "one")).await.unwrap();
        repo.create(new_post("Two", "two")).await.unwrap();

        first.publish();
        repo.update(&first).await.unwrap();

        assert_eq!(repo.list(None).await.unwrap().len(), 2);

        let published = repo.list(Some(PostStatus::Published)).await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].slug(), "one");
    }

    #[tokio::test]
    async fn test_post_count_by_author() {
        let repo = InMemoryPostRepository::new();
        repo.create(new_post("One", "one")).await.unwrap();

        assert_eq!(repo.count_by_author(UserId::new(1)).await.unwrap(), 1);
        assert_eq!(repo.count_by_author(UserId::new(2)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_post_delete() {
        let repo = InMemoryPostRepository::new();
        let post = repo.create(new_post("One", "one")).await.unwrap();

        assert!(repo.delete(post.id()).await.unwrap());
        assert!(repo.get(post.id()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tag_unique_names() {
        let repo = InMemoryTagRepository::new();
        repo.create("rust").await.unwrap();

        let result = repo.create("rust").await;
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_tag_list_sorted_by_name() {
        let repo = InMemoryTagRepository::new();
        repo.create("web").await.unwrap();
        repo.create("axum").await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .iter()
            .map(|t| t.name().to_string())
            .collect();

        assert_eq!(names, vec!["axum", "web"]);
    }
}
