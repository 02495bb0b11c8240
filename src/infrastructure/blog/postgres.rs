//! PostgreSQL blog repositories

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::blog::{
    NewPost, Post, PostId, PostRepository, PostStatus, Tag, TagId, TagRepository,
};
use crate::domain::user::UserId;
use crate::domain::DomainError;
use crate::infrastructure::storage::{is_foreign_key_violation, is_unique_violation};

/// Posts with their tag ids aggregated from the join table
const POST_SELECT: &str = r#"
    SELECT p.id, p.author_id, p.title, p.content, p.status, p.slug,
           p.created_at, p.updated_at,
           COALESCE(ARRAY_AGG(pt.tag_id) FILTER (WHERE pt.tag_id IS NOT NULL), '{}') AS tag_ids
    FROM posts p
    LEFT JOIN post_tags pt ON pt.post_id = p.id
"#;

/// PostgreSQL implementation of PostRepository
#[derive(Debug, Clone)]
pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn replace_tags(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        post_id: PostId,
        tags: &BTreeSet<TagId>,
    ) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
            .bind(post_id.value())
            .execute(&mut **tx)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to clear post tags: {}", e)))?;

        let tag_ids: Vec<i64> = tags.iter().map(TagId::value).collect();

        sqlx::query(
            "INSERT INTO post_tags (post_id, tag_id) SELECT $1, UNNEST($2::BIGINT[])",
        )
        .bind(post_id.value())
        .bind(&tag_ids)
        .execute(&mut **tx)
        .await
        .map_err(post_tags_error)?;

        Ok(())
    }

    async fn fetch_one_where(
        &self,
        condition: &str,
        bind: PostKey<'_>,
    ) -> Result<Option<Post>, DomainError> {
        let sql = format!("{} WHERE {} GROUP BY p.id", POST_SELECT, condition);
        let query = sqlx::query(&sql);

        let query = match bind {
            PostKey::Id(id) => query.bind(id.value()),
            PostKey::Slug(slug) => query.bind(slug),
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get post: {}", e)))?;

        row.as_ref().map(row_to_post).transpose()
    }
}

enum PostKey<'a> {
    Id(PostId),
    Slug(&'a str),
}

fn write_error(e: sqlx::Error, slug: &str, action: &str) -> DomainError {
    if is_unique_violation(&e) {
        DomainError::conflict(format!("Post with slug '{}' already exists", slug))
    } else if is_foreign_key_violation(&e) {
        DomainError::not_found("Post author does not exist")
    } else {
        DomainError::storage(format!("Failed to {} post: {}", action, e))
    }
}

fn post_tags_error(e: sqlx::Error) -> DomainError {
    if is_foreign_key_violation(&e) {
        DomainError::not_found("One or more tags do not exist")
    } else {
        DomainError::storage(format!("Failed to store post tags: {}", e))
    }
}

fn tag_write_error(e: sqlx::Error, name: &str) -> DomainError {
    if is_unique_violation(&e) {
        DomainError::conflict(format!("Tag '{}' already exists", name))
    } else {
        DomainError::storage(format!("Failed to create tag: {}", e))
    }
}

fn parse_status(value: &str) -> Result<PostStatus, DomainError> {
    PostStatus::parse(value)
        .ok_or_else(|| DomainError::storage(format!("Invalid post status in database: {}", value)))
}

fn tag_set(ids: Vec<i64>) -> BTreeSet<TagId> {
    ids.into_iter().map(TagId::new).collect()
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn get(&self, id: PostId) -> Result<Option<Post>, DomainError> {
        self.fetch_one_where("p.id = $1", PostKey::Id(id)).await
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<Post>, DomainError> {
        self.fetch_one_where("p.slug = $1", PostKey::Slug(slug)).await
    }

    async fn create(&self, post: NewPost) -> Result<Post, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let row = sqlx::query(
            r#"
            INSERT INTO posts (author_id, title, content, status, slug)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at, updated_at
            "#,
        )
        .bind(post.author_id.value())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.status.as_str())
        .bind(&post.slug)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| write_error(e, &post.slug, "create"))?;

        let read = |e: sqlx::Error| DomainError::storage(format!("Invalid post row: {}", e));
        let id = PostId::new(row.try_get("id").map_err(read)?);
        let created_at: DateTime<Utc> = row.try_get("created_at").map_err(read)?;
        let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(read)?;

        Self::replace_tags(&mut tx, id, &post.tags).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit post: {}", e)))?;

        Ok(Post::from_parts(
            id,
            post.author_id,
            post.title,
            post.content,
            post.tags,
            post.status,
            post.slug,
            created_at,
            updated_at,
        ))
    }

    async fn update(&self, post: &Post) -> Result<Post, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to begin transaction: {}", e)))?;

        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2, content = $3, status = $4, slug = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(post.id().value())
        .bind(post.title())
        .bind(post.content())
        .bind(post.status().as_str())
        .bind(post.slug())
        .bind(post.updated_at())
        .execute(&mut *tx)
        .await
        .map_err(|e| write_error(e, post.slug(), "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("Post '{}' not found", post.id())));
        }

        Self::replace_tags(&mut tx, post.id(), post.tags()).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to commit post: {}", e)))?;

        Ok(post.clone())
    }

    async fn delete(&self, id: PostId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete post: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, status: Option<PostStatus>) -> Result<Vec<Post>, DomainError> {
        let rows = match status {
            Some(s) => {
                let sql = format!(
                    "{} WHERE p.status = $1 GROUP BY p.id ORDER BY p.created_at DESC, p.id DESC",
                    POST_SELECT
                );
                sqlx::query(&sql)
                    .bind(s.as_str())
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    "{} GROUP BY p.id ORDER BY p.created_at DESC, p.id DESC",
                    POST_SELECT
                );
                sqlx::query(&sql).fetch_all(&self.pool).await
            }
        }
        .map_err(|e| DomainError::storage(format!("Failed to list posts: {}", e)))?;

        rows.iter().map(row_to_post).collect()
    }

    async fn count_by_author(&self, author_id: UserId) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts WHERE author_id = $1")
            .bind(author_id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count posts: {}", e)))?;

        Ok(count as usize)
    }
}

fn row_to_post(row: &sqlx::postgres::PgRow) -> Result<Post, DomainError> {
    let read = |e: sqlx::Error| DomainError::storage(format!("Invalid post row: {}", e));

    let status: String = row.try_get("status").map_err(read)?;
    let tag_ids: Vec<i64> = row.try_get("tag_ids").map_err(read)?;

    Ok(Post::from_parts(
        PostId::new(row.try_get("id").map_err(read)?),
        UserId::new(row.try_get("author_id").map_err(read)?),
        row.try_get("title").map_err(read)?,
        row.try_get("content").map_err(read)?,
        tag_set(tag_ids),
        parse_status(&status)?,
        row.try_get("slug").map_err(read)?,
        row.try_get("created_at").map_err(read)?,
        row.try_get("updated_at").map_err(read)?,
    ))
}

/// PostgreSQL implementation of TagRepository
#[derive(Debug, Clone)]
pub struct PostgresTagRepository {
    pool: PgPool,
}

impl PostgresTagRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PostgresTagRepository {
    async fn get(&self, id: TagId) -> Result<Option<Tag>, DomainError> {
        let row = sqlx::query("SELECT id, name, created_at, updated_at FROM tags WHERE id = $1")
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get tag: {}", e)))?;

        row.as_ref().map(row_to_tag).transpose()
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Tag>, DomainError> {
        let row = sqlx::query("SELECT id, name, created_at, updated_at FROM tags WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get tag: {}", e)))?;

        row.as_ref().map(row_to_tag).transpose()
    }

    async fn create(&self, name: &str) -> Result<Tag, DomainError> {
        let row = sqlx::query(
            "INSERT INTO tags (name) VALUES ($1) RETURNING id, name, created_at, updated_at",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| tag_write_error(e, name))?;

        row_to_tag(&row)
    }

    async fn list(&self) -> Result<Vec<Tag>, DomainError> {
        let rows = sqlx::query("SELECT id, name, created_at, updated_at FROM tags ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list tags: {}", e)))?;

        rows.iter().map(row_to_tag).collect()
    }
}

fn row_to_tag(row: &sqlx::postgres::PgRow) -> Result<Tag, DomainError> {
    let read = |e: sqlx::Error| DomainError::storage(format!("Invalid tag row: {}", e));

    Ok(Tag::from_parts(
        TagId::new(row.try_get("id").map_err(read)?),
        row.try_get("name").map_err(read)?,
        row.try_get("created_at").map_err(read)?,
        row.try_get("updated_at").map_err(read)?,
    ))
}
