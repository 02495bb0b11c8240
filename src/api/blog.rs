//! Blog endpoints: public reads, staff-only writes

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireStaff;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::blog::{Post, PostStatus, Tag, TagId};
use crate::infrastructure::blog::CreatePostRequest;

pub fn create_posts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_posts).post(create_post))
        .route("/{slug}", get(get_post).delete(delete_post))
        .route("/{slug}/publish", post(publish_post))
}

pub fn create_tags_router() -> Router<AppState> {
    Router::new().route("/", get(list_tags).post(create_tag))
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub slug: String,
    pub status: PostStatus,
    pub tags: Vec<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Post> for PostResponse {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id().value(),
            author_id: post.author_id().value(),
            title: post.title().to_string(),
            content: post.content().to_string(),
            slug: post.slug().to_string(),
            status: post.status(),
            tags: post.tags().iter().map(TagId::value).collect(),
            created_at: post.created_at().to_rfc3339(),
            updated_at: post.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
}

impl From<&Tag> for TagResponse {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id().value(),
            name: tag.name().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePostBody {
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<i64>,
    #[serde(default)]
    pub status: PostStatus,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTagBody {
    pub name: String,
}

/// GET /api/posts
pub async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = state
        .blog_service
        .list_posts(Some(PostStatus::Published))
        .await?;

    Ok(Json(posts.iter().map(PostResponse::from).collect()))
}

/// GET /api/posts/{slug}
///
/// Drafts are reported as missing.
pub async fn get_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state
        .blog_service
        .get_post(&slug)
        .await?
        .filter(Post::is_published)
        .ok_or_else(|| ApiError::not_found(format!("Post '{}' not found", slug)))?;

    Ok(Json(PostResponse::from(&post)))
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    RequireStaff(author): RequireStaff,
    Json(body): Json<CreatePostBody>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let request = CreatePostRequest {
        author_id: author.id(),
        title: body.title,
        content: body.content,
        tags: body.tags.into_iter().map(TagId::new).collect(),
        status: body.status,
        slug: body.slug,
    };

    let post = state.blog_service.create_post(request).await?;

    Ok((StatusCode::CREATED, Json(PostResponse::from(&post))))
}

/// POST /api/posts/{slug}/publish
pub async fn publish_post(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(slug): Path<String>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state.blog_service.publish(&slug).await?;

    Ok(Json(PostResponse::from(&post)))
}

/// DELETE /api/posts/{slug}
pub async fn delete_post(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(slug): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.blog_service.delete_post(&slug).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Post '{}' not found", slug)))
    }
}

/// GET /api/tags
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagResponse>>, ApiError> {
    let tags = state.blog_service.list_tags().await?;

    Ok(Json(tags.iter().map(TagResponse::from).collect()))
}

/// POST /api/tags
pub async fn create_tag(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Json(body): Json<CreateTagBody>,
) -> Result<(StatusCode, Json<TagResponse>), ApiError> {
    let tag = state.blog_service.create_tag(&body.name).await?;

    Ok((StatusCode::CREATED, Json(TagResponse::from(&tag))))
}
