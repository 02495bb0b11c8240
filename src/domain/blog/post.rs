//! Post entity and related types

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::slug::slugify;
use super::tag::TagId;
use crate::domain::user::UserId;

pub const MAX_TITLE_LENGTH: usize = 255;

/// Store-assigned post identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(i64);

impl PostId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Publication state of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PostStatus {
    #[default]
    #[serde(rename = "draft")]
    Draft,
    #[serde(rename = "pub")]
    Published,
}

impl PostStatus {
    /// Stored code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "pub",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Published => "Published",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "pub" => Some(Self::Published),
            _ => None,
        }
    }
}

/// Post fields before the store assigns an identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub tags: BTreeSet<TagId>,
    pub status: PostStatus,
    pub slug: String,
}

impl NewPost {
    pub fn new(author_id: UserId, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author_id,
            title: title.into(),
            content: content.into(),
            tags: BTreeSet::new(),
            status: PostStatus::Draft,
            slug: String::new(),
        }
    }

    /// Fill a blank slug from the title
    pub fn ensure_slug(&mut self) {
        if self.slug.trim().is_empty() {
            self.slug = slugify(&self.title);
        }
    }

    pub fn into_post(self, id: PostId) -> Post {
        let now = Utc::now();

        Post {
            id,
            author_id: self.author_id,
            title: self.title,
            content: self.content,
            tags: self.tags,
            status: self.status,
            slug: self.slug,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Blog post written by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    id: PostId,
    author_id: UserId,
    title: String,
    content: String,
    tags: BTreeSet<TagId>,
    status: PostStatus,
    slug: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Post {
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: PostId,
        author_id: UserId,
        title: String,
        content: String,
        tags: BTreeSet<TagId>,
        status: PostStatus,
        slug: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            author_id,
            title,
            content,
            tags,
            status,
            slug,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> PostId {
        self.id
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn tags(&self) -> &BTreeSet<TagId> {
        &self.tags
    }

    pub fn status(&self) -> PostStatus {
        self.status
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    pub fn publish(&mut self) {
        self.status = PostStatus::Published;
        self.touch();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.touch();
    }

    pub fn set_tags(&mut self, tags: BTreeSet<TagId>) {
        self.tags = tags;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
