//! Blog infrastructure: repositories and service

mod in_memory;
mod postgres;
mod service;

pub use in_memory::{InMemoryPostRepository, InMemoryTagRepository};
pub use postgres::{PostgresPostRepository, PostgresTagRepository};
pub use service::{BlogService, CreatePostRequest};
