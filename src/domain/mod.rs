//! Domain layer - Core business logic and entities

pub mod blog;
pub mod error;
pub mod user;

pub use blog::{NewPost, Post, PostId, PostRepository, PostStatus, Tag, TagId, TagRepository};
pub use error::DomainError;
pub use user::{CreateUserFields, NewUser, User, UserId, UserRepository, UserValidationError};
