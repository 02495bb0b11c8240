//! Application state for shared services

use std::sync::Arc;

use crate::domain::blog::{PostRepository, TagRepository};
use crate::domain::user::UserRepository;
use crate::infrastructure::blog::{BlogService, InMemoryPostRepository, InMemoryTagRepository};
use crate::infrastructure::user::{Argon2Hasher, InMemoryUserRepository, PasswordHasher, UserManager};

/// Services shared by every handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub user_manager: UserManager,
    pub blog_service: BlogService,
}

impl AppState {
    pub fn new(user_manager: UserManager, blog_service: BlogService) -> Self {
        Self {
            user_manager,
            blog_service,
        }
    }

    /// Wire services over the given repositories
    pub fn from_repositories(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        tags: Arc<dyn TagRepository>,
        hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self::new(
            UserManager::new(users.clone(), hasher),
            BlogService::new(posts, tags, users),
        )
    }

    /// State backed by in-memory repositories
    pub fn in_memory() -> Self {
        Self::from_repositories(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryTagRepository::new()),
            Arc::new(Argon2Hasher),
        )
    }
}
