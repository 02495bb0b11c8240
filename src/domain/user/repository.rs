//! User repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

/// Record store for users
///
/// Implementations enforce email uniqueness and assign identifiers.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a user by ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Get a user by email (login lookup)
    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Persist a new user and return it with its assigned ID
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Update an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Delete a user, returning whether it existed
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;

    /// List all users ordered by ID
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Count all users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Check whether any user exists
    async fn exists(&self) -> Result<bool, DomainError> {
        Ok(self.count().await? > 0)
    }

    /// Check whether an email is already taken
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_email(email).await?.is_some())
    }

    /// Record a login for a user
    async fn record_login(&self, id: UserId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_user_repository() {
        let mut mock = MockUserRepository::new();

        mock.expect_count().returning(|| Ok(0));

        assert_eq!(mock.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mock_create_failure() {
        let mut mock = MockUserRepository::new();

        mock.expect_create()
            .returning(|_| Err(DomainError::storage("disk full")));

        let result = mock.create(NewUser::new("a@b.co", "hash")).await;
        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
