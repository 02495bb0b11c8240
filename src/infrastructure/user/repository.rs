//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, User>,
    /// email -> user ID
    email_index: HashMap<String, UserId>,
    last_id: i64,
}

/// In-memory implementation of UserRepository
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables.read().await;

        Ok(tables
            .email_index
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;

        if tables.email_index.contains_key(&user.email) {
            return Err(DomainError::conflict(format!(
                "User with email '{}' already exists",
                user.email
            )));
        }

        tables.last_id += 1;
        let id = UserId::new(tables.last_id);
        let user = user.into_user(id);

        tables.email_index.insert(user.email().to_string(), id);
        tables.users.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut tables = self.tables.write().await;
        let id = user.id();

        let old_email = match tables.users.get(&id) {
            Some(existing) => existing.email().to_string(),
            None => return Err(DomainError::not_found(format!("User '{}' not found", id))),
        };

        if old_email != user.email() {
            if tables.email_index.contains_key(user.email()) {
                return Err(DomainError::conflict(format!(
                    "User with email '{}' already exists",
                    user.email()
                )));
            }

            tables.email_index.remove(&old_email);
            tables.email_index.insert(user.email().to_string(), id);
        }

        tables.users.insert(id, user.clone());

        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut tables = self.tables.write().await;

        match tables.users.remove(&id) {
            Some(user) => {
                tables.email_index.remove(user.email());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().cloned().collect())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.users.len())
    }

    async fn record_login(&self, id: UserId) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;

        match tables.users.get_mut(&id) {
            Some(user) => {
                user.record_login();
                Ok(())
            }
            None => Err(DomainError::not_found(format!("User '{}' not found", id))),
        }
    }
}
