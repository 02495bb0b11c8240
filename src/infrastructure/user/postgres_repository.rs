//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};

use crate::domain::user::{NewUser, User, UserId, UserRepository};
use crate::domain::DomainError;
use crate::infrastructure::storage::{is_foreign_key_violation, is_unique_violation};

const USER_COLUMNS: &str = "id, email, password_hash, first_name, last_name, is_active, \
                            is_staff, is_superuser, created_at, updated_at, last_login_at";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get user by email: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (email, password_hash, first_name, last_name,
                               is_active, is_staff, is_superuser)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.is_active)
        .bind(user.is_staff)
        .bind(user.is_superuser)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| write_error(e, &user.email, "create"))?;

        row_to_user(&row)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, first_name = $4, last_name = $5,
                is_active = $6, is_staff = $7, is_superuser = $8,
                updated_at = $9, last_login_at = $10
            WHERE id = $1
            "#,
        )
        .bind(user.id().value())
        .bind(user.email())
        .bind(user.password_hash())
        .bind(user.first_name())
        .bind(user.last_name())
        .bind(user.is_active())
        .bind(user.is_staff())
        .bind(user.is_superuser())
        .bind(user.updated_at())
        .bind(user.last_login_at())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, user.email(), "update"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("User '{}' not found", user.id())));
        }

        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| delete_error(e, id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let rows = sqlx::query(&format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list users: {}", e)))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }

    async fn exists(&self) -> Result<bool, DomainError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users)")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to check users: {}", e)))
    }

    async fn record_login(&self, id: UserId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to record login: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        Ok(())
    }
}

fn write_error(e: sqlx::Error, email: &str, action: &str) -> DomainError {
    if is_unique_violation(&e) {
        DomainError::conflict(format!("User with email '{}' already exists", email))
    } else {
        DomainError::storage(format!("Failed to {} user: {}", action, e))
    }
}

/// Posts reference their author with `ON DELETE RESTRICT`
fn delete_error(e: sqlx::Error, id: UserId) -> DomainError {
    if is_foreign_key_violation(&e) {
        DomainError::conflict(format!("User '{}' is still referenced by blog posts", id))
    } else {
        DomainError::storage(format!("Failed to delete user: {}", e))
    }
}

fn row_to_user(row: &sqlx::postgres::PgRow) -> Result<User, DomainError> {
    let read = |e: sqlx::Error| DomainError::storage(format!("Invalid user row: {}", e));

    let id: i64 = row.try_get("id").map_err(read)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(read)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(read)?;
    let last_login_at: Option<DateTime<Utc>> = row.try_get("last_login_at").map_err(read)?;

    Ok(User::from_parts(
        UserId::new(id),
        row.try_get("email").map_err(read)?,
        row.try_get("password_hash").map_err(read)?,
        row.try_get("first_name").map_err(read)?,
        row.try_get("last_name").map_err(read)?,
        row.try_get("is_active").map_err(read)?,
        row.try_get("is_staff").map_err(read)?,
        row.try_get("is_superuser").map_err(read)?,
        created_at,
        updated_at,
        last_login_at,
    ))
}
