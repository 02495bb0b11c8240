//! Studio Fard accounts and blog service
//!
//! Email-based user accounts with validated credentials, a small blog with
//! posts and tags, and an HTTP API over both:
//! - In-memory or PostgreSQL storage
//! - Argon2 password hashing
//! - Staff-only writes over HTTP Basic authentication

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use config::StorageBackend;
use infrastructure::{
    blog::{PostgresPostRepository, PostgresTagRepository},
    storage::{self, run_storage_migrations},
    user::{Argon2Hasher, PostgresUserRepository},
};
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state for the configured storage backend
///
/// The PostgreSQL backend applies pending migrations before serving.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    info!("Storage backend: {:?}", config.storage.backend);

    match config.storage.backend {
        StorageBackend::Memory => Ok(AppState::in_memory()),
        StorageBackend::Postgres => {
            let pool = connect_postgres(config).await?;

            run_storage_migrations(&pool).await?;

            Ok(AppState::from_repositories(
                Arc::new(PostgresUserRepository::new(pool.clone())),
                Arc::new(PostgresPostRepository::new(pool.clone())),
                Arc::new(PostgresTagRepository::new(pool)),
                Arc::new(Argon2Hasher::new()),
            ))
        }
    }
}

/// Open the PostgreSQL pool described by the configuration
pub async fn connect_postgres(config: &AppConfig) -> anyhow::Result<sqlx::PgPool> {
    let pg_config = config.postgres_config().ok_or_else(|| {
        anyhow::anyhow!("database.url or the DATABASE_URL environment variable is required")
    })?;

    info!("Connecting to PostgreSQL...");
    let pool = storage::connect(&pg_config).await?;
    info!("PostgreSQL connection established");

    Ok(pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_state_uses_memory_backend() {
        let state = create_app_state().await.unwrap();

        assert_eq!(state.user_manager.count().await.unwrap(), 0);
        assert!(state.blog_service.list_tags().await.unwrap().is_empty());
    }
}
