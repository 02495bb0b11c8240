//! Storage infrastructure - PostgreSQL pool and schema migrations

pub mod migrations;
mod postgres;

pub use migrations::{run_storage_migrations, Migration, Migrator, PostgresMigrator};
pub use postgres::{connect, is_foreign_key_violation, is_unique_violation, PostgresConfig};

#[cfg(test)]
pub(crate) use postgres::test_support;
