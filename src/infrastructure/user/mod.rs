//! User infrastructure module
//!
//! Password hashing with Argon2, in-memory and PostgreSQL repositories, and
//! the user manager that creates and authenticates accounts.

mod manager;
mod password;
mod postgres_repository;
mod repository;

pub use manager::UserManager;
pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
