//! User domain
//!
//! This module provides domain types and traits for email-based user accounts,
//! including the user entity, field validation, creation arguments and the
//! repository trait.

mod entity;
mod fields;
mod repository;
mod validation;

pub use entity::{NewUser, User, UserId};
pub use fields::CreateUserFields;
pub use repository::UserRepository;
pub use validation::{
    normalize_email, validate_email, validate_password, UserValidationError, MIN_PASSWORD_LENGTH,
};

#[cfg(test)]
pub use repository::MockUserRepository;
