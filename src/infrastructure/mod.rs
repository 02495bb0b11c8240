//! Infrastructure layer - Storage backends, hashing and services

pub mod blog;
pub mod logging;
pub mod storage;
pub mod user;
