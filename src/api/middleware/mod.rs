//! API middleware components

pub mod staff_auth;

pub use staff_auth::{extract_basic_credentials, BasicCredentials, RequireStaff};
