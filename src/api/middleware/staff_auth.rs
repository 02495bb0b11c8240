//! HTTP Basic authentication for staff-only endpoints

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::user::User;

/// Email and password taken from an `Authorization: Basic` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub email: String,
    pub password: String,
}

/// Extractor that requires an active staff account
///
/// Credentials are checked through the user manager on every request
/// without recording a login.
#[derive(Debug, Clone)]
pub struct RequireStaff(pub User);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let credentials = extract_basic_credentials(&parts.headers)?;

        let user = state
            .user_manager
            .verify_credentials(&credentials.email, &credentials.password)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

        if !user.is_staff() {
            debug!(user_id = %user.id(), "Rejected non-staff user");
            return Err(ApiError::forbidden("Staff access required"));
        }

        Ok(RequireStaff(user))
    }
}

/// Decode `Authorization: Basic base64(email:password)`
pub fn extract_basic_credentials(headers: &HeaderMap) -> Result<BasicCredentials, ApiError> {
    let Some(auth_header) = headers.get(header::AUTHORIZATION) else {
        return Err(ApiError::unauthorized(
            "Authentication required. Provide credentials via 'Authorization: Basic <base64>' header",
        ));
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::bad_request("Invalid Authorization header encoding"))?;

    let encoded = auth_str
        .strip_prefix("Basic ")
        .ok_or_else(|| ApiError::unauthorized("Unsupported authorization scheme"))?;

    let decoded = STANDARD
        .decode(encoded.trim())
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| ApiError::bad_request("Malformed Basic credentials"))?;

    let (email, password) = decoded
        .split_once(':')
        .ok_or_else(|| ApiError::bad_request("Malformed Basic credentials"))?;

    Ok(BasicCredentials {
        email: email.to_string(),
        password: password.to_string(),
    })
}
