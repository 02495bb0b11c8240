//! Account registration and staff-only account administration

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};

use crate::api::middleware::RequireStaff;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, UserResponse};
use crate::domain::user::{CreateUserFields, UserId};

pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(register))
        .route("/{id}", get(get_user).delete(delete_user))
}

/// Register a regular account
///
/// POST /api/users
///
/// Staff and superuser flags can only be granted from the CLI.
pub async fn register(
    State(state): State<AppState>,
    Json(fields): Json<CreateUserFields>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    if fields.is_staff.is_some() || fields.is_superuser.is_some() {
        return Err(ApiError::forbidden(
            "Staff and superuser flags cannot be set at registration",
        ));
    }

    let user = state.user_manager.create_user(fields).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    _staff: RequireStaff,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.user_manager.list().await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_manager
        .get(UserId::new(id))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User '{}' not found", id)))?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/users/{id}
///
/// Authors of blog posts are refused with 409.
pub async fn delete_user(
    State(state): State<AppState>,
    _staff: RequireStaff,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    if state.blog_service.delete_author(UserId::new(id)).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("User '{}' not found", id)))
    }
}
