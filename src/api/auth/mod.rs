//! Authentication API endpoints

use axum::{extract::State, routing::post, Router};
use serde::Deserialize;
use tracing::info;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, UserResponse};

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Check credentials and record the login
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .user_manager
        .authenticate(&request.email, &request.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    info!(user_id = %user.id(), "User logged in");

    Ok(Json(UserResponse::from(&user)))
}
