//! User registration and status endpoints

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::{RegisterRequest, RegisterResponse, UserStatusResponse};
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/users/register
/// Creates a new user and returns the token
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Option<RegisterRequest>>,
) -> Result<Json<RegisterResponse>> {
    let name = payload.and_then(|p| p.name);
    let user = state.db.create_user(name.as_deref()).await?;

    tracing::info!("Registered new user: {}", user.id);

    Ok(Json(RegisterResponse {
        user_id: user.id,
        token: user.token,
    }))
}

/// GET /api/users/status
/// Returns user status
pub async fn status(
    Extension(auth): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<UserStatusResponse>> {
    let user = state
        .db
        .get_user_by_token(&auth.token)
        .await?
        .ok_or_else(|| crate::error::ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(UserStatusResponse {
        user_id: user.id,
        last_seen_at: user.last_seen_at,
    }))
}
