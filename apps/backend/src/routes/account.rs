//! Account registration and status endpoints

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::{AccountStatusResponse, RegisterRequest, RegisterResponse};
use crate::routes::auth::AuthenticatedUser;
use crate::services::config;
use crate::AppState;

/// POST /api/account/register
/// Creates a new user, seeds the default algorithm config, returns the token
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Option<RegisterRequest>>,
) -> Result<Json<RegisterResponse>> {
    let name = payload.and_then(|p| p.name);
    let user = state.db.create_user(name.as_deref()).await?;

    config::ensure_config(&state.db, user.id).await?;

    tracing::info!("Registered new user: {}", user.id);

    Ok(Json(RegisterResponse {
        user_id: user.id,
        token: user.token,
    }))
}

/// GET /api/account/status
pub async fn status(
    Extension(auth): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<AccountStatusResponse>> {
    let user = state
        .db
        .get_user_by_token(&auth.token)
        .await?
        .ok_or_else(|| crate::error::ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(AccountStatusResponse {
        user_id: user.id,
        last_seen_at: user.last_seen_at,
    }))
}
