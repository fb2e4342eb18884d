//! Algorithm configuration endpoints

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::{AlgorithmConfig, UpdateConfigRequest};
use crate::routes::auth::AuthenticatedUser;
use crate::services::config;
use crate::AppState;

/// GET /api/review/config
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<AlgorithmConfig>> {
    let current = config::get_config(&state.db, auth.user_id).await?;

    Ok(Json(current.to_api_config()))
}

/// PUT /api/review/config
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(request): Json<UpdateConfigRequest>,
) -> Result<Json<AlgorithmConfig>> {
    let updated = config::update_config(&state.db, auth.user_id, &request).await?;

    Ok(Json(updated.to_api_config()))
}
