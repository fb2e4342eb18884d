//! Statistics endpoint

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;

use crate::error::Result;
use crate::models::{ReviewStats, StatsQuery};
use crate::routes::auth::AuthenticatedUser;
use crate::services::stats;
use crate::AppState;

/// Default trailing window for statistics, in days.
const DEFAULT_WINDOW_DAYS: i64 = 30;

/// GET /api/review/stats
pub async fn get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<ReviewStats>> {
    let window_days = query.days.unwrap_or(DEFAULT_WINDOW_DAYS).max(1);

    let stats = stats::review_stats(&state.db, auth.user_id, window_days, Utc::now()).await;

    Ok(Json(stats))
}
