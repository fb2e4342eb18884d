//! Review queue and attempt endpoints

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use chrono::Utc;

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::{queue, recorder};
use crate::AppState;

/// GET /api/review/queue
pub async fn due(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Query(query): Query<QueueQuery>,
) -> Result<Json<QueueResponse>> {
    let puzzles = queue::due_puzzles(&state.db, auth.user_id, Utc::now(), query.limit).await?;

    Ok(Json(QueueResponse { puzzles }))
}

/// POST /api/review/attempt
pub async fn attempt(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<RecordAttemptRequest>,
) -> Result<Json<RecordAttemptResponse>> {
    let updated = recorder::record_attempt(&state.db, auth.user_id, &payload).await?;

    Ok(Json(RecordAttemptResponse {
        next_review_at: updated.next_review_at,
        ease_factor: updated.ease_factor,
        interval_days: updated.interval_days,
        consecutive_successes: updated.consecutive_successes,
        total_reviews: updated.total_reviews,
    }))
}

/// POST /api/review/enqueue
pub async fn enqueue(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<EnqueueDeviationRequest>,
) -> Result<Json<EnqueueDeviationResponse>> {
    let created =
        queue::enqueue_deviation(&state.db, auth.user_id, payload.deviation_id, Utc::now()).await?;

    Ok(Json(EnqueueDeviationResponse { created }))
}

/// POST /api/review/reset
pub async fn reset(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<ResetQueueResponse>> {
    let created = queue::reset_queue(&state.db, auth.user_id, Utc::now()).await?;

    Ok(Json(ResetQueueResponse { created }))
}
