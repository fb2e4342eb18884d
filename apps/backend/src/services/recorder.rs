//! Attempt recorder: the only writer of review queue scheduling state.

use chrono::Utc;
use uuid::Uuid;

use review_core::scheduler_for;

use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::models::{RecordAttemptRequest, ReviewItem};
use crate::services::config;

/// Record one puzzle attempt: append the immutable log entry and apply
/// the scheduler's output to the queue entry, atomically.
pub async fn record_attempt(
    db: &Database,
    user_id: Uuid,
    request: &RecordAttemptRequest,
) -> Result<ReviewItem> {
    if request.attempt_number < 1 {
        return Err(ApiError::Validation(
            "attempt_number must be at least 1".to_string(),
        ));
    }

    let item = db
        .get_review_item(request.item_id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Review item {}", request.item_id)))?;

    let user_config = config::get_config(db, user_id).await?;

    let scheduler = scheduler_for(item.algorithm()?);
    let input = item.to_review_input(request.was_correct, request.attempt_number as u32);

    let now = Utc::now();
    let result = scheduler.schedule(&input, &user_config.to_scheduler_config(), now);

    let updated = db.record_attempt_txn(request, &item, &result, now).await?;

    tracing::debug!(
        item = %updated.id,
        scheduler = scheduler.name(),
        correct = request.was_correct,
        interval_days = result.new_interval_days,
        "recorded attempt"
    );

    Ok(updated)
}
