//! Review queue manager: due-item selection, position join,
//! deduplication, and the bulk reset operation.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use review_core::initialize_review_entry;

use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::models::Puzzle;
use crate::services::config;

/// Default batch size when the caller does not pass a limit.
pub const DEFAULT_QUEUE_LIMIT: i64 = 20;

/// Fetch due puzzles for a user, oldest due first.
///
/// The requested limit (default 20) is further capped by the user's
/// `max_daily_reviews` setting. Selected entries are joined with their
/// deviation position data and deduplicated.
pub async fn due_puzzles(
    db: &Database,
    user_id: Uuid,
    now: DateTime<Utc>,
    limit: Option<i64>,
) -> Result<Vec<Puzzle>> {
    let user_config = config::get_config(db, user_id).await?;

    let limit = limit
        .unwrap_or(DEFAULT_QUEUE_LIMIT)
        .clamp(1, user_config.max_daily_reviews.max(1) as i64);

    let items = db.get_due_items(user_id, now, limit).await?;
    if items.is_empty() {
        return Ok(Vec::new());
    }

    let deviation_ids: Vec<Uuid> = items.iter().map(|i| i.deviation_id).collect();
    let positions = db.get_positions(user_id, &deviation_ids).await?;

    let mut puzzles = Vec::with_capacity(items.len());
    for item in &items {
        let position = positions
            .iter()
            .find(|p| p.id == item.deviation_id)
            .ok_or_else(|| {
                ApiError::NotFound(format!("Deviation {} for queue item {}", item.deviation_id, item.id))
            })?;
        puzzles.push(Puzzle::from_parts(item, position));
    }

    Ok(dedup_puzzles(puzzles))
}

/// Collapse equivalent puzzles, keeping the first-seen instance.
///
/// Two puzzles are equivalent when they share position, expected move,
/// and color; differing actual moves still present the same training
/// question, so the later duplicates are dropped.
pub fn dedup_puzzles(puzzles: Vec<Puzzle>) -> Vec<Puzzle> {
    let mut seen = HashSet::new();
    puzzles
        .into_iter()
        .filter(|p| {
            seen.insert((
                p.position_fen.clone(),
                p.expected_move.clone(),
                p.color.clone(),
            ))
        })
        .collect()
}

/// Create a queue entry for a newly detected deviation, immediately
/// due. Idempotent: the deviation discovery batch can race an active
/// session, so enqueueing an already-tracked deviation is a no-op.
/// Returns whether an entry was created.
pub async fn enqueue_deviation(
    db: &Database,
    user_id: Uuid,
    deviation_id: Uuid,
    now: DateTime<Utc>,
) -> Result<bool> {
    let positions = db.get_positions(user_id, &[deviation_id]).await?;
    if positions.is_empty() {
        return Err(ApiError::NotFound(format!("Deviation {}", deviation_id)));
    }

    let user_config = config::get_config(db, user_id).await?;
    let algorithm = user_config.algorithm()?;

    let init = initialize_review_entry(algorithm, &user_config.to_scheduler_config(), now);

    let created = db
        .insert_review_item(user_id, deviation_id, algorithm.as_str(), &init)
        .await?;

    if created {
        tracing::debug!(user = %user_id, deviation = %deviation_id, "deviation enqueued");
    }

    Ok(created)
}

/// Delete and recreate the user's queue from the current set of
/// eligible deviations. Returns the number of entries created.
///
/// Not safe to run concurrently with attempt recording for the same
/// user; callers serialize the two operations.
pub async fn reset_queue(db: &Database, user_id: Uuid, now: DateTime<Utc>) -> Result<usize> {
    let user_config = config::get_config(db, user_id).await?;
    let algorithm = user_config.algorithm()?;

    let init = initialize_review_entry(algorithm, &user_config.to_scheduler_config(), now);

    let created = db
        .reset_queue_txn(user_id, algorithm.as_str(), &init)
        .await?;

    tracing::info!(user = %user_id, created, "review queue reset");

    Ok(created)
}
