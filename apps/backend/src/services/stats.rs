//! Statistics aggregator over the attempt log.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::db::Database;
use crate::models::{PuzzleAttempt, ReviewStats};

/// Summarize a user's attempts over a trailing window.
///
/// Persistence failures degrade to all-zero stats instead of an error
/// so a dashboard read never takes the page down.
pub async fn review_stats(
    db: &Database,
    user_id: Uuid,
    window_days: i64,
    now: DateTime<Utc>,
) -> ReviewStats {
    let cutoff = now - Duration::days(window_days);

    match db.get_attempts_since(user_id, cutoff).await {
        Ok(attempts) => compute_stats(&attempts, now),
        Err(err) => {
            tracing::warn!(user = %user_id, error = %err, "stats query failed, returning zeroes");
            ReviewStats::default()
        }
    }
}

/// Pure aggregation over a slice of attempt records.
fn compute_stats(attempts: &[PuzzleAttempt], now: DateTime<Utc>) -> ReviewStats {
    let total_attempts = attempts.len();
    let correct_attempts = attempts.iter().filter(|a| a.was_correct).count();

    let accuracy_rate = if total_attempts > 0 {
        correct_attempts as f64 / total_attempts as f64
    } else {
        0.0
    };

    let average_attempts = if total_attempts > 0 {
        attempts.iter().map(|a| a.attempt_number as f64).sum::<f64>() / total_attempts as f64
    } else {
        0.0
    };

    let midnight = now.date_naive().and_time(chrono::NaiveTime::MIN).and_utc();
    let reviews_today = attempts.iter().filter(|a| a.created_at >= midnight).count();

    ReviewStats {
        total_attempts,
        correct_attempts,
        accuracy_rate,
        average_attempts,
        reviews_today,
    }
}
