//! PostgreSQL database operations

use chrono::{DateTime, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool.
///
/// Injected explicitly wherever persistence is needed; there is no
/// ambient client or shared auth token.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(std::time::Duration::from_secs(10))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Create a new user with generated token
    pub async fn create_user(&self, name: Option<&str>) -> Result<User> {
        let token = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (token, name)
            VALUES ($1, $2)
            RETURNING id, token, name, created_at, last_seen_at
            "#,
        )
        .bind(&token)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    /// Get user by token
    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, token, name, created_at, last_seen_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user last_seen_at timestamp
    pub async fn update_last_seen(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Review Queue Repository ===

    /// Get a review queue entry by id, scoped to its owner
    pub async fn get_review_item(&self, item_id: Uuid, user_id: Uuid) -> Result<Option<ReviewItem>> {
        let item = sqlx::query_as::<_, ReviewItem>(
            r#"
            SELECT id, user_id, deviation_id, algorithm_type, ease_factor, interval_days,
                   consecutive_successes, total_reviews, next_review_at, last_reviewed_at,
                   difficulty_level, created_at
            FROM review_queue
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(item_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Get due queue entries, oldest due first
    pub async fn get_due_items(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<ReviewItem>> {
        let items = sqlx::query_as::<_, ReviewItem>(
            r#"
            SELECT id, user_id, deviation_id, algorithm_type, ease_factor, interval_days,
                   consecutive_successes, total_reviews, next_review_at, last_reviewed_at,
                   difficulty_level, created_at
            FROM review_queue
            WHERE user_id = $1 AND next_review_at <= $2
            ORDER BY next_review_at ASC
            LIMIT $3
            "#,
        )
        .bind(user_id)
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Insert a fresh queue entry for a newly detected deviation.
    ///
    /// Idempotent on (user_id, deviation_id): the deviation discovery
    /// batch job can race with an active session, so a duplicate insert
    /// is a no-op rather than an error. Returns whether a row was
    /// actually created.
    pub async fn insert_review_item(
        &self,
        user_id: Uuid,
        deviation_id: Uuid,
        algorithm_type: &str,
        init: &ReviewResult,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO review_queue (user_id, deviation_id, algorithm_type, ease_factor,
                                      interval_days, consecutive_successes, total_reviews,
                                      next_review_at)
            VALUES ($1, $2, $3, $4, $5, $6, 0, $7)
            ON CONFLICT (user_id, deviation_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(deviation_id)
        .bind(algorithm_type)
        .bind(init.new_ease_factor)
        .bind(init.new_interval_days)
        .bind(init.consecutive_successes as i32)
        .bind(init.next_review_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Append an attempt and apply the computed scheduling state to the
    /// queue entry in a single transaction.
    ///
    /// Both writes commit or roll back together: a logged attempt
    /// without its schedule update would leave the item stuck due.
    pub async fn record_attempt_txn(
        &self,
        attempt: &RecordAttemptRequest,
        item: &ReviewItem,
        result: &ReviewResult,
        now: DateTime<Utc>,
    ) -> Result<ReviewItem> {
        let mut txn = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO puzzle_attempts (user_id, deviation_id, attempt_number,
                                         was_correct, response_time_ms)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(item.user_id)
        .bind(item.deviation_id)
        .bind(attempt.attempt_number)
        .bind(attempt.was_correct)
        .bind(attempt.response_time_ms)
        .execute(&mut *txn)
        .await?;

        let updated = sqlx::query_as::<_, ReviewItem>(
            r#"
            UPDATE review_queue
            SET next_review_at = $1,
                ease_factor = $2,
                interval_days = $3,
                consecutive_successes = $4,
                total_reviews = total_reviews + 1,
                last_reviewed_at = $5
            WHERE id = $6 AND user_id = $7
            RETURNING id, user_id, deviation_id, algorithm_type, ease_factor, interval_days,
                      consecutive_successes, total_reviews, next_review_at, last_reviewed_at,
                      difficulty_level, created_at
            "#,
        )
        .bind(result.next_review_at)
        .bind(result.new_ease_factor)
        .bind(result.new_interval_days)
        .bind(result.consecutive_successes as i32)
        .bind(now)
        .bind(item.id)
        .bind(item.user_id)
        .fetch_optional(&mut *txn)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Review item {}", item.id)))?;

        txn.commit().await?;

        Ok(updated)
    }

    /// Delete all of a user's queue entries and recreate one fresh
    /// entry per eligible deviation, atomically. Returns the number of
    /// entries created.
    pub async fn reset_queue_txn(
        &self,
        user_id: Uuid,
        algorithm_type: &str,
        init: &ReviewResult,
    ) -> Result<usize> {
        let mut txn = self.pool.begin().await?;

        sqlx::query(
            r#"
            DELETE FROM review_queue
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(&mut *txn)
        .await?;

        let result = sqlx::query(
            r#"
            INSERT INTO review_queue (user_id, deviation_id, algorithm_type, ease_factor,
                                      interval_days, consecutive_successes, total_reviews,
                                      next_review_at)
            SELECT $1, d.id, $2, $3, $4, $5, 0, $6
            FROM opening_deviations d
            WHERE d.user_id = $1 AND d.first_deviator = 'user'
            "#,
        )
        .bind(user_id)
        .bind(algorithm_type)
        .bind(init.new_ease_factor)
        .bind(init.new_interval_days)
        .bind(init.consecutive_successes as i32)
        .bind(init.next_review_at)
        .execute(&mut *txn)
        .await?;

        txn.commit().await?;

        Ok(result.rows_affected() as usize)
    }

    // === Attempt Repository ===

    /// Get attempts recorded since a cutoff
    pub async fn get_attempts_since(
        &self,
        user_id: Uuid,
        since: DateTime<Utc>,
    ) -> Result<Vec<PuzzleAttempt>> {
        let attempts = sqlx::query_as::<_, PuzzleAttempt>(
            r#"
            SELECT id, user_id, deviation_id, attempt_number, was_correct,
                   response_time_ms, created_at
            FROM puzzle_attempts
            WHERE user_id = $1 AND created_at >= $2
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        Ok(attempts)
    }

    // === Config Repository ===

    /// Get a user's algorithm configuration
    pub async fn get_config(&self, user_id: Uuid) -> Result<Option<DbAlgorithmConfig>> {
        let config = sqlx::query_as::<_, DbAlgorithmConfig>(
            r#"
            SELECT user_id, algorithm_type, max_daily_reviews, target_retention_rate,
                   initial_ease_factor, ease_adjustment_factor, minimum_interval_hours,
                   maximum_interval_days, created_at, updated_at
            FROM spaced_repetition_config
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(config)
    }

    /// Seed the documented defaults for a user if absent
    pub async fn insert_default_config(&self, user_id: Uuid) -> Result<()> {
        let defaults = DbAlgorithmConfig::default_for_user(user_id);
        sqlx::query(
            r#"
            INSERT INTO spaced_repetition_config (user_id, algorithm_type, max_daily_reviews,
                                                  target_retention_rate, initial_ease_factor,
                                                  ease_adjustment_factor, minimum_interval_hours,
                                                  maximum_interval_days)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(&defaults.algorithm_type)
        .bind(defaults.max_daily_reviews)
        .bind(defaults.target_retention_rate)
        .bind(defaults.initial_ease_factor)
        .bind(defaults.ease_adjustment_factor)
        .bind(defaults.minimum_interval_hours)
        .bind(defaults.maximum_interval_days)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Upsert a user's algorithm configuration
    pub async fn upsert_config(&self, config: &DbAlgorithmConfig) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO spaced_repetition_config (user_id, algorithm_type, max_daily_reviews,
                                                  target_retention_rate, initial_ease_factor,
                                                  ease_adjustment_factor, minimum_interval_hours,
                                                  maximum_interval_days)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id) DO UPDATE SET
                algorithm_type = EXCLUDED.algorithm_type,
                max_daily_reviews = EXCLUDED.max_daily_reviews,
                target_retention_rate = EXCLUDED.target_retention_rate,
                initial_ease_factor = EXCLUDED.initial_ease_factor,
                ease_adjustment_factor = EXCLUDED.ease_adjustment_factor,
                minimum_interval_hours = EXCLUDED.minimum_interval_hours,
                maximum_interval_days = EXCLUDED.maximum_interval_days,
                updated_at = NOW()
            "#,
        )
        .bind(config.user_id)
        .bind(&config.algorithm_type)
        .bind(config.max_daily_reviews)
        .bind(config.target_retention_rate)
        .bind(config.initial_ease_factor)
        .bind(config.ease_adjustment_factor)
        .bind(config.minimum_interval_hours)
        .bind(config.maximum_interval_days)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Position Store ===

    /// Fetch position data for a set of deviations, restricted to those
    /// where the user was the first to deviate.
    pub async fn get_positions(
        &self,
        user_id: Uuid,
        deviation_ids: &[Uuid],
    ) -> Result<Vec<DeviationPosition>> {
        let positions = sqlx::query_as::<_, DeviationPosition>(
            r#"
            SELECT id, position_fen, expected_move, actual_move, move_number,
                   color, opening_name, previous_position_fen
            FROM opening_deviations
            WHERE user_id = $1 AND id = ANY($2) AND first_deviator = 'user'
            "#,
        )
        .bind(user_id)
        .bind(deviation_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(positions)
    }
}
