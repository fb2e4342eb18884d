//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{ApiError, Result};

// Re-export shared types from review-core
pub use review_core::types::{Algorithm, ReviewInput, ReviewResult, SchedulerConfig};

// === Database Entity Types ===

/// Registered user identity. Auth proper lives outside this service;
/// we only resolve a bearer token to a user id.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub token: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Review queue entry: one deviation's spaced-repetition state.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewItem {
    pub id: Uuid,
    pub user_id: Uuid,
    pub deviation_id: Uuid,
    pub algorithm_type: String,
    pub ease_factor: f64,
    pub interval_days: f64,
    pub consecutive_successes: i32,
    pub total_reviews: i32,
    pub next_review_at: DateTime<Utc>,
    pub last_reviewed_at: Option<DateTime<Utc>>,
    pub difficulty_level: i32,
    pub created_at: DateTime<Utc>,
}

impl ReviewItem {
    /// Parse the stored algorithm tag.
    pub fn algorithm(&self) -> Result<Algorithm> {
        Algorithm::parse(&self.algorithm_type).ok_or_else(|| {
            ApiError::UnknownAlgorithm(review_core::AlgorithmError::UnknownAlgorithm(
                self.algorithm_type.clone(),
            ))
        })
    }

    /// Build the scheduler input for an attempt against this item.
    pub fn to_review_input(&self, was_correct: bool, attempts: u32) -> ReviewInput {
        ReviewInput {
            was_correct,
            attempts,
            current_ease_factor: self.ease_factor,
            current_interval_days: self.interval_days,
            consecutive_successes: self.consecutive_successes.max(0) as u32,
            review_count: self.total_reviews.max(0) as u32,
            difficulty_level: self.difficulty_level.max(1) as u32,
        }
    }
}

/// Append-only attempt log entry. Never mutated after insert.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PuzzleAttempt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub deviation_id: Uuid,
    pub attempt_number: i32,
    pub was_correct: bool,
    pub response_time_ms: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Per-user algorithm configuration in PostgreSQL.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAlgorithmConfig {
    pub user_id: Uuid,
    pub algorithm_type: String,
    pub max_daily_reviews: i32,
    pub target_retention_rate: f64,
    pub initial_ease_factor: f64,
    pub ease_adjustment_factor: f64,
    pub minimum_interval_hours: f64,
    pub maximum_interval_days: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbAlgorithmConfig {
    /// Documented defaults, seeded at account registration.
    pub fn default_for_user(user_id: Uuid) -> Self {
        Self {
            user_id,
            algorithm_type: Algorithm::Sm2Plus.as_str().to_string(),
            max_daily_reviews: 20,
            target_retention_rate: 0.9,
            initial_ease_factor: 2.5,
            ease_adjustment_factor: 0.15,
            minimum_interval_hours: 1.0,
            maximum_interval_days: 365.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Parse the stored algorithm tag.
    pub fn algorithm(&self) -> Result<Algorithm> {
        Algorithm::parse(&self.algorithm_type).ok_or_else(|| {
            ApiError::UnknownAlgorithm(review_core::AlgorithmError::UnknownAlgorithm(
                self.algorithm_type.clone(),
            ))
        })
    }

    /// Extract the pure scheduler parameters.
    pub fn to_scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            target_retention_rate: self.target_retention_rate,
            initial_ease_factor: self.initial_ease_factor,
            ease_adjustment_factor: self.ease_adjustment_factor,
            minimum_interval_hours: self.minimum_interval_hours,
            maximum_interval_days: self.maximum_interval_days,
        }
    }

    /// Convert to the API configuration shape.
    pub fn to_api_config(&self) -> AlgorithmConfig {
        AlgorithmConfig {
            algorithm_type: Algorithm::parse(&self.algorithm_type).unwrap_or_default(),
            max_daily_reviews: self.max_daily_reviews.max(0) as u32,
            target_retention_rate: self.target_retention_rate,
            initial_ease_factor: self.initial_ease_factor,
            ease_adjustment_factor: self.ease_adjustment_factor,
            minimum_interval_hours: self.minimum_interval_hours,
            maximum_interval_days: self.maximum_interval_days,
        }
    }
}

/// Position data for one deviation, served by the Position Store.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DeviationPosition {
    pub id: Uuid,
    pub position_fen: String,
    pub expected_move: String,
    pub actual_move: String,
    pub move_number: i32,
    pub color: String,
    pub opening_name: Option<String>,
    pub previous_position_fen: Option<String>,
}

/// Renderable puzzle: a due queue entry joined with its position data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Puzzle {
    pub id: Uuid,
    pub deviation_id: Uuid,
    pub position_fen: String,
    pub expected_move: String,
    pub actual_move: String,
    pub move_number: i32,
    pub color: String,
    pub opening_name: Option<String>,
    pub previous_position_fen: Option<String>,
    pub difficulty_level: i32,
    pub ease_factor: f64,
    pub interval_days: f64,
    pub consecutive_successes: i32,
    pub total_reviews: i32,
    pub algorithm_type: String,
}

impl Puzzle {
    /// Assemble from a queue entry and its position record.
    pub fn from_parts(item: &ReviewItem, position: &DeviationPosition) -> Self {
        Self {
            id: item.id,
            deviation_id: item.deviation_id,
            position_fen: position.position_fen.clone(),
            expected_move: position.expected_move.clone(),
            actual_move: position.actual_move.clone(),
            move_number: position.move_number,
            color: position.color.clone(),
            opening_name: position.opening_name.clone(),
            previous_position_fen: position.previous_position_fen.clone(),
            difficulty_level: item.difficulty_level,
            ease_factor: item.ease_factor,
            interval_days: item.interval_days,
            consecutive_successes: item.consecutive_successes,
            total_reviews: item.total_reviews,
            algorithm_type: item.algorithm_type.clone(),
        }
    }
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AccountStatusResponse {
    pub user_id: Uuid,
    pub last_seen_at: DateTime<Utc>,
}

// Queue types

#[derive(Debug, Serialize, Deserialize)]
pub struct QueueQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueueResponse {
    pub puzzles: Vec<Puzzle>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetQueueResponse {
    pub created: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EnqueueDeviationRequest {
    pub deviation_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EnqueueDeviationResponse {
    pub created: bool,
}

// Attempt types

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordAttemptRequest {
    pub item_id: Uuid,
    /// Tries it took to solve this puzzle (1 = first try).
    pub attempt_number: i32,
    pub was_correct: bool,
    pub response_time_ms: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordAttemptResponse {
    pub next_review_at: DateTime<Utc>,
    pub ease_factor: f64,
    pub interval_days: f64,
    pub consecutive_successes: i32,
    pub total_reviews: i32,
}

// Config types

/// API configuration shape, mirrored by `spaced_repetition_config`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmConfig {
    pub algorithm_type: Algorithm,
    pub max_daily_reviews: u32,
    pub target_retention_rate: f64,
    pub initial_ease_factor: f64,
    pub ease_adjustment_factor: f64,
    pub minimum_interval_hours: f64,
    pub maximum_interval_days: f64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdateConfigRequest {
    pub algorithm_type: Option<Algorithm>,
    pub max_daily_reviews: Option<i32>,
    pub target_retention_rate: Option<f64>,
    pub initial_ease_factor: Option<f64>,
    pub ease_adjustment_factor: Option<f64>,
    pub minimum_interval_hours: Option<f64>,
    pub maximum_interval_days: Option<f64>,
}

// Stats types

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total_attempts: usize,
    pub correct_attempts: usize,
    pub accuracy_rate: f64,
    pub average_attempts: f64,
    pub reviews_today: usize,
}
