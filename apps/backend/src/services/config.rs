//! Configuration service: per-user algorithm parameters.
//!
//! Defaults are seeded once at account registration via
//! [`ensure_config`]; [`get_config`] is a pure read and surfaces
//! `NotFound` instead of lazily creating rows.

use uuid::Uuid;

use crate::db::Database;
use crate::error::{ApiError, Result};
use crate::models::{DbAlgorithmConfig, UpdateConfigRequest};

/// Seed the documented defaults for a user if no config exists yet.
/// Idempotent; called at account registration.
pub async fn ensure_config(db: &Database, user_id: Uuid) -> Result<()> {
    db.insert_default_config(user_id).await
}

/// Read a user's configuration.
pub async fn get_config(db: &Database, user_id: Uuid) -> Result<DbAlgorithmConfig> {
    db.get_config(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Algorithm config for user {}", user_id)))
}

/// Apply a partial update after validating the numeric bounds.
pub async fn update_config(
    db: &Database,
    user_id: Uuid,
    request: &UpdateConfigRequest,
) -> Result<DbAlgorithmConfig> {
    let mut current = get_config(db, user_id).await?;

    if let Some(algorithm_type) = request.algorithm_type {
        current.algorithm_type = algorithm_type.as_str().to_string();
    }
    if let Some(max_daily_reviews) = request.max_daily_reviews {
        current.max_daily_reviews = max_daily_reviews;
    }
    if let Some(target_retention_rate) = request.target_retention_rate {
        current.target_retention_rate = target_retention_rate;
    }
    if let Some(initial_ease_factor) = request.initial_ease_factor {
        current.initial_ease_factor = initial_ease_factor;
    }
    if let Some(ease_adjustment_factor) = request.ease_adjustment_factor {
        current.ease_adjustment_factor = ease_adjustment_factor;
    }
    if let Some(minimum_interval_hours) = request.minimum_interval_hours {
        current.minimum_interval_hours = minimum_interval_hours;
    }
    if let Some(maximum_interval_days) = request.maximum_interval_days {
        current.maximum_interval_days = maximum_interval_days;
    }

    validate(&current)?;

    db.upsert_config(&current).await?;

    Ok(current)
}

/// Reject configurations outside sane bounds before they hit storage.
fn validate(config: &DbAlgorithmConfig) -> Result<()> {
    if config.max_daily_reviews < 1 {
        return Err(ApiError::Validation(
            "max_daily_reviews must be at least 1".to_string(),
        ));
    }
    if !(config.target_retention_rate > 0.0 && config.target_retention_rate < 1.0) {
        return Err(ApiError::Validation(
            "target_retention_rate must be in (0, 1)".to_string(),
        ));
    }
    if config.initial_ease_factor <= 0.0 {
        return Err(ApiError::Validation(
            "initial_ease_factor must be positive".to_string(),
        ));
    }
    if config.ease_adjustment_factor <= 0.0 {
        return Err(ApiError::Validation(
            "ease_adjustment_factor must be positive".to_string(),
        ));
    }
    if config.minimum_interval_hours <= 0.0 {
        return Err(ApiError::Validation(
            "minimum_interval_hours must be positive".to_string(),
        ));
    }
    if config.maximum_interval_days <= 0.0 {
        return Err(ApiError::Validation(
            "maximum_interval_days must be positive".to_string(),
        ));
    }
    if config.minimum_interval_hours / 24.0 > config.maximum_interval_days {
        return Err(ApiError::Validation(
            "minimum interval exceeds maximum interval".to_string(),
        ));
    }

    Ok(())
}
