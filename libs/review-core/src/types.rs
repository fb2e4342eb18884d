//! Core types for deviation review scheduling.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scheduling algorithm options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "basic")]
    Basic,
    #[serde(rename = "sm2plus")]
    Sm2Plus,
    /// Reserved for a future forgetting-curve implementation.
    /// Currently schedules via SM2+ (documented alias).
    #[serde(rename = "fsrs")]
    Fsrs,
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Sm2Plus
    }
}

impl Algorithm {
    /// Get the algorithm tag as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Sm2Plus => "sm2plus",
            Self::Fsrs => "fsrs",
        }
    }

    /// Parse from a stored tag.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "basic" => Some(Self::Basic),
            "sm2plus" => Some(Self::Sm2Plus),
            "fsrs" => Some(Self::Fsrs),
            _ => None,
        }
    }
}

/// Outcome of one puzzle attempt against the item's current state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewInput {
    pub was_correct: bool,
    /// Number of tries it took to answer this puzzle (1 = first try).
    pub attempts: u32,
    pub current_ease_factor: f64,
    pub current_interval_days: f64,
    /// Uninterrupted correct reviews since the last failure.
    pub consecutive_successes: u32,
    /// Total reviews recorded for this item so far.
    pub review_count: u32,
    /// Small positive integer, 1 = easiest.
    pub difficulty_level: u32,
}

/// Per-user tuning parameters for the schedulers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub target_retention_rate: f64,
    pub initial_ease_factor: f64,
    pub ease_adjustment_factor: f64,
    pub minimum_interval_hours: f64,
    pub maximum_interval_days: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            target_retention_rate: 0.9,
            initial_ease_factor: 2.5,
            ease_adjustment_factor: 0.15,
            minimum_interval_hours: 1.0,
            maximum_interval_days: 365.0,
        }
    }
}

impl SchedulerConfig {
    /// Shortest allowed interval, expressed in days.
    pub fn minimum_interval_days(&self) -> f64 {
        self.minimum_interval_hours / 24.0
    }
}

/// Next scheduling state after an attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub next_review_at: DateTime<Utc>,
    pub new_ease_factor: f64,
    pub new_interval_days: f64,
    pub consecutive_successes: u32,
}
