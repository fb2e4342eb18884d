//! Basic scheduler.
//!
//! Linear interval growth keyed off total review count. Carries the
//! ease factor through untouched; only SM2+ adjusts it.

use chrono::{DateTime, Utc};

use super::{finalize, ReviewScheduler};
use crate::types::{ReviewInput, ReviewResult, SchedulerConfig};

#[derive(Debug, Clone, Copy, Default)]
pub struct Basic;

impl ReviewScheduler for Basic {
    fn name(&self) -> &'static str {
        "basic"
    }

    fn initial_state(&self, _config: &SchedulerConfig, now: DateTime<Utc>) -> ReviewResult {
        ReviewResult {
            next_review_at: now,
            new_ease_factor: 2.5,
            new_interval_days: 0.0,
            consecutive_successes: 0,
        }
    }

    fn schedule(
        &self,
        input: &ReviewInput,
        config: &SchedulerConfig,
        now: DateTime<Utc>,
    ) -> ReviewResult {
        if input.was_correct {
            let successes = input.consecutive_successes + 1;

            let base_interval = (1.0 + input.review_count as f64 * 2.0).min(30.0);
            let performance_multiplier = match input.attempts {
                1 => 1.2,
                2 => 1.0,
                _ => 0.8,
            };
            let difficulty_multiplier =
                1.0 + (input.difficulty_level.saturating_sub(1)) as f64 * 0.3;

            let interval = base_interval * performance_multiplier * difficulty_multiplier;

            finalize(interval, input.current_ease_factor, successes, config, now)
        } else {
            let interval = match input.consecutive_successes {
                0 => config.minimum_interval_days(),
                1 | 2 => 4.0 / 24.0,
                _ => 1.0,
            };

            finalize(interval, input.current_ease_factor, 0, config, now)
        }
    }
}
