//! Spaced repetition scheduler implementations.

pub mod basic;
pub mod sm2plus;

use chrono::{DateTime, Duration, Utc};

use crate::types::{Algorithm, ReviewInput, ReviewResult, SchedulerConfig};

/// Trait for spaced repetition schedulers.
///
/// Implementations are pure: the caller supplies `now` and the prior
/// state, and receives the next state. Nothing here touches storage.
pub trait ReviewScheduler: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Calculate the next scheduling state after an attempt.
    fn schedule(&self, input: &ReviewInput, config: &SchedulerConfig, now: DateTime<Utc>)
        -> ReviewResult;

    /// State for a freshly detected deviation: immediately due,
    /// interval zero, no successes yet.
    fn initial_state(&self, config: &SchedulerConfig, now: DateTime<Utc>) -> ReviewResult;
}

/// Get the scheduler for an algorithm.
///
/// `Fsrs` is accepted but intentionally aliases to SM2+ until the real
/// implementation lands; callers asking for it get SM2+ scheduling.
pub fn scheduler_for(algorithm: Algorithm) -> Box<dyn ReviewScheduler> {
    match algorithm {
        Algorithm::Basic => Box::new(basic::Basic),
        Algorithm::Sm2Plus | Algorithm::Fsrs => Box::new(sm2plus::Sm2Plus),
    }
}

/// Calculate the next review state for an attempt outcome.
pub fn calculate_next_review(
    algorithm: Algorithm,
    input: &ReviewInput,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> ReviewResult {
    scheduler_for(algorithm).schedule(input, config, now)
}

/// Initialize the scheduling state for a new review queue entry.
pub fn initialize_review_entry(
    algorithm: Algorithm,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> ReviewResult {
    scheduler_for(algorithm).initial_state(config, now)
}

/// Clamp an interval to the configured bounds and compute the due
/// timestamp, days expressed as 24h units.
pub(crate) fn finalize(
    interval_days: f64,
    new_ease_factor: f64,
    consecutive_successes: u32,
    config: &SchedulerConfig,
    now: DateTime<Utc>,
) -> ReviewResult {
    let clamped = interval_days
        .max(config.minimum_interval_days())
        .min(config.maximum_interval_days);

    let next_review_at = now + Duration::milliseconds((clamped * 86_400_000.0) as i64);

    ReviewResult {
        next_review_at,
        new_ease_factor,
        new_interval_days: clamped,
        consecutive_successes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn fsrs_aliases_to_sm2plus() {
        let input = ReviewInput {
            was_correct: true,
            attempts: 1,
            current_ease_factor: 2.3,
            current_interval_days: 6.0,
            consecutive_successes: 2,
            review_count: 2,
            difficulty_level: 1,
        };
        let config = SchedulerConfig::default();
        let t = now();

        let via_fsrs = calculate_next_review(Algorithm::Fsrs, &input, &config, t);
        let via_sm2plus = calculate_next_review(Algorithm::Sm2Plus, &input, &config, t);
        assert_eq!(via_fsrs, via_sm2plus);
    }

    #[test]
    fn scheduler_name_reflects_the_alias() {
        assert_eq!(scheduler_for(Algorithm::Basic).name(), "basic");
        assert_eq!(scheduler_for(Algorithm::Sm2Plus).name(), "sm2plus");
        // The reserved fsrs tag resolves to the SM2+ scheduler.
        assert_eq!(scheduler_for(Algorithm::Fsrs).name(), "sm2plus");
    }

    #[test]
    fn initial_state_is_immediately_due() {
        let config = SchedulerConfig::default();
        let t = now();
        for algorithm in [Algorithm::Basic, Algorithm::Sm2Plus, Algorithm::Fsrs] {
            let state = initialize_review_entry(algorithm, &config, t);
            assert!(state.next_review_at <= t);
            assert_eq!(state.new_interval_days, 0.0);
            assert_eq!(state.consecutive_successes, 0);
        }
    }

    #[test]
    fn initial_ease_comes_from_config_for_sm2plus() {
        let config = SchedulerConfig {
            initial_ease_factor: 2.2,
            ..Default::default()
        };
        let state = initialize_review_entry(Algorithm::Sm2Plus, &config, now());
        assert_eq!(state.new_ease_factor, 2.2);

        // Basic ignores the configured ease and starts at 2.5.
        let state = initialize_review_entry(Algorithm::Basic, &config, now());
        assert_eq!(state.new_ease_factor, 2.5);
    }

    #[test]
    fn finalize_clamps_to_configured_bounds() {
        let config = SchedulerConfig::default();
        let t = now();

        let low = finalize(0.0001, 2.5, 1, &config, t);
        assert_eq!(low.new_interval_days, config.minimum_interval_days());

        let high = finalize(9999.0, 2.5, 1, &config, t);
        assert_eq!(high.new_interval_days, config.maximum_interval_days);
    }
}
