//! SM2+ scheduler (enhanced SuperMemo 2).
//!
//! Differences from classic SM-2:
//! - ease adjustments keyed off how many tries the answer took
//! - graduated recovery intervals after a failure, most forgiving for
//!   items that had built up a success streak
//! - difficulty-based interval stretch

use chrono::{DateTime, Utc};

use super::{finalize, ReviewScheduler};
use crate::types::{ReviewInput, ReviewResult, SchedulerConfig};

/// Ease factor bounds shared by every scheduler.
pub const MIN_EASE_FACTOR: f64 = 1.3;
pub const MAX_EASE_FACTOR: f64 = 2.5;

#[derive(Debug, Clone, Copy, Default)]
pub struct Sm2Plus;

impl ReviewScheduler for Sm2Plus {
    fn name(&self) -> &'static str {
        "sm2plus"
    }

    fn initial_state(&self, config: &SchedulerConfig, now: DateTime<Utc>) -> ReviewResult {
        ReviewResult {
            next_review_at: now,
            new_ease_factor: config.initial_ease_factor,
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

            let ease = match input.attempts {
                1 => (input.current_ease_factor + 0.1).min(MAX_EASE_FACTOR),
                2 => (input.current_ease_factor + 0.05).min(MAX_EASE_FACTOR),
                _ => input.current_ease_factor,
            };

            let base_interval = match successes {
                1 => 1.0,
                2 => 6.0,
                _ => input.current_interval_days * ease,
            };

            // Harder puzzles earn longer intervals.
            let difficulty_multiplier = 1.0 + (input.difficulty_level.saturating_sub(1)) as f64 * 0.2;
            let interval = base_interval * difficulty_multiplier;

            finalize(interval, ease, successes, config, now)
        } else {
            let ease_reduction = config.ease_adjustment_factor * input.attempts as f64;
            let ease = (input.current_ease_factor - ease_reduction).max(MIN_EASE_FACTOR);

            // Graduated recovery keyed off the streak the failure broke.
            let interval = match input.consecutive_successes {
                0 => config.minimum_interval_days(),
                1 => 4.0 / 24.0,
                _ => 1.0,
            };

            finalize(interval, ease, 0, config, now)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn input(was_correct: bool, attempts: u32) -> ReviewInput {
        ReviewInput {
            was_correct,
            attempts,
            current_ease_factor: 2.5,
            current_interval_days: 1.0,
            consecutive_successes: 0,
            review_count: 0,
            difficulty_level: 1,
        }
    }

    #[test]
    fn first_success_on_level_two_puzzle() {
        // Correct first try against difficulty 2: one-day base interval
        // stretched by 1.2, ease stays capped at 2.5.
        let result = Sm2Plus.schedule(
            &ReviewInput {
                difficulty_level: 2,
                ..input(true, 1)
            },
            &SchedulerConfig::default(),
            now(),
        );

        assert_eq!(result.consecutive_successes, 1);
        assert!((result.new_interval_days - 1.2).abs() < 1e-9);
        assert_eq!(result.new_ease_factor, 2.5);
    }

    #[test]
    fn second_success_gets_six_days() {
        let result = Sm2Plus.schedule(
            &ReviewInput {
                consecutive_successes: 1,
                current_interval_days: 1.0,
                ..input(true, 1)
            },
            &SchedulerConfig::default(),
            now(),
        );

        assert_eq!(result.consecutive_successes, 2);
        assert_eq!(result.new_interval_days, 6.0);
    }

    #[test]
    fn mature_success_multiplies_by_ease() {
        let result = Sm2Plus.schedule(
            &ReviewInput {
                consecutive_successes: 2,
                current_interval_days: 6.0,
                current_ease_factor: 2.0,
                ..input(true, 3)
            },
            &SchedulerConfig::default(),
            now(),
        );

        // Three tries: ease unchanged, interval = 6 * 2.0.
        assert_eq!(result.new_ease_factor, 2.0);
        assert_eq!(result.new_interval_days, 12.0);
    }

    #[test]
    fn failure_after_streak_resets_to_one_day() {
        let result = Sm2Plus.schedule(
            &ReviewInput {
                consecutive_successes: 3,
                current_interval_days: 7.0,
                ..input(false, 1)
            },
            &SchedulerConfig::default(),
            now(),
        );

        assert_eq!(result.consecutive_successes, 0);
        assert_eq!(result.new_interval_days, 1.0);
        assert!(result.new_ease_factor < 2.5);
    }

    #[test]
    fn repeat_failure_gets_minimum_interval() {
        let config = SchedulerConfig::default();
        let result = Sm2Plus.schedule(&input(false, 2), &config, now());

        assert_eq!(result.new_interval_days, config.minimum_interval_days());
        assert_eq!(result.consecutive_successes, 0);
    }

    #[test]
    fn failure_after_single_success_retries_in_four_hours() {
        let result = Sm2Plus.schedule(
            &ReviewInput {
                consecutive_successes: 1,
                ..input(false, 1)
            },
            &SchedulerConfig::default(),
            now(),
        );

        assert!((result.new_interval_days - 4.0 / 24.0).abs() < 1e-9);
    }

    #[test]
    fn ease_factor_never_leaves_bounds() {
        // Deterministic pseudo-random walk over outcomes; ease must stay
        // inside [1.3, 2.5] no matter the sequence.
        let config = SchedulerConfig::default();
        let mut state = Sm2Plus.initial_state(&config, now());
        let mut successes = 0u32;
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;

        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            let was_correct = seed % 3 != 0;
            let attempts = (seed % 4) as u32 + 1;

            let result = Sm2Plus.schedule(
                &ReviewInput {
                    was_correct,
                    attempts,
                    current_ease_factor: state.new_ease_factor,
                    current_interval_days: state.new_interval_days,
                    consecutive_successes: successes,
                    review_count: 0,
                    difficulty_level: (seed % 5) as u32 + 1,
                },
                &config,
                now(),
            );

            assert!(result.new_ease_factor >= MIN_EASE_FACTOR);
            assert!(result.new_ease_factor <= MAX_EASE_FACTOR);
            assert!(result.new_interval_days >= config.minimum_interval_days());
            assert!(result.new_interval_days <= config.maximum_interval_days);
            if !was_correct {
                assert_eq!(result.consecutive_successes, 0);
            }

            successes = result.consecutive_successes;
            state = result;
        }
    }

    #[test]
    fn interval_clamps_to_maximum() {
        let config = SchedulerConfig {
            maximum_interval_days: 30.0,
            ..Default::default()
        };
        let result = Sm2Plus.schedule(
            &ReviewInput {
                consecutive_successes: 5,
                current_interval_days: 25.0,
                ..input(true, 1)
            },
            &config,
            now(),
        );

        assert_eq!(result.new_interval_days, 30.0);
    }
}
