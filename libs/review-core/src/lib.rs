//! Core spaced-repetition library for opening deviation training.
//!
//! Provides:
//! - Scheduling algorithm implementations (SM2+, Basic, FSRS placeholder)
//! - Shared types (ReviewInput, ReviewResult, SchedulerConfig)
//!
//! Everything in this crate is pure and synchronous: callers pass the
//! current time in and get the next scheduling state back.

pub mod algorithm;
pub mod error;
pub mod types;

pub use algorithm::{
    calculate_next_review, initialize_review_entry, scheduler_for, ReviewScheduler,
};
pub use error::{AlgorithmError, Result};
pub use types::{Algorithm, ReviewInput, ReviewResult, SchedulerConfig};
