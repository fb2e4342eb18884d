//! Backend services

pub mod config;
pub mod queue;
pub mod recorder;
pub mod stats;
