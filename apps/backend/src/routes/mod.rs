//! HTTP route handlers

pub mod account;
pub mod auth;
pub mod config;
pub mod review;
pub mod stats;
