//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up test environment with database
//! - Helper functions for creating test data
//! - Authentication helpers
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL
//! env var).

pub mod fixtures;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use uuid::Uuid;

use openprep_backend::db::Database;
use openprep_backend::routes;
use openprep_backend::AppState;

/// Test context containing database connection and test server.
///
/// Use this to set up integration tests with a real database connection.
/// Requires DATABASE_URL environment variable to be set.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations()
            .await
            .expect("Failed to run migrations");

        let db = Arc::new(db);

        let state = AppState { db: db.clone() };

        let app = build_test_router(state);

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a test user with seeded default config; returns id and token.
    pub async fn create_test_user(&self, name: Option<&str>) -> (Uuid, String) {
        let user = self
            .db
            .create_user(name)
            .await
            .expect("Failed to create test user");

        openprep_backend::services::config::ensure_config(&self.db, user.id)
            .await
            .expect("Failed to seed default config");

        (user.id, user.token)
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Insert a deviation record and return its id.
    pub async fn insert_test_deviation(
        &self,
        user_id: Uuid,
        position_fen: &str,
        expected_move: &str,
        actual_move: &str,
        color: &str,
    ) -> Uuid {
        sqlx::query_scalar(
            r#"
            INSERT INTO opening_deviations (user_id, position_fen, expected_move, actual_move,
                                            move_number, color, opening_name, first_deviator)
            VALUES ($1, $2, $3, $4, 6, $5, 'Test Opening', 'user')
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(position_fen)
        .bind(expected_move)
        .bind(actual_move)
        .bind(color)
        .fetch_one(self.db.pool())
        .await
        .expect("Failed to insert test deviation")
    }

    /// Insert an immediately-due queue entry for a deviation; returns its id.
    pub async fn insert_due_queue_entry(&self, user_id: Uuid, deviation_id: Uuid) -> Uuid {
        sqlx::query_scalar(
            r#"
            INSERT INTO review_queue (user_id, deviation_id, next_review_at)
            VALUES ($1, $2, NOW())
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(deviation_id)
        .fetch_one(self.db.pool())
        .await
        .expect("Failed to insert queue entry")
    }

    /// Clean up test data for a user.
    ///
    /// Call this after tests to remove test data.
    pub async fn cleanup_user(&self, user_id: Uuid) {
        // Delete in order due to foreign keys
        let _ = sqlx::query("DELETE FROM puzzle_attempts WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM review_queue WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM opening_deviations WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM spaced_repetition_config WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;
    }
}

/// Build the test router with all routes.
fn build_test_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/account/status", get(routes::account::status))
        .route("/api/review/queue", get(routes::review::due))
        .route("/api/review/attempt", post(routes::review::attempt))
        .route("/api/review/enqueue", post(routes::review::enqueue))
        .route("/api/review/reset", post(routes::review::reset))
        .route("/api/review/config", get(routes::config::get))
        .route("/api/review/config", put(routes::config::update))
        .route("/api/review/stats", get(routes::stats::get))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/account/register", post(routes::account::register))
        .merge(protected_routes)
        .with_state(state)
}
