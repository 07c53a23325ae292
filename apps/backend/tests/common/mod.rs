//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext for setting up test environment with database
//! - Helper functions for creating test data
//! - Authentication helpers
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL env var).

pub mod fixtures;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use uuid::Uuid;

use concept_coach_backend::db::Database;
use concept_coach_backend::models::User;
use concept_coach_backend::routes;
use concept_coach_backend::AppState;
use mastery_core::Scheduler;

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

        db.run_migrations().await.expect("Failed to run migrations");

        let db = Arc::new(db);

        let state = AppState {
            db: db.clone(),
            scheduler: Arc::new(Scheduler::default()),
        };

        let app = build_test_router(state);

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a test user and return its ID and token.
    pub async fn create_test_user(&self, name: Option<&str>) -> (Uuid, String) {
        let user = self
            .db
            .create_user(name)
            .await
            .expect("Failed to create test user");
        (user.id, user.token)
    }

    /// Get user by token.
    pub async fn get_user_by_token(&self, token: &str) -> Option<User> {
        self.db.get_user_by_token(token).await.ok().flatten()
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Clean up test data for a user.
    ///
    /// Call this after tests to remove test data.
    pub async fn cleanup_user(&self, user_id: Uuid) {
        // Delete in order due to foreign keys
        let _ = sqlx::query("DELETE FROM concept_understanding WHERE user_id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;

        let _ = sqlx::query("DELETE FROM papers WHERE user_id = $1")
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
        .route("/api/users/status", get(routes::users::status))
        .route("/api/papers", post(routes::papers::create))
        .route("/api/papers", get(routes::papers::list))
        .route(
            "/api/papers/{paper_id}/concepts",
            get(routes::papers::concepts),
        )
        .route(
            "/api/progress/{paper_id}/concepts",
            get(routes::progress::concepts),
        )
        .route(
            "/api/progress/{paper_id}/concepts/{concept_id}",
            get(routes::progress::concept),
        )
        .route("/api/progress/review", post(routes::progress::review))
        .route("/api/progress/{paper_id}/due", get(routes::progress::due))
        .route(
            "/api/progress/{paper_id}/struggling",
            get(routes::progress::struggling),
        )
        .route(
            "/api/progress/{paper_id}/retention",
            get(routes::progress::retention),
        )
        .route("/api/quiz/results", post(routes::quiz::submit_results))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/users/register", post(routes::users::register))
        .merge(protected_routes)
        .with_state(state)
}
