pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;
use mastery_core::Scheduler;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub scheduler: Arc<Scheduler>,
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Connect to database
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let state = AppState {
        db: Arc::new(db),
        scheduler: Arc::new(Scheduler::default()),
    };

    // Build router with protected routes
    let protected_routes = Router::new()
        // User routes
        .route("/api/users/status", get(routes::users::status))
        // Paper catalog routes
        .route("/api/papers", post(routes::papers::create))
        .route("/api/papers", get(routes::papers::list))
        .route(
            "/api/papers/{paper_id}/concepts",
            get(routes::papers::concepts),
        )
        // Progress routes
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
        // Quiz evaluation route
        .route("/api/quiz/results", post(routes::quiz::submit_results))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    // Build full router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/users/register", post(routes::users::register))
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
