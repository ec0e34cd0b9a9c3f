//! Feedline - a minimal social feed backend
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      API Layer (Axum)                        │
//! │  - sign-up, login, tweet, follow, timeline                  │
//! │  - bearer token check (auth middleware)                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Service Layer                            │
//! │  - Timeline service (accounts, tweets, follow graph)         │
//! │  - Auth service (argon2 passwords, HS256 tokens)             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Data Layer                              │
//! │  - SQLite (sqlx): users, follow_edges, tweets               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - `api`: HTTP handlers
//! - `service`: Business logic layer
//! - `auth`: Password hashing, access tokens, middleware
//! - `data`: Database layer
//! - `config`: Configuration management
//! - `error`: Error types
//! - `metrics`: Prometheus instruments

pub mod api;
pub mod auth;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod service;

use std::sync::Arc;

/// Application state shared across all handlers
///
/// Cloned for each request; everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: Arc<data::Database>,

    /// Password hashing and token signing
    pub auth: Arc<auth::AuthService>,

    /// Business logic
    pub timeline: Arc<service::TimelineService>,
}

impl AppState {
    /// Initialize application state
    ///
    /// # Steps
    /// 1. Connect to SQLite database (runs migrations)
    /// 2. Build the auth service from configuration
    /// 3. Wire the timeline service
    ///
    /// # Errors
    /// Returns error if any initialization step fails
    pub async fn new(config: &config::AppConfig) -> Result<Self, error::AppError> {
        tracing::info!("Initializing application state...");

        let db = data::Database::connect_with_pool_size(
            &config.database.path,
            config.database.max_connections,
        )
        .await?;
        let db = Arc::new(db);
        tracing::info!("Database connected");

        let auth = Arc::new(auth::AuthService::new(&config.auth)?);
        let timeline = Arc::new(service::TimelineService::new(db.clone(), auth.clone()));

        tracing::info!("Application state initialized successfully");

        Ok(Self {
            db,
            auth,
            timeline,
        })
    }
}

/// Build the Axum router with all routes.
///
/// This is shared by the binary and integration tests to keep route
/// composition consistent across environments.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::Router;
    use tower_http::{cors::CorsLayer, trace::TraceLayer};

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .route("/ping", axum::routing::get(ping))
        .merge(api::feed_router(state.clone()))
        .merge(api::metrics_router())
        .layer(axum::middleware::from_fn(api::track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn ping() -> &'static str {
    "pong"
}
