//! API layer
//!
//! Thin HTTP adapter over the timeline service:
//! - Account endpoints (sign-up, login)
//! - Tweet, follow and timeline endpoints
//! - Metrics (Prometheus)

mod accounts;
mod dto;
mod follows;
pub mod metrics;
mod tweets;

pub use dto::*;
pub use metrics::{metrics_router, track_metrics};

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::AppState;
use crate::auth::require_auth;

/// Create the feed API router
///
/// Routes are split into public and authenticated endpoints.
pub fn feed_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/sign-up", post(accounts::sign_up))
        .route("/login", post(accounts::login))
        .route("/timeline/:user_id", get(tweets::user_timeline));

    let authenticated_routes = Router::new()
        .route("/tweet", post(tweets::post_tweet))
        .route("/timeline", get(tweets::own_timeline))
        .route("/follow", post(follows::follow))
        .route("/unfollow", post(follows::unfollow))
        .layer(middleware::from_fn_with_state(state, require_auth));

    public_routes.merge(authenticated_routes)
}
